//! Department commands
//!
//! Usage: orgdb department <list|find-by-name|find-by-id|create|update|delete|employees>

use clap::{Args, Subcommand};
use orgdb_store::{DepartmentRepo, EmployeeRepo};

use super::{CommandResult, Context};

#[derive(Debug, Args)]
pub struct DepartmentArgs {
    #[command(subcommand)]
    pub command: DepartmentCommand,
}

#[derive(Debug, Subcommand)]
pub enum DepartmentCommand {
    /// List every department in store order
    List,
    /// First department with exactly this name
    FindByName { name: String },
    FindById { id: i64 },
    /// Create a department
    Create { name: String, location: String },
    /// Change a department's name and/or location
    Update(UpdateArgs),
    Delete { id: i64 },
    /// List the employees of a department
    Employees { id: i64 },
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    pub id: i64,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub location: Option<String>,
}

pub fn execute(ctx: &Context, args: DepartmentArgs) -> CommandResult {
    let conn = ctx.open()?;
    let departments = DepartmentRepo::new(&conn);

    match args.command {
        DepartmentCommand::List => {
            let rows = departments
                .get_all()?
                .iter()
                .map(|d| d.snapshot())
                .collect::<Result<Vec<_>, _>>()?;
            ctx.print_many(&rows)
        }
        DepartmentCommand::FindByName { name } => {
            let found = departments.find_by_name(&name)?;
            ctx.print_one(found.map(|d| d.snapshot()).transpose()?.as_ref())
        }
        DepartmentCommand::FindById { id } => {
            let found = departments.find_by_id(id)?;
            ctx.print_one(found.map(|d| d.snapshot()).transpose()?.as_ref())
        }
        DepartmentCommand::Create { name, location } => {
            let created = departments.create(name, location)?;
            ctx.print_one(Some(&created.snapshot()?))
        }
        DepartmentCommand::Update(update) => {
            let Some(department) = departments.find_by_id(update.id)? else {
                return ctx.print_one::<orgdb_core::Department>(None);
            };
            if let Some(name) = update.name {
                department.modify(|d| d.set_name(name))?;
            }
            if let Some(location) = update.location {
                department.modify(|d| d.set_location(location))?;
            }
            departments.update(&department)?;
            ctx.print_one(Some(&department.snapshot()?))
        }
        DepartmentCommand::Delete { id } => {
            let Some(department) = departments.find_by_id(id)? else {
                return ctx.print_one::<orgdb_core::Department>(None);
            };
            departments.delete(&department)?;
            ctx.print_message(
                &format!("deleted department {}", id),
                serde_json::json!({ "deleted": id }),
            )
        }
        DepartmentCommand::Employees { id } => {
            let Some(department) = departments.find_by_id(id)? else {
                return ctx.print_one::<orgdb_core::Department>(None);
            };
            let employees = EmployeeRepo::new(&departments);
            let staff = departments
                .employees_of(&employees, &department)?
                .iter()
                .map(|e| e.snapshot())
                .collect::<Result<Vec<_>, _>>()?;
            ctx.print_many(&staff)
        }
    }
}
