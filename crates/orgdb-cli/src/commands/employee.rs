//! Employee commands
//!
//! Usage: orgdb employee <list|find-by-name|find-by-id|create|update|delete>

use clap::{Args, Subcommand};
use orgdb_core::Employee;
use orgdb_store::{DepartmentRepo, EmployeeRepo};

use super::{CommandResult, Context};

#[derive(Debug, Args)]
pub struct EmployeeArgs {
    #[command(subcommand)]
    pub command: EmployeeCommand,
}

#[derive(Debug, Subcommand)]
pub enum EmployeeCommand {
    /// List every employee in store order
    List,
    /// First employee with exactly this name
    FindByName { name: String },
    FindById { id: i64 },
    /// Create an employee in an existing department
    Create {
        name: String,
        job_title: String,
        department_id: i64,
    },
    /// Change an employee's fields; a new department must exist
    Update(UpdateArgs),
    Delete { id: i64 },
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    pub id: i64,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub job_title: Option<String>,

    #[arg(long)]
    pub department_id: Option<i64>,
}

pub fn execute(ctx: &Context, args: EmployeeArgs) -> CommandResult {
    let conn = ctx.open()?;
    let departments = DepartmentRepo::new(&conn);
    let employees = EmployeeRepo::new(&departments);

    match args.command {
        EmployeeCommand::List => {
            let rows = employees
                .get_all()?
                .iter()
                .map(|e| e.snapshot())
                .collect::<Result<Vec<_>, _>>()?;
            ctx.print_many(&rows)
        }
        EmployeeCommand::FindByName { name } => {
            let found = employees.find_by_name(&name)?;
            ctx.print_one(found.map(|e| e.snapshot()).transpose()?.as_ref())
        }
        EmployeeCommand::FindById { id } => {
            let found = employees.find_by_id(id)?;
            ctx.print_one(found.map(|e| e.snapshot()).transpose()?.as_ref())
        }
        EmployeeCommand::Create {
            name,
            job_title,
            department_id,
        } => {
            let created = employees.create(name, job_title, department_id)?;
            ctx.print_one(Some(&created.snapshot()?))
        }
        EmployeeCommand::Update(update) => {
            let Some(employee) = employees.find_by_id(update.id)? else {
                return ctx.print_one::<Employee>(None);
            };
            if let Some(name) = update.name {
                employee.modify(|e| e.set_name(name))?;
            }
            if let Some(job_title) = update.job_title {
                employee.modify(|e| e.set_job_title(job_title))?;
            }
            if let Some(department_id) = update.department_id {
                employees.reassign(&employee, department_id)?;
            }
            employees.update(&employee)?;
            ctx.print_one(Some(&employee.snapshot()?))
        }
        EmployeeCommand::Delete { id } => {
            let Some(employee) = employees.find_by_id(id)? else {
                return ctx.print_one::<Employee>(None);
            };
            employees.delete(&employee)?;
            ctx.print_message(
                &format!("deleted employee {}", id),
                serde_json::json!({ "deleted": id }),
            )
        }
    }
}
