//! Schema command
//!
//! Usage: orgdb schema init|drop

use clap::{Args, Subcommand};
use orgdb_store::{DepartmentRepo, EmployeeRepo};

use super::{CommandResult, Context};

#[derive(Debug, Args)]
pub struct SchemaArgs {
    #[command(subcommand)]
    pub command: SchemaCommand,
}

#[derive(Debug, Subcommand)]
pub enum SchemaCommand {
    /// Create both tables if missing
    Init,
    /// Drop both tables, employees first
    Drop,
}

pub fn execute(ctx: &Context, args: SchemaArgs) -> CommandResult {
    let conn = ctx.open()?;
    let departments = DepartmentRepo::new(&conn);
    let employees = EmployeeRepo::new(&departments);

    match args.command {
        SchemaCommand::Init => {
            departments.define_schema()?;
            employees.define_schema()?;
            ctx.print_message(
                "schema initialized",
                serde_json::json!({ "schema": "initialized" }),
            )
        }
        SchemaCommand::Drop => {
            employees.drop_schema()?;
            departments.drop_schema()?;
            ctx.print_message("schema dropped", serde_json::json!({ "schema": "dropped" }))
        }
    }
}
