//! Subcommand implementations and shared output helpers

pub mod department;
pub mod employee;
pub mod schema;
pub mod seed;

use orgdb_store::{db, StoreConfig};
use rusqlite::Connection;
use serde::Serialize;
use std::fmt::Display;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Settings shared by every subcommand
pub struct Context {
    pub config: StoreConfig,
    pub json: bool,
}

impl Context {
    pub fn open(&self) -> orgdb_store::Result<Connection> {
        tracing::debug!(path = ?self.config.path(), "opening store");
        db::open_with(&self.config)
    }

    /// Print one entity, or "not found" (`null` in JSON mode)
    pub fn print_one<T: Serialize + Display>(&self, item: Option<&T>) -> CommandResult {
        match (item, self.json) {
            (Some(item), true) => println!("{}", serde_json::to_string_pretty(item)?),
            (Some(item), false) => println!("{}", item),
            (None, true) => println!("null"),
            (None, false) => println!("not found"),
        }
        Ok(())
    }

    /// Print entities one per line, or as a JSON array
    pub fn print_many<T: Serialize + Display>(&self, items: &[T]) -> CommandResult {
        if self.json {
            println!("{}", serde_json::to_string_pretty(items)?);
        } else {
            for item in items {
                println!("{}", item);
            }
        }
        Ok(())
    }

    /// Print a short confirmation, or the JSON value
    pub fn print_message(&self, text: &str, value: serde_json::Value) -> CommandResult {
        if self.json {
            println!("{}", serde_json::to_string_pretty(&value)?);
        } else {
            println!("{}", text);
        }
        Ok(())
    }
}
