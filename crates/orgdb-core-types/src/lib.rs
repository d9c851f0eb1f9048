//! Core types shared across orgdb facilities
//!
//! This crate provides the canonical field keys and event names used by the
//! logging facility and the error facility, so every crate in the workspace
//! emits structurally identical events.

pub mod schema;
