//! Homestead - property and checklist backend for Loved Homes
//!
//! Manages vacation-home properties, each owning a hierarchical checklist
//! of items and folders embedded whole in the property document.
//!
//! ## Services
//!
//! - **Properties**: CRUD over property documents in MongoDB
//! - **Checklist**: positional-path reads and mutations of the embedded
//!   tree, persisted as a whole-tree rewrite per edit

pub mod checklist;
pub mod config;
pub mod db;
pub mod routes;
pub mod server;
pub mod services;
pub mod types;

pub use config::Args;
pub use server::{run, AppState};
pub use types::{HomesteadError, Result};
