//! `contentscan` command-line front end.
//!
//! Re-exports internal modules for testing. The binary entrypoint lives
//! in `main.rs`.

pub mod config;
pub mod files;
pub mod presenter;
pub mod report;
