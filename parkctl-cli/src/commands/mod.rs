//! Command implementations for parkctl CLI

pub mod demo;
pub mod serve;
pub mod vehicles;

// Re-export main dispatcher functions for flat access from main.rs
pub use demo::run_demo;
pub use serve::run_serve;
pub use vehicles::{run_entry, run_exit, run_info, run_list, run_lookup};
