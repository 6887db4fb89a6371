//! Command implementations for splice-cli

pub mod apply;
pub mod insert;
pub mod relocate;
pub mod replace;
mod report;

pub use apply::run_apply;
pub use insert::run_insert;
pub use relocate::run_relocate;
pub use replace::run_replace;
