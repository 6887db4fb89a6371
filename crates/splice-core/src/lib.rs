//! Recipes and the step runner for splice
//!
//! A [`Recipe`] lists the edits to make and the files to make them in.
//! The [`Runner`] performs one read-transform-write cycle per file and
//! step, and reports what happened in a [`RunReport`].

pub mod error;
pub mod recipe;
pub mod runner;

pub use error::{Error, Result};
pub use recipe::{InsertStep, Recipe, RelocateStep, ReplaceStep, Step};
pub use runner::{FileReport, FileResult, RunOptions, RunReport, Runner};
