//! # Question Bank
//!
//! The static side of the question cards - question records, the moments they
//! apply to, their categories, and the catalog that holds them.
//! This crate is a passive data source: it validates and serves questions but
//! never decides which one to show.

pub mod catalog;
pub mod question;

pub use catalog::*;
pub use question::*;
