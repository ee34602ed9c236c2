//! Domain types
//!
//! Profile input, report output and the session that ties them together.

pub mod profile;
pub mod report;
pub mod session;
