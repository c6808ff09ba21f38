//! Domain types and pure rules for the workflow routing service.
//!
//! Nothing in this crate touches the database or HTTP; the `db` and `api`
//! crates build on these rules.

pub mod dependency;
pub mod designator;
pub mod error;
pub mod layout;
pub mod sanitize;
pub mod types;
