//! Domain types shared by the database and API crates.
//!
//! Holds the error taxonomy, primitive type aliases, role constants, and the
//! upload validation rules. No I/O happens in this crate.

pub mod error;
pub mod roles;
pub mod types;
pub mod uploads;
