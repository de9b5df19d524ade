//! Row structs for the space tables.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row and the conversions into domain types.

pub mod space;
