//! Authentication primitives.
//!
//! - [`jwt`] -- JWT access-token generation and validation.
//!
//! Sign-in itself lives outside this service; it only verifies the tokens.

pub mod jwt;
