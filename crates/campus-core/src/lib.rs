//! # Campus Core
//!
//! The domain layer of the Campus backend.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! the identity/token domain types, the ports infrastructure must implement, and
//! the authentication/authorization services built on top of them.

pub mod auth;
pub mod domain;
pub mod error;
pub mod ports;

pub use error::RepoError;
