//! # Campus Infrastructure
//!
//! Concrete implementations of the ports defined in `campus-core`:
//! the Argon2 password hasher, the JWT token codec, and in-memory
//! adapters for the credential store, refresh ledger and owned-record
//! repositories. Swapping the in-memory adapters for database-backed
//! ones only requires honoring the same port contracts.

pub mod auth;
pub mod clock;
pub mod ledger;
pub mod repository;
pub mod store;

pub use auth::{Argon2PasswordHasher, JwtTokenCodec};
pub use clock::SystemClock;
pub use ledger::InMemoryRefreshLedger;
pub use repository::InMemoryOwnedRepository;
pub use store::InMemoryCredentialStore;
