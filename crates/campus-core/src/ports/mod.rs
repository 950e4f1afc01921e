//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod clock;
mod ledger;
mod repository;
mod store;
mod token;

pub use auth::{AuthError, PasswordHasher};
pub use clock::Clock;
pub use ledger::{LedgerError, RefreshLedger};
pub use repository::{BaseRepository, OwnedRepository};
pub use store::CredentialStore;
pub use token::{Claims, TokenCodec, TokenError, TokenKind};
