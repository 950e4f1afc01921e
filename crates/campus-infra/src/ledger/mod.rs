//! Refresh token ledger implementations.

mod memory;

pub use memory::InMemoryRefreshLedger;
