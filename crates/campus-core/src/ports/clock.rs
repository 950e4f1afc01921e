use chrono::{DateTime, Utc};

/// Time source for token expiry decisions.
///
/// Injected rather than read ambiently so expiry behavior is testable.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
