//! Application state - shared across all handlers.

use std::sync::Arc;

use chrono::Duration;

use campus_core::auth::{AuthPolicy, Authenticator, AuthorizationGuard};
use campus_core::domain::{CalendarEvent, Grade, Note, ScheduleEntry};
use campus_core::ports::{AuthError, Clock, CredentialStore, OwnedRepository, PasswordHasher};
use campus_infra::{
    Argon2PasswordHasher, InMemoryCredentialStore, InMemoryOwnedRepository,
    InMemoryRefreshLedger, JwtTokenCodec, SystemClock,
};

use crate::config::AuthSettings;

/// Shared application state.
///
/// The in-memory adapters stand in for database-backed implementations
/// of the same ports; swapping them out does not touch the handlers or
/// the core services.
#[derive(Clone)]
pub struct AppState {
    pub authenticator: Arc<Authenticator>,
    pub guard: Arc<AuthorizationGuard>,
    pub store: Arc<dyn CredentialStore>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub grades: Arc<dyn OwnedRepository<Grade>>,
    pub schedule: Arc<dyn OwnedRepository<ScheduleEntry>>,
    pub calendar: Arc<dyn OwnedRepository<CalendarEvent>>,
    pub notes: Arc<dyn OwnedRepository<Note>>,
}

impl AppState {
    /// Wire the adapters into the core services.
    pub fn new(settings: &AuthSettings) -> Result<Self, AuthError> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let store = Arc::new(InMemoryCredentialStore::new());
        let hasher: Arc<dyn PasswordHasher> =
            Arc::new(Argon2PasswordHasher::new(settings.argon2_time_cost)?);
        let codec = Arc::new(JwtTokenCodec::new(&settings.jwt_secret, clock.clone()));
        let ledger = Arc::new(InMemoryRefreshLedger::new(
            Duration::days(settings.refresh_ttl_days),
            clock.clone(),
        ));

        let policy = AuthPolicy {
            access_ttl: Duration::minutes(settings.access_ttl_minutes),
            revoke_chain_on_replay: settings.revoke_chain_on_replay,
        };

        let authenticator = Arc::new(Authenticator::new(
            store.clone(),
            hasher.clone(),
            codec.clone(),
            ledger,
            clock,
            policy,
        ));
        let guard = Arc::new(AuthorizationGuard::new(codec, store.clone()));

        tracing::info!("Application state initialized");

        Ok(Self {
            authenticator,
            guard,
            store,
            hasher,
            grades: Arc::new(InMemoryOwnedRepository::<Grade>::new()),
            schedule: Arc::new(InMemoryOwnedRepository::<ScheduleEntry>::new()),
            calendar: Arc::new(InMemoryOwnedRepository::<CalendarEvent>::new()),
            notes: Arc::new(InMemoryOwnedRepository::<Note>::new()),
        })
    }
}
