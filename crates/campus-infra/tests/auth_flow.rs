//! Authenticator and guard behavior over the in-memory adapters.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};

use campus_core::auth::{AuthPolicy, Authenticator, AuthorizationGuard};
use campus_core::domain::Identity;
use campus_core::ports::{AuthError, Clock, CredentialStore, PasswordHasher};
use campus_infra::{
    Argon2PasswordHasher, InMemoryCredentialStore, InMemoryRefreshLedger, JwtTokenCodec,
};

struct ManualClock(Mutex<DateTime<Utc>>);

impl ManualClock {
    fn starting_now() -> Arc<Self> {
        Arc::new(Self(Mutex::new(Utc::now())))
    }

    fn advance(&self, by: Duration) {
        *self.0.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

struct Harness {
    authenticator: Authenticator,
    guard: AuthorizationGuard,
    store: Arc<InMemoryCredentialStore>,
    hasher: Arc<Argon2PasswordHasher>,
    clock: Arc<ManualClock>,
}

fn harness(policy: AuthPolicy) -> Harness {
    let clock = ManualClock::starting_now();
    let store = Arc::new(InMemoryCredentialStore::new());
    let hasher = Arc::new(Argon2PasswordHasher::default());
    let codec = Arc::new(JwtTokenCodec::new("integration-secret", clock.clone()));
    let ledger = Arc::new(InMemoryRefreshLedger::new(Duration::days(7), clock.clone()));

    let authenticator = Authenticator::new(
        store.clone(),
        hasher.clone(),
        codec.clone(),
        ledger,
        clock.clone(),
        policy,
    );
    let guard = AuthorizationGuard::new(codec, store.clone());

    Harness {
        authenticator,
        guard,
        store,
        hasher,
        clock,
    }
}

impl Harness {
    async fn register(&self, ra: &str, username: &str, email: &str, password: &str) -> Identity {
        let digest = self.hasher.hash(password).unwrap();
        self.store
            .save(Identity::new(
                ra.to_string(),
                "Test Student".to_string(),
                email.to_string(),
                username.to_string(),
                digest,
                1,
            ))
            .await
            .unwrap()
    }
}

#[tokio::test]
async fn login_issues_pair_that_authenticates() {
    let h = harness(AuthPolicy::default());
    h.register("1234567890123", "joao123", "joao@example.com", "secret1")
        .await;

    let pair = h.authenticator.login("joao123", "secret1").await.unwrap();
    let identity = h.guard.authenticate(&pair.access_token).await.unwrap();
    assert_eq!(identity.ra, "1234567890123");

    // Email works as the login identifier too.
    let by_email = h
        .authenticator
        .login("joao@example.com", "secret1")
        .await
        .unwrap();
    let identity = h.guard.authenticate(&by_email.access_token).await.unwrap();
    assert_eq!(identity.ra, "1234567890123");
}

#[tokio::test]
async fn bad_password_and_unknown_user_are_indistinguishable() {
    let h = harness(AuthPolicy::default());
    h.register("1234567890123", "joao123", "joao@example.com", "secret1")
        .await;

    let wrong_password = h
        .authenticator
        .login("joao123", "not-the-password")
        .await
        .unwrap_err();
    let unknown_user = h
        .authenticator
        .login("nobody", "whatever")
        .await
        .unwrap_err();

    assert!(matches!(wrong_password, AuthError::InvalidCredentials));
    assert!(matches!(unknown_user, AuthError::InvalidCredentials));
    assert_eq!(wrong_password.to_string(), unknown_user.to_string());
}

#[tokio::test]
async fn refresh_rotates_and_rejects_the_old_token() {
    let h = harness(AuthPolicy::default());
    h.register("1234567890123", "joao123", "joao@example.com", "secret1")
        .await;

    let first = h.authenticator.login("joao123", "secret1").await.unwrap();
    let second = h
        .authenticator
        .refresh(&first.refresh_token)
        .await
        .unwrap();

    // The new pair is live.
    let identity = h.guard.authenticate(&second.access_token).await.unwrap();
    assert_eq!(identity.ra, "1234567890123");
    assert!(h.authenticator.refresh(&second.refresh_token).await.is_ok());

    // The first refresh token is spent.
    let replay = h
        .authenticator
        .refresh(&first.refresh_token)
        .await
        .unwrap_err();
    assert!(matches!(replay, AuthError::InvalidRefresh));
}

#[tokio::test]
async fn expired_refresh_token_is_rejected_even_unrotated() {
    let h = harness(AuthPolicy::default());
    h.register("1234567890123", "joao123", "joao@example.com", "secret1")
        .await;

    let pair = h.authenticator.login("joao123", "secret1").await.unwrap();
    h.clock.advance(Duration::days(8));

    let expired = h
        .authenticator
        .refresh(&pair.refresh_token)
        .await
        .unwrap_err();
    assert!(matches!(expired, AuthError::InvalidRefresh));
}

#[tokio::test]
async fn expired_access_token_is_unauthenticated() {
    let h = harness(AuthPolicy::default());
    h.register("1234567890123", "joao123", "joao@example.com", "secret1")
        .await;

    let pair = h.authenticator.login("joao123", "secret1").await.unwrap();
    h.clock.advance(Duration::minutes(31));

    let expired = h.guard.authenticate(&pair.access_token).await.unwrap_err();
    assert!(matches!(expired, AuthError::Unauthenticated));
}

#[tokio::test]
async fn tokens_are_not_interchangeable() {
    let h = harness(AuthPolicy::default());
    h.register("1234567890123", "joao123", "joao@example.com", "secret1")
        .await;

    let pair = h.authenticator.login("joao123", "secret1").await.unwrap();

    let as_access = h.guard.authenticate(&pair.refresh_token).await.unwrap_err();
    assert!(matches!(as_access, AuthError::Unauthenticated));

    let as_refresh = h
        .authenticator
        .refresh(&pair.access_token)
        .await
        .unwrap_err();
    assert!(matches!(as_refresh, AuthError::InvalidRefresh));
}

#[tokio::test]
async fn logout_revokes_and_is_idempotent() {
    let h = harness(AuthPolicy::default());
    h.register("1234567890123", "joao123", "joao@example.com", "secret1")
        .await;

    let pair = h.authenticator.login("joao123", "secret1").await.unwrap();

    h.authenticator.logout(&pair.refresh_token).await.unwrap();
    let after_logout = h
        .authenticator
        .refresh(&pair.refresh_token)
        .await
        .unwrap_err();
    assert!(matches!(after_logout, AuthError::InvalidRefresh));

    // Logging out again is a no-op success.
    h.authenticator.logout(&pair.refresh_token).await.unwrap();
}

#[tokio::test]
async fn deleted_identity_cannot_authenticate() {
    let h = harness(AuthPolicy::default());
    h.register("1234567890123", "joao123", "joao@example.com", "secret1")
        .await;

    let pair = h.authenticator.login("joao123", "secret1").await.unwrap();
    h.store.delete("1234567890123").await.unwrap();

    let gone = h.guard.authenticate(&pair.access_token).await.unwrap_err();
    assert!(matches!(gone, AuthError::Unauthenticated));
}

#[tokio::test]
async fn ownership_is_strict_ra_equality() {
    let h = harness(AuthPolicy::default());
    let a = h
        .register("1111111111111", "alpha", "a@example.com", "secret1")
        .await;
    let b = h
        .register("2222222222222", "beta", "b@example.com", "secret2")
        .await;

    assert!(h.guard.check_ownership(&a, &a.ra));
    assert!(h.guard.check_ownership(&b, &b.ra));
    assert!(!h.guard.check_ownership(&a, &b.ra));
    assert!(!h.guard.check_ownership(&b, &a.ra));
}

#[tokio::test]
async fn replayed_rotation_keeps_chain_alive_by_default() {
    let h = harness(AuthPolicy::default());
    h.register("1234567890123", "joao123", "joao@example.com", "secret1")
        .await;

    let first = h.authenticator.login("joao123", "secret1").await.unwrap();
    let second = h
        .authenticator
        .refresh(&first.refresh_token)
        .await
        .unwrap();

    assert!(h.authenticator.refresh(&first.refresh_token).await.is_err());
    // Without the replay policy the legitimate chain keeps working.
    assert!(h.authenticator.refresh(&second.refresh_token).await.is_ok());
}

#[tokio::test]
async fn replayed_rotation_revokes_chain_when_configured() {
    let h = harness(AuthPolicy {
        revoke_chain_on_replay: true,
        ..AuthPolicy::default()
    });
    h.register("1234567890123", "joao123", "joao@example.com", "secret1")
        .await;

    let first = h.authenticator.login("joao123", "secret1").await.unwrap();
    let second = h
        .authenticator
        .refresh(&first.refresh_token)
        .await
        .unwrap();

    // Replay of the rotated token fails and takes the chain with it.
    assert!(h.authenticator.refresh(&first.refresh_token).await.is_err());
    let after_replay = h
        .authenticator
        .refresh(&second.refresh_token)
        .await
        .unwrap_err();
    assert!(matches!(after_replay, AuthError::InvalidRefresh));
}
