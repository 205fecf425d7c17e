//! Auth service tests against the in-memory store and a real Argon2 hasher.

use std::sync::Arc;

use futures::future::join_all;

use account_api::config::HashCost;
use account_api::domain::{Argon2Hasher, Credentials, Registration};
use account_api::errors::ErrorKind;
use account_api::infra::{MemoryUserStore, UserRepository};
use account_api::services::{AuthService, Authenticator};

fn setup() -> (Arc<MemoryUserStore>, Arc<Authenticator>) {
    let users = Arc::new(MemoryUserStore::new());
    let hasher = Arc::new(
        Argon2Hasher::new(HashCost {
            memory_kib: 256,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap(),
    );
    let service = Arc::new(Authenticator::new(users.clone(), hasher));
    (users, service)
}

fn registration(email: &str, password: &str) -> Registration {
    Registration {
        username: "alice".to_string(),
        email: email.to_string(),
        password: password.to_string(),
        confirm: password.to_string(),
    }
}

fn credentials(email: &str, password: &str) -> Credentials {
    Credentials {
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn test_registered_password_round_trips() {
    let (_, service) = setup();

    for (i, password) in ["p", "secret1", "pässwörd", "with spaces "].iter().enumerate() {
        let email = format!("user{}@x.com", i);
        service.register(registration(&email, password)).await.unwrap();

        let user = service.login(credentials(&email, password)).await.unwrap();
        assert_eq!(user.email, email);

        let wrong = format!("{}x", password);
        let err = service.login(credentials(&email, &wrong)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Auth);
    }
}

#[tokio::test]
async fn test_stored_digest_is_not_plaintext() {
    let (users, service) = setup();
    service
        .register(registration("a@x.com", "secret1"))
        .await
        .unwrap();

    let stored = users.find_by_email("a@x.com").await.unwrap().unwrap();
    assert_ne!(stored.password_hash.as_str(), "secret1");
    assert!(stored.password_hash.as_str().starts_with("$argon2id$"));
    assert!(!format!("{:?}", stored).contains("$argon2id$"));
}

#[tokio::test]
async fn test_second_registration_conflicts() {
    let (users, service) = setup();

    service
        .register(registration("a@x.com", "secret1"))
        .await
        .unwrap();
    let err = service
        .register(registration("a@x.com", "other-password"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(users.len().await, 1);

    // First registration is untouched
    assert!(service.login(credentials("a@x.com", "secret1")).await.is_ok());
}

#[tokio::test]
async fn test_rejected_registrations_store_nothing() {
    let (users, service) = setup();

    let mut mismatch = registration("a@x.com", "secret1");
    mismatch.confirm = "secret2".to_string();
    let mut missing = registration("a@x.com", "secret1");
    missing.username.clear();

    for input in [mismatch, missing, Registration::default()] {
        let err = service.register(input).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    assert!(users.is_empty().await);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_registrations_single_winner() {
    let (users, service) = setup();

    let attempts = (0..8).map(|_| {
        let service = service.clone();
        tokio::spawn(async move { service.register(registration("a@x.com", "secret1")).await })
    });
    let results: Vec<_> = join_all(attempts)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    let created = results.iter().filter(|r| r.is_ok()).count();
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(e) if e.kind() == ErrorKind::Conflict))
        .count();

    assert_eq!(created, 1);
    assert_eq!(conflicts, 7);
    assert_eq!(users.len().await, 1);
}

#[tokio::test]
async fn test_unknown_email_and_wrong_password_indistinguishable() {
    let (_, service) = setup();
    service
        .register(registration("a@x.com", "secret1"))
        .await
        .unwrap();

    let wrong = service
        .login(credentials("a@x.com", "wrong"))
        .await
        .unwrap_err();
    let unknown = service
        .login(credentials("nobody@x.com", "secret1"))
        .await
        .unwrap_err();

    assert_eq!(wrong.kind(), unknown.kind());
    assert_eq!(wrong.to_string(), unknown.to_string());
    assert_eq!(wrong.status(), unknown.status());
}
