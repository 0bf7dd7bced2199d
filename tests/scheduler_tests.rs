//! Proactive refresh scheduler tests.
//!
//! All tests run with paused time; `tokio` auto-advances the clock while
//! every task is idle, so these finish instantly.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tradelog::auth::{
    AuthGateway, CredentialStore, MemoryCredentialStore, RefreshScheduler,
};
use tradelog::domain::Credential;
use tradelog::testkit::auth::{jwt_expiring_at, ScriptedRefresher};

fn fixture(
    refresher: ScriptedRefresher,
    access_token: String,
) -> (Arc<ScriptedRefresher>, Arc<MemoryCredentialStore>, RefreshScheduler) {
    let store = Arc::new(MemoryCredentialStore::with_credential(Credential::new(
        access_token,
        "refresh-token",
    )));
    let refresher = Arc::new(refresher);
    let gateway = Arc::new(AuthGateway::new(store.clone(), refresher.clone()));
    let scheduler = RefreshScheduler::new(gateway, store.clone())
        .with_lead(Duration::from_secs(30))
        .with_fallback_interval(Duration::from_secs(10));
    (refresher, store, scheduler)
}

#[tokio::test(start_paused = true)]
async fn fallback_interval_drives_refresh_for_opaque_tokens() {
    let (refresher, store, scheduler) =
        fixture(ScriptedRefresher::succeeding(), "opaque-token".into());

    scheduler.start();
    tokio::time::sleep(Duration::from_secs(11)).await;

    assert_eq!(refresher.calls(), 1);
    assert_eq!(store.load().unwrap().access_token, "refreshed-token-1");
    scheduler.stop();
}

#[tokio::test(start_paused = true)]
async fn token_expiry_minus_lead_sets_the_deadline() {
    let expiry = chrono::Utc::now() + chrono::Duration::seconds(100);
    let (refresher, _store, scheduler) =
        fixture(ScriptedRefresher::succeeding(), jwt_expiring_at(expiry));

    scheduler.start();
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(refresher.calls(), 0, "too early, deadline is expiry - lead");

    tokio::time::sleep(Duration::from_secs(15)).await;
    assert_eq!(refresher.calls(), 1);
    scheduler.stop();
}

#[tokio::test(start_paused = true)]
async fn start_is_idempotent() {
    let (refresher, _store, scheduler) =
        fixture(ScriptedRefresher::succeeding(), "opaque-token".into());

    scheduler.start();
    scheduler.start();
    tokio::time::sleep(Duration::from_secs(11)).await;

    assert_eq!(refresher.calls(), 1, "one loop, not two");
    scheduler.stop();
}

#[tokio::test(start_paused = true)]
async fn stop_cancels_and_start_rearms() {
    let (refresher, _store, scheduler) =
        fixture(ScriptedRefresher::succeeding(), "opaque-token".into());

    scheduler.start();
    scheduler.stop();
    assert!(!scheduler.is_running());
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(refresher.calls(), 0, "cancelled timer never fires");

    scheduler.start();
    assert!(scheduler.is_running());
    tokio::time::sleep(Duration::from_secs(11)).await;
    assert_eq!(refresher.calls(), 1);
    scheduler.stop();
}

#[tokio::test(start_paused = true)]
async fn refresh_failure_stops_the_loop_and_signals() {
    let store = Arc::new(MemoryCredentialStore::with_credential(Credential::new(
        "opaque-token",
        "refresh-token",
    )));
    let refresher = Arc::new(ScriptedRefresher::denying());
    let signals = Arc::new(AtomicUsize::new(0));
    let gateway = Arc::new(AuthGateway::new(store.clone(), refresher.clone()).on_unauthorized({
        let signals = Arc::clone(&signals);
        move || {
            signals.fetch_add(1, Ordering::SeqCst);
        }
    }));
    let scheduler = RefreshScheduler::new(gateway, store.clone())
        .with_fallback_interval(Duration::from_secs(10));

    scheduler.start();
    tokio::time::sleep(Duration::from_secs(11)).await;

    assert_eq!(refresher.calls(), 1);
    assert_eq!(signals.load(Ordering::SeqCst), 1);
    assert!(store.load().is_none(), "session cleared");

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(refresher.calls(), 1, "loop ended after the failure");
    assert!(!scheduler.is_running());
}

#[tokio::test(start_paused = true)]
async fn successful_refresh_reschedules_from_the_new_token() {
    let (refresher, _store, scheduler) =
        fixture(ScriptedRefresher::succeeding(), "opaque-token".into());

    scheduler.start();
    // refreshed tokens are opaque too, so each round uses the fallback
    tokio::time::sleep(Duration::from_secs(21)).await;
    assert_eq!(refresher.calls(), 2);
    scheduler.stop();
}
