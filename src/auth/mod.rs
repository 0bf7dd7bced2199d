//! Authenticated-request pipeline: credential storage, the refresh
//! gateway, and the proactive refresh scheduler.

mod gateway;
mod scheduler;
mod store;

pub use gateway::{
    AuthGateway, AuthStatus, RefreshError, TokenRefresher, DEFAULT_UNAUTHORIZED_DEBOUNCE,
};
pub use scheduler::{RefreshScheduler, DEFAULT_FALLBACK_INTERVAL, DEFAULT_REFRESH_LEAD};
pub use store::{CredentialStore, FileCredentialStore, MemoryCredentialStore, StoreError};
