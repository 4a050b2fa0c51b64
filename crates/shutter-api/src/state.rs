//! Application state.
//!
//! Request handling is stateless: the state holds only the storage client,
//! the startup configuration, and the optional JWT validator. There is no
//! shared mutable state between requests.

use crate::auth::jwt_rs256::JwtServiceRs256;
use shutter_core::Config;
use shutter_storage::Storage;
use std::sync::Arc;

/// Main application state, constructed once at startup.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub config: Config,
    /// Present only when AUTH_ENABLED=true.
    pub jwt: Option<Arc<JwtServiceRs256>>,
    pub is_production: bool,
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
