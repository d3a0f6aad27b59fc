//! Shared service state.

use std::sync::Arc;

use aid_verify::AgentVerifier;

/// State handed to every route handler.
///
/// The verifier is constructed once at startup and injected here; the
/// service holds no other state, so handlers stay as stateless as the
/// engine they wrap.
#[derive(Clone)]
pub struct AppState {
    pub verifier: Arc<AgentVerifier>,
}

impl AppState {
    pub fn new(verifier: AgentVerifier) -> Self {
        Self {
            verifier: Arc::new(verifier),
        }
    }
}
