//! Shared handler state.

use std::sync::Arc;

use souq_app::context::AppContext;

/// Services every handler reaches through the depot.
#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
}

impl State {
    /// Wrap the app context for injection into the router.
    #[must_use]
    pub(crate) fn from_app_context(app: AppContext) -> Arc<Self> {
        Arc::new(Self { app })
    }
}
