//! HTTP API and push transports

mod assets;
mod handlers;
mod sse;
mod types;
mod ws;

pub use handlers::create_router;
pub use types::*;

use crate::broadcast::Broadcaster;
use crate::store::{ProductionStore, Store};
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ProductionStore>,
    pub broadcaster: Arc<Broadcaster>,
}

impl AppState {
    /// State seeded with the demo dataset, publishing to a fresh broadcaster
    #[must_use]
    pub fn new() -> Self {
        let broadcaster = Arc::new(Broadcaster::new());
        Self {
            store: Arc::new(Store::seeded(Arc::clone(&broadcaster))),
            broadcaster,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
