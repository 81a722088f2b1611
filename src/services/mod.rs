// src/services/mod.rs
pub mod aggregate;
pub mod metrics;
pub mod presentation;
pub mod store;
pub mod transform;

use store::SeriesStore;
use transform::ViewConfig;

/// Immutable per-process context: the six loaded series plus the view
/// configuration. Built once at startup and injected into every handler;
/// request handling only ever reads it.
pub struct AppContext {
    pub store: SeriesStore,
    pub view: ViewConfig,
}

impl AppContext {
    pub fn new(store: SeriesStore, view: ViewConfig) -> Self {
        AppContext { store, view }
    }
}
