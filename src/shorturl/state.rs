use std::sync::Arc;

use crate::shorturl::database::UrlStore;

/// Application state shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    pub store: UrlStore,
    /// Prefix for `short_url` in responses; `None` yields relative links
    pub public_base_url: Option<Arc<str>>,
}

impl AppState {
    pub fn new(store: UrlStore, public_base_url: Option<String>) -> Self {
        AppState {
            store,
            public_base_url: public_base_url.map(Arc::from),
        }
    }

    /// Builds the public address of a short ID
    pub fn short_url(&self, short_id: &str) -> String {
        match &self.public_base_url {
            Some(base) => format!("{}/{}", base, short_id),
            None => format!("/{}", short_id),
        }
    }
}
