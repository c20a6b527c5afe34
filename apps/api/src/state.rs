use std::sync::Arc;

use crate::config::Config;
use crate::parser_client::ResumeParser;
use crate::storage::ObjectStorage;
use crate::store::{ProductStore, ResumeStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub products: Arc<dyn ProductStore>,
    pub resumes: Arc<dyn ResumeStore>,
    pub parser: Arc<dyn ResumeParser>,
    /// Decided once at startup; `Unavailable` only disables upload URLs.
    pub storage: ObjectStorage,
    pub config: Config,
}
