use eduvane::engine::UnavailableEngine;
use eduvane::gateway::{SessionGateway, SessionState};
use eduvane::profile::{FileProfileStore, NoProfileStore, ProfileStore};
use std::sync::Arc;

use crate::configuration::Settings;

/// Shared application state. One gateway, and so one session context, per process.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<SessionGateway>,
}

impl AppState {
    pub fn new(gateway: SessionGateway) -> Self {
        Self {
            gateway: Arc::new(gateway),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let engine = UnavailableEngine::with_latency(settings.engine.latency());
        Self::new(SessionGateway::new(
            Box::new(engine),
            profile_store(settings),
            SessionState::new(),
        ))
    }
}

fn profile_store(settings: &Settings) -> Box<dyn ProfileStore> {
    if settings.profile.disabled {
        return Box::new(NoProfileStore);
    }
    match &settings.profile.path {
        Some(path) => Box::new(FileProfileStore::new(path)),
        None => match FileProfileStore::from_default_location() {
            Ok(store) => Box::new(store),
            Err(e) => {
                tracing::warn!("No profile store available, serving guests only: {}", e);
                Box::new(NoProfileStore)
            }
        },
    }
}
