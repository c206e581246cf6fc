use futures::stream::BoxStream;
use std::sync::{Arc, Mutex};

use super::base::Engine;
use crate::errors::EngineResult;
use crate::models::context::SessionContext;
use crate::models::event::EngineEvent;
use crate::models::input::UnifiedInput;

/// A mock engine that replays a pre-configured event script for testing
pub struct MockEngine {
    script: Vec<EngineResult<EngineEvent>>,
    contexts: Arc<Mutex<Vec<SessionContext>>>,
}

impl MockEngine {
    pub fn new(script: Vec<EngineResult<EngineEvent>>) -> Self {
        Self {
            script,
            contexts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle to the contexts the engine has been called with, in call order
    pub fn contexts(&self) -> Arc<Mutex<Vec<SessionContext>>> {
        Arc::clone(&self.contexts)
    }
}

impl Engine for MockEngine {
    fn execute(
        &self,
        _input: UnifiedInput,
        context: SessionContext,
    ) -> BoxStream<'_, EngineResult<EngineEvent>> {
        self.contexts.lock().unwrap().push(context);
        Box::pin(futures::stream::iter(self.script.clone()))
    }
}
