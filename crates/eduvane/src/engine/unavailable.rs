use futures::stream::BoxStream;
use std::time::Duration;

use super::base::Engine;
use crate::errors::{EngineError, EngineResult};
use crate::models::context::SessionContext;
use crate::models::event::{AnalysisPhase, EngineEvent};
use crate::models::input::UnifiedInput;

pub const ENGINE_UNAVAILABLE_MESSAGE: &str = "AI ENGINE UNAVAILABLE: The Eduvane Intelligence Architecture requires the Python AI Engine to be connected. No reasoning is permitted in the TypeScript layer.";

pub const DEFAULT_LATENCY: Duration = Duration::from_millis(800);

/// Stands in for the intelligence engine while it is disconnected.
///
/// Acknowledges the request, waits out a transport latency window and then fails
/// explicitly. It never fabricates a response.
pub struct UnavailableEngine {
    latency: Duration,
}

impl Default for UnavailableEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl UnavailableEngine {
    pub fn new() -> Self {
        Self::with_latency(DEFAULT_LATENCY)
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

impl Engine for UnavailableEngine {
    fn execute(
        &self,
        input: UnifiedInput,
        context: SessionContext,
    ) -> BoxStream<'_, EngineResult<EngineEvent>> {
        tracing::debug!(
            chars = input.text.len(),
            has_attachment = input.attachment.is_some(),
            guest = context.is_guest(),
            "engine request received while disconnected"
        );

        let latency = self.latency;
        Box::pin(async_stream::stream! {
            yield Ok::<_, EngineError>(EngineEvent::PhaseUpdate {
                phase: AnalysisPhase::Processing,
            });

            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }

            yield Ok(EngineEvent::Error {
                message: ENGINE_UNAVAILABLE_MESSAGE.to_string(),
            });

            yield Ok(EngineEvent::PhaseUpdate {
                phase: AnalysisPhase::Error,
            });
        })
    }
}
