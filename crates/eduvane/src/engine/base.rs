use futures::stream::BoxStream;

use crate::errors::EngineResult;
use crate::models::context::SessionContext;
use crate::models::event::EngineEvent;
use crate::models::input::UnifiedInput;

/// Boundary to the intelligence engine.
///
/// An engine accepts a request and the session context it was made in, and answers
/// with a lazily produced, finite stream of lifecycle and content events. Engines own
/// all reasoning; nothing on this side of the boundary interprets the input.
pub trait Engine: Send + Sync {
    fn execute(
        &self,
        input: UnifiedInput,
        context: SessionContext,
    ) -> BoxStream<'_, EngineResult<EngineEvent>>;
}
