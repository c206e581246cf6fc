use anyhow::Result;
use async_trait::async_trait;
use futures::stream::{BoxStream, StreamExt};
use std::sync::OnceLock;

use crate::engine::Engine;
use crate::models::context::SessionContext;
use crate::models::event::GatewayEvent;
use crate::models::input::UnifiedInput;
use crate::profile::ProfileStore;

pub const GATEWAY_ERROR_MESSAGE: &str = "Service Gateway Error.";

/// The seam between a chat workspace and whatever relays its requests to the engine
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn process_input(
        &self,
        input: UnifiedInput,
        is_guest: bool,
    ) -> Result<BoxStream<'_, Result<GatewayEvent>>>;

    async fn reset_session(&self) -> Result<()>;
}

/// Session context for the lifetime of one gateway, hydrated at most once.
#[derive(Debug, Default)]
pub struct SessionState {
    context: OnceLock<SessionContext>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_hydrated(&self) -> bool {
        self.context.get().is_some()
    }

    pub fn context(&self) -> Option<&SessionContext> {
        self.context.get()
    }
}

/// Gateway that forwards requests to an in-process engine.
///
/// It is transport and session control only: the engine decides everything about the
/// response, the gateway hydrates the session context and relays events verbatim.
pub struct SessionGateway {
    engine: Box<dyn Engine>,
    profiles: Box<dyn ProfileStore>,
    session: SessionState,
}

impl SessionGateway {
    pub fn new(
        engine: Box<dyn Engine>,
        profiles: Box<dyn ProfileStore>,
        session: SessionState,
    ) -> Self {
        Self {
            engine,
            profiles,
            session,
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Returns the session context, reading the profile store on the first call only.
    ///
    /// The first call decides the context for the rest of the session, so a session
    /// that starts as a guest stays anonymous.
    ///
    /// Runs on the polling task. `ProfileStore` is synchronous, so a file-backed store
    /// blocks the executor for one small read, once per session.
    fn hydrate(&self, is_guest: bool) -> SessionContext {
        self.session
            .context
            .get_or_init(|| {
                if is_guest {
                    tracing::debug!("guest session, skipping profile lookup");
                    return SessionContext::guest();
                }
                match self.profiles.get_user_profile() {
                    Some(profile) => {
                        tracing::debug!(role = ?profile.role, "hydrated session from profile");
                        SessionContext::from(profile)
                    }
                    None => SessionContext::guest(),
                }
            })
            .clone()
    }

    /// Forward an input to the engine and relay its events.
    ///
    /// Engine failures never reach the caller: the first one is logged and replaced by a
    /// single generic error event, which ends the stream.
    pub fn process_input(
        &self,
        input: UnifiedInput,
        is_guest: bool,
    ) -> BoxStream<'_, GatewayEvent> {
        Box::pin(async_stream::stream! {
            let context = self.hydrate(is_guest);
            let mut events = self.engine.execute(input, context);

            while let Some(event) = events.next().await {
                match event {
                    Ok(event) => {
                        let event = GatewayEvent::from(event);
                        tracing::debug!(kind = event.kind(), "relaying engine event");
                        yield event;
                    }
                    Err(e) => {
                        tracing::error!("Gateway error: {}", e);
                        yield GatewayEvent::error(GATEWAY_ERROR_MESSAGE);
                        break;
                    }
                }
            }
        })
    }

    /// The engine is stateless, so there is nothing to reset
    pub fn reset_session(&self) {
        tracing::debug!("session reset requested");
    }
}

#[async_trait]
impl Gateway for SessionGateway {
    async fn process_input(
        &self,
        input: UnifiedInput,
        is_guest: bool,
    ) -> Result<BoxStream<'_, Result<GatewayEvent>>> {
        let events =
            SessionGateway::process_input(self, input, is_guest).map(Ok::<_, anyhow::Error>);
        Ok(Box::pin(events))
    }

    async fn reset_session(&self) -> Result<()> {
        SessionGateway::reset_session(self);
        Ok(())
    }
}
