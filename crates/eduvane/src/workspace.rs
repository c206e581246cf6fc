use anyhow::Result;
use futures::StreamExt;

use crate::gateway::Gateway;
use crate::models::event::{AnalysisPhase, GatewayEvent};
use crate::models::input::UnifiedInput;
use crate::models::message::{ChatMessage, MessageKind};

pub const SYSTEM_ERROR_MESSAGE: &str = "System Error: Unable to reach Intelligence Layer.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    /// Shift or any other modifier held with the key
    pub modifier: bool,
}

impl KeyPress {
    pub fn enter() -> Self {
        KeyPress {
            key: Key::Enter,
            modifier: false,
        }
    }

    pub fn modified_enter() -> Self {
        KeyPress {
            key: Key::Enter,
            modifier: true,
        }
    }

    pub fn char(c: char) -> Self {
        KeyPress {
            key: Key::Char(c),
            modifier: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The draft should be sent
    Submit,
    /// The draft was edited in place
    Edited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    Idle,
    AwaitingSend,
    Streaming,
    Settled,
}

/// What changed in the workspace, delivered to a [`WorkspaceView`] after every mutation
#[derive(Debug)]
pub enum WorkspaceUpdate<'a> {
    Processing(bool),
    MessageAppended(&'a ChatMessage),
    Chunk {
        message: &'a ChatMessage,
        text: &'a str,
    },
    Finalized(&'a ChatMessage),
    Phase(AnalysisPhase),
}

/// Anything that renders a workspace. Views are expected to keep the newest message in sight.
pub trait WorkspaceView {
    fn update(&mut self, update: WorkspaceUpdate<'_>);
}

/// Result of applying one gateway event to the in-flight turn
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    Chunk(String),
    Finalized,
    Phase(AnalysisPhase),
    Ignored,
}

#[derive(Debug)]
struct ActiveTurn {
    index: usize,
    text: String,
    finalized: bool,
}

/// Local message state of one chat session.
///
/// One request is in flight at a time. Each turn appends the user's message and an
/// assistant placeholder, fills the placeholder from the event stream and settles it
/// exactly once, either when the stream is exhausted or on the first error.
#[derive(Debug, Default)]
pub struct ChatWorkspace {
    messages: Vec<ChatMessage>,
    draft: String,
    active: Option<ActiveTurn>,
    phase: Option<AnalysisPhase>,
    is_guest: bool,
}

impl ChatWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_guest(mut self, is_guest: bool) -> Self {
        self.is_guest = is_guest;
        self
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last_message(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft<S: Into<String>>(&mut self, text: S) {
        self.draft = text.into();
    }

    pub fn is_processing(&self) -> bool {
        self.active.is_some()
    }

    pub fn is_guest(&self) -> bool {
        self.is_guest
    }

    /// Last phase reported by the engine, if any
    pub fn phase(&self) -> Option<AnalysisPhase> {
        self.phase
    }

    /// Whether the send action is enabled
    pub fn can_send(&self) -> bool {
        !self.draft.trim().is_empty() && !self.is_processing()
    }

    pub fn state(&self) -> TurnState {
        if self.is_processing() {
            TurnState::Streaming
        } else if !self.draft.trim().is_empty() {
            TurnState::AwaitingSend
        } else if self.messages.is_empty() {
            TurnState::Idle
        } else {
            TurnState::Settled
        }
    }

    pub fn handle_key(&mut self, press: KeyPress) -> KeyOutcome {
        match press.key {
            Key::Enter if !press.modifier => KeyOutcome::Submit,
            Key::Enter => {
                self.draft.push('\n');
                KeyOutcome::Edited
            }
            Key::Char(c) => {
                self.draft.push(c);
                KeyOutcome::Edited
            }
        }
    }

    /// Open a turn from the current draft.
    ///
    /// Returns `None` without touching any state when the draft is blank or a request is
    /// already in flight.
    pub fn begin_turn(&mut self) -> Option<UnifiedInput> {
        if !self.can_send() {
            return None;
        }

        let text = std::mem::take(&mut self.draft);
        self.messages.push(ChatMessage::user(text.clone()));
        self.messages.push(ChatMessage::placeholder());
        self.active = Some(ActiveTurn {
            index: self.messages.len() - 1,
            text: String::new(),
            finalized: false,
        });

        Some(UnifiedInput::text(text))
    }

    pub fn apply_event(&mut self, event: GatewayEvent) -> Applied {
        let Some(turn) = self.active.as_mut() else {
            tracing::debug!(kind = event.kind(), "event outside of a turn ignored");
            return Applied::Ignored;
        };

        match event {
            GatewayEvent::PhaseUpdate { phase } => {
                self.phase = Some(phase);
                Applied::Phase(phase)
            }
            GatewayEvent::StreamChunk { text } => {
                if turn.finalized {
                    tracing::debug!("chunk after settlement ignored");
                    return Applied::Ignored;
                }
                turn.text.push_str(&text);
                self.messages[turn.index].content = turn.text.clone();
                Applied::Chunk(text)
            }
            GatewayEvent::Error { message } => {
                if turn.finalized {
                    tracing::debug!("error after settlement ignored");
                    return Applied::Ignored;
                }
                let placeholder = &mut self.messages[turn.index];
                placeholder.kind = MessageKind::Error;
                placeholder.content = message;
                placeholder.is_streaming = false;
                turn.finalized = true;
                Applied::Finalized
            }
            event @ (GatewayEvent::SubmissionComplete { .. }
            | GatewayEvent::FollowUp { .. }
            | GatewayEvent::TaskComplete) => {
                tracing::debug!(kind = event.kind(), "event has no effect on messages");
                Applied::Ignored
            }
        }
    }

    /// Settle the turn after the stream was exhausted.
    ///
    /// Returns true if this settled the placeholder.
    pub fn complete_turn(&mut self) -> bool {
        match self.active.take() {
            Some(turn) => self.settle(&turn),
            None => false,
        }
    }

    /// Settle the turn after the gateway call failed and report the failure in the chat
    pub fn fail_turn(&mut self, error: &anyhow::Error) -> bool {
        tracing::error!("gateway call failed: {:#}", error);
        let Some(turn) = self.active.take() else {
            return false;
        };
        let settled = self.settle(&turn);
        self.messages.push(ChatMessage::system_error(SYSTEM_ERROR_MESSAGE));
        settled
    }

    fn settle(&mut self, turn: &ActiveTurn) -> bool {
        if turn.finalized {
            return false;
        }
        self.messages[turn.index].is_streaming = false;
        true
    }

    /// Run one full turn: send the draft through the gateway and apply the streamed events.
    ///
    /// Returns false if the draft was rejected. Every failure ends in a rendered message
    /// and a re-enabled input.
    pub async fn send(&mut self, gateway: &dyn Gateway, view: &mut dyn WorkspaceView) -> bool {
        let Some(input) = self.begin_turn() else {
            return false;
        };

        view.update(WorkspaceUpdate::Processing(true));
        let len = self.messages.len();
        for message in &self.messages[len - 2..] {
            view.update(WorkspaceUpdate::MessageAppended(message));
        }

        let index = len - 1;
        match self.stream_turn(gateway, input, view).await {
            Ok(()) => {
                if self.complete_turn() {
                    view.update(WorkspaceUpdate::Finalized(&self.messages[index]));
                }
            }
            Err(e) => {
                if self.fail_turn(&e) {
                    view.update(WorkspaceUpdate::Finalized(&self.messages[index]));
                }
                if let Some(message) = self.messages.last() {
                    view.update(WorkspaceUpdate::MessageAppended(message));
                }
            }
        }

        view.update(WorkspaceUpdate::Processing(false));
        true
    }

    async fn stream_turn(
        &mut self,
        gateway: &dyn Gateway,
        input: UnifiedInput,
        view: &mut dyn WorkspaceView,
    ) -> Result<()> {
        let mut events = gateway.process_input(input, self.is_guest).await?;

        while let Some(event) = events.next().await {
            let event = event?;
            let index = self.active.as_ref().map(|turn| turn.index);

            match (self.apply_event(event), index) {
                (Applied::Chunk(text), Some(index)) => view.update(WorkspaceUpdate::Chunk {
                    message: &self.messages[index],
                    text: &text,
                }),
                (Applied::Finalized, Some(index)) => {
                    view.update(WorkspaceUpdate::Finalized(&self.messages[index]))
                }
                (Applied::Phase(phase), _) => view.update(WorkspaceUpdate::Phase(phase)),
                _ => {}
            }
        }

        Ok(())
    }
}
