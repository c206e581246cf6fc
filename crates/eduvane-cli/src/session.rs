use anyhow::Result;

use crate::prompt::{InputType, Prompt};
use eduvane::gateway::Gateway;
use eduvane::models::message::ChatMessage;
use eduvane::workspace::{ChatWorkspace, WorkspaceUpdate, WorkspaceView};

pub struct Session<'a> {
    workspace: ChatWorkspace,
    gateway: Box<dyn Gateway + 'a>,
    prompt: Box<dyn Prompt + 'a>,
}

impl<'a> Session<'a> {
    pub fn new(
        gateway: Box<dyn Gateway + 'a>,
        prompt: Box<dyn Prompt + 'a>,
        is_guest: bool,
    ) -> Self {
        Session {
            workspace: ChatWorkspace::new().with_guest(is_guest),
            gateway,
            prompt,
        }
    }

    #[cfg(test)]
    pub fn workspace(&self) -> &ChatWorkspace {
        &self.workspace
    }

    pub async fn start(&mut self) -> Result<()> {
        self.prompt.ready();

        loop {
            let input = self.prompt.get_input()?;
            match input.input_type {
                InputType::Message => {
                    if let Some(content) = input.content {
                        self.workspace.set_draft(content);
                    }
                }
                InputType::Reset => {
                    if let Err(e) = self.gateway.reset_session().await {
                        tracing::warn!("Failed to reset session: {:#}", e);
                    }
                    continue;
                }
                InputType::Exit => break,
                InputType::AskAgain => continue,
            }

            // The editor already resolved submit versus newline, so the draft goes straight
            // out. A blank draft is rejected by the workspace and we simply ask again.
            self.workspace
                .send(self.gateway.as_ref(), self.prompt.view())
                .await;
        }

        self.prompt.close();
        Ok(())
    }
}

/// Renders nothing; used when only the settled reply matters
struct QuietView;

impl WorkspaceView for QuietView {
    fn update(&mut self, update: WorkspaceUpdate<'_>) {
        tracing::trace!(?update, "workspace update");
    }
}

/// Send one message without a prompt and return the settled reply
pub async fn headless_turn(
    gateway: &dyn Gateway,
    text: String,
    is_guest: bool,
) -> Result<ChatMessage> {
    let mut workspace = ChatWorkspace::new().with_guest(is_guest);
    workspace.set_draft(text);

    if !workspace.send(gateway, &mut QuietView).await {
        anyhow::bail!("Nothing to send: the message is empty");
    }
    workspace
        .last_message()
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("The session produced no reply"))
}
