use std::io::{self, Write};

use ::rustyline::error::ReadlineError;
use ::rustyline::{Cmd, DefaultEditor, KeyCode, KeyEvent, Modifiers};
use anyhow::Result;
use cliclack::spinner;
use eduvane::workspace::{WorkspaceUpdate, WorkspaceView};

use super::thinking::get_random_thinking_message;
use super::{render_error, Input, InputType, Prompt};

const PROMPT: &str = "\x1b[1m\x1b[38;5;30m(edu)> \x1b[0m";

pub struct RustylinePrompt {
    editor: DefaultEditor,
    spinner: Option<cliclack::ProgressBar>,
}

impl RustylinePrompt {
    pub fn new() -> Result<Self> {
        let mut editor = DefaultEditor::new()?;
        // Enter submits, Alt-Enter continues the message on a new line
        editor.bind_sequence(KeyEvent(KeyCode::Enter, Modifiers::ALT), Cmd::Newline);

        Ok(RustylinePrompt {
            editor,
            spinner: None,
        })
    }
}

fn print_help() {
    println!("Commands:");
    println!("/exit | /quit - Exit the session");
    println!("/reset - Start a fresh session");
    println!("/? | /help - Display this help message");
    println!("Alt+Enter - Continue your message on a new line");
}

fn flush() {
    if let Err(e) = io::stdout().flush() {
        tracing::warn!("Failed to flush stdout: {}", e);
    }
}

impl WorkspaceView for RustylinePrompt {
    fn update(&mut self, update: WorkspaceUpdate<'_>) {
        match update {
            WorkspaceUpdate::Processing(true) => self.show_busy(),
            WorkspaceUpdate::Processing(false) => self.hide_busy(),
            WorkspaceUpdate::MessageAppended(message) => {
                // The user's own text and the empty placeholder are already on screen
                if message.is_error() {
                    self.hide_busy();
                    render_error(&message.content);
                }
            }
            WorkspaceUpdate::Chunk { text, .. } => {
                self.hide_busy();
                print!("{}", text);
                flush();
            }
            WorkspaceUpdate::Finalized(message) => {
                self.hide_busy();
                if message.is_error() {
                    render_error(&message.content);
                } else {
                    println!();
                }
                println!();
            }
            WorkspaceUpdate::Phase(phase) => tracing::debug!(?phase, "engine phase"),
        }
    }
}

impl Prompt for RustylinePrompt {
    fn show_busy(&mut self) {
        let spinner = spinner();
        spinner.start(format!("{}...", get_random_thinking_message()));
        self.spinner = Some(spinner);
    }

    fn hide_busy(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.stop("");
        }
    }

    fn get_input(&mut self) -> Result<Input> {
        let message_text = match self.editor.readline(PROMPT) {
            Ok(text) => text,
            Err(e) => {
                match e {
                    ReadlineError::Interrupted | ReadlineError::Eof => (),
                    _ => eprintln!("Input error: {}", e),
                }
                return Ok(Input {
                    input_type: InputType::Exit,
                    content: None,
                });
            }
        };
        let command = message_text.trim();

        if command.eq_ignore_ascii_case("/exit") || command.eq_ignore_ascii_case("/quit") {
            Ok(Input {
                input_type: InputType::Exit,
                content: None,
            })
        } else if command.eq_ignore_ascii_case("/reset") {
            Ok(Input {
                input_type: InputType::Reset,
                content: None,
            })
        } else if command.eq_ignore_ascii_case("/?") || command.eq_ignore_ascii_case("/help") {
            print_help();
            Ok(Input {
                input_type: InputType::AskAgain,
                content: None,
            })
        } else {
            if !command.is_empty() {
                if let Err(e) = self.editor.add_history_entry(message_text.as_str()) {
                    tracing::debug!("Failed to record history entry: {}", e);
                }
            }
            Ok(Input {
                input_type: InputType::Message,
                content: Some(message_text),
            })
        }
    }

    fn close(&self) {
        // No cleanup required
    }

    fn view(&mut self) -> &mut dyn WorkspaceView {
        self
    }
}
