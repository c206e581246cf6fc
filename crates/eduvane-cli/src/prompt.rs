use anyhow::Result;
use eduvane::workspace::WorkspaceView;

pub mod rustyline;
pub mod thinking;

pub trait Prompt: WorkspaceView {
    fn get_input(&mut self) -> Result<Input>;
    fn show_busy(&mut self);
    fn hide_busy(&mut self);
    fn close(&self);
    /// The prompt doubles as the view the workspace renders through
    fn view(&mut self) -> &mut dyn WorkspaceView;
    fn ready(&self) {
        println!();
        println!("Eduvane is ready. Describe a topic, e.g. 'Linear equations for Grade 10'.");
        println!();
    }
}

pub struct Input {
    pub input_type: InputType,
    pub content: Option<String>, // Only set for messages
}

pub enum InputType {
    AskAgain, // Ask the user for input again. Control flow command.
    Message,  // User sent a message
    Reset,    // User asked for a fresh session
    Exit,     // User wants to exit the session
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn bat_theme(&self) -> &'static str {
        match self {
            Theme::Light => "GitHub",
            Theme::Dark => "zenburn",
        }
    }
}

pub fn render_markdown(content: &str, theme: Theme) {
    let printed = bat::PrettyPrinter::new()
        .input(bat::Input::from_bytes(content.as_bytes()))
        .theme(theme.bat_theme())
        .language("Markdown")
        .wrapping_mode(bat::WrappingMode::Character)
        .print();
    if let Err(e) = printed {
        tracing::warn!("falling back to plain output: {}", e);
        println!("{}", content);
    }
}

pub fn render_error(content: &str) {
    println!("{}", console::style(content).red());
}
