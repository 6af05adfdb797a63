//! Terminal styles for the drafthub CLI.
//!
//! Rendering code asks for a semantic style (`title`, `muted`, `heading`)
//! and never picks colors itself. The palette sticks to the basic ANSI colors
//! so it reads the same on light and dark terminals.
//!
//! `console` drops the escape codes when stdout is not a terminal, so piped
//! output is plain text.

use console::Style;

#[derive(Debug, Clone)]
pub struct Theme {
    pub title: Style,
    pub muted: Style,
    pub index: Style,
    pub info: Style,
    pub success: Style,
    pub warning: Style,
    pub error: Style,
    pub heading: Style,
    pub code: Style,
    pub link: Style,
    pub config_key: Style,
}

impl Theme {
    pub fn new() -> Self {
        let muted = Style::new().dim();
        Self {
            title: Style::new().bold(),
            index: Style::new().yellow(),
            info: muted.clone(),
            success: Style::new().green(),
            warning: Style::new().yellow().bold(),
            error: Style::new().red().bold(),
            heading: Style::new().cyan().bold(),
            code: Style::new().magenta(),
            link: Style::new().blue().underlined(),
            config_key: Style::new().cyan(),
            muted,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}
