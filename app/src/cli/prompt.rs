//! Interactive confirmation and text input

use std::io::{self, BufRead, Write};

/// Asks the user before destructive operations
pub trait Confirm {
    /// Whether the user agreed to `prompt`
    fn confirm(&mut self, prompt: &str) -> bool;

    /// A line of text, or `None` if the user gave nothing
    fn ask(&mut self, prompt: &str) -> Option<String>;
}

/// Prompts on stderr and reads answers from stdin
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinPrompt {
    /// Skip confirmations, as `--yes` does
    pub assume_yes: bool,
}

impl StdinPrompt {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }

    fn read_line(prompt: &str) -> Option<String> {
        eprint!("{} ", prompt);
        io::stderr().flush().ok()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line).ok()?;
        let line = line.trim_end_matches(['\r', '\n']).to_string();
        (!line.is_empty()).then_some(line)
    }
}

impl Confirm for StdinPrompt {
    fn confirm(&mut self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        Self::read_line(&format!("{} [y/N]", prompt))
            .map(|answer| matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
            .unwrap_or(false)
    }

    fn ask(&mut self, prompt: &str) -> Option<String> {
        Self::read_line(prompt)
    }
}
