//! User interaction seam

use async_trait::async_trait;

/// Asks the user questions during an operation.
#[async_trait]
pub trait Prompter: Send + Sync {
    /// Pick one of `choices`; `None` when the user cancels.
    async fn select(&self, prompt: &str, choices: &[String]) -> Option<usize>;

    /// Yes or no.
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Answers every question the same way. For non-interactive runs.
#[derive(Debug, Clone, Copy)]
pub struct FixedPrompter {
    pub selection: Option<usize>,
    pub confirm: bool,
}

impl FixedPrompter {
    /// Declines everything.
    pub fn decline() -> Self {
        Self {
            selection: None,
            confirm: false,
        }
    }

    /// Picks the first choice and confirms.
    pub fn accept() -> Self {
        Self {
            selection: Some(0),
            confirm: true,
        }
    }
}

#[async_trait]
impl Prompter for FixedPrompter {
    async fn select(&self, _prompt: &str, choices: &[String]) -> Option<usize> {
        self.selection.filter(|&i| i < choices.len())
    }

    async fn confirm(&self, _prompt: &str) -> bool {
        self.confirm
    }
}
