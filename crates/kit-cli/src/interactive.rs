//! Interactive prompts for CLI commands
//!
//! Uses dialoguer for terminal-based selection and confirmation.

use async_trait::async_trait;
use dialoguer::{Confirm, Select};
use kit_core::Prompter;

/// Asks on the terminal. Prompt failures (no TTY, interrupted input) count
/// as a cancel.
#[derive(Debug, Default, Clone, Copy)]
pub struct DialoguerPrompter;

#[async_trait]
impl Prompter for DialoguerPrompter {
    async fn select(&self, prompt: &str, choices: &[String]) -> Option<usize> {
        let prompt = prompt.to_string();
        let choices = choices.to_vec();
        tokio::task::spawn_blocking(move || {
            Select::new()
                .with_prompt(prompt)
                .items(&choices)
                .default(0)
                .interact_opt()
        })
        .await
        .ok()
        .and_then(|answer| {
            answer
                .inspect_err(|e| tracing::debug!(error = %e, "Selection prompt failed"))
                .ok()
                .flatten()
        })
    }

    async fn confirm(&self, prompt: &str) -> bool {
        let prompt = prompt.to_string();
        tokio::task::spawn_blocking(move || {
            Confirm::new()
                .with_prompt(prompt)
                .default(false)
                .interact()
        })
        .await
        .ok()
        .and_then(|answer| {
            answer
                .inspect_err(|e| tracing::debug!(error = %e, "Confirmation prompt failed"))
                .ok()
        })
        .unwrap_or(false)
    }
}
