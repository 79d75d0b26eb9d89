//! CLAUDE.md entry-point rendering.

use kit_blocks::{MarkerPair, wrap};
use kit_content::RuleDocument;

pub const ENTRY_FILE: &str = "CLAUDE.md";

pub const MARKERS: MarkerPair =
    MarkerPair::new("<!-- CLAUDE-RULES-START -->", "<!-- CLAUDE-RULES-END -->");

const NOTICE: &str = "> AUTO-GENERATED by rules-kit. Everything between the CLAUDE-RULES markers \
is replaced on every update. Keep your own notes outside them.";

/// Render the managed region, markers included.
///
/// Always-apply rules appear in the order given, each under its own heading,
/// followed by the docs catalog when one is available.
pub fn render_block(always_apply: &[RuleDocument], catalog: &str) -> String {
    let mut sections = vec![NOTICE.to_string()];

    for rule in always_apply {
        let body = rule.body.trim();
        if body.is_empty() {
            sections.push(format!("## {}", rule.meta.id));
        } else {
            sections.push(format!("## {}\n\n{}", rule.meta.id, body));
        }
    }

    let catalog = catalog.trim();
    if !catalog.is_empty() {
        sections.push(catalog.to_string());
    }

    wrap(MARKERS, &sections.join("\n\n"))
}

/// Render a complete entry-point document around the managed region.
pub fn render_document(always_apply: &[RuleDocument], catalog: &str) -> String {
    format!(
        "# Project Instructions\n\n\
         This file is read by Claude Code at the start of every session.\n\n{}\n",
        render_block(always_apply, catalog)
    )
}
