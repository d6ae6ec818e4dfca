use std::path::Path;

use anyhow::{anyhow, Context, Result};

use storyreel_core::story::{MediaKind, StoryDeck};
use storyreel_tui::media;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    pub store_id: String,
    pub item_id: String,
    pub message: String,
}

pub fn run(deck_path: &Path) -> Result<()> {
    let deck = StoryDeck::load(deck_path)
        .with_context(|| format!("Failed to load deck {}", deck_path.display()))?;

    let findings = inspect(&deck);
    for finding in &findings {
        let label = match finding.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        println!(
            "  {}: {}/{}: {}",
            label, finding.store_id, finding.item_id, finding.message
        );
    }

    let errors = findings
        .iter()
        .filter(|f| f.severity == Severity::Error)
        .count();
    if errors > 0 {
        return Err(anyhow!("{} problem(s) found in {}", errors, deck_path.display()));
    }

    println!(
        "{}: {} stores, {} stories OK",
        deck_path.display(),
        deck.len(),
        deck.item_count()
    );
    Ok(())
}

/// Problems that would make playback skip or misbehave
pub fn inspect(deck: &StoryDeck) -> Vec<Finding> {
    let mut findings = Vec::new();

    for collection in deck.collections() {
        for item in &collection.items {
            let mut report = |severity, message: String| {
                findings.push(Finding {
                    severity,
                    store_id: collection.store_id.clone(),
                    item_id: item.id.clone(),
                    message,
                });
            };

            if item.duration_ms == Some(0) {
                report(
                    Severity::Warning,
                    "zero duration, the default will be used".to_string(),
                );
            }

            if item.source.contains("://") {
                report(
                    Severity::Warning,
                    format!("remote media is skipped by the terminal viewer: {}", item.source),
                );
                continue;
            }
            if !Path::new(&item.source).exists() {
                report(Severity::Error, format!("media not found: {}", item.source));
                continue;
            }
            if item.kind == MediaKind::Image {
                if let Err(e) = media::decode(&item.source) {
                    report(Severity::Error, format!("image does not decode: {}", e));
                }
            }
        }
    }

    findings
}
