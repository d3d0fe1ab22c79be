use anyhow::{Context, Result};
use std::path::Path;

use crate::models::Action;

/// Write the fetched actions to a CSV file, newest first as rendered.
/// Returns the number of data rows written.
pub(crate) fn actions_to_csv(path: &Path, actions: &[Action]) -> Result<usize> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    writer.write_record([
        "ts",
        "type",
        "amount_cents",
        "isbn",
        "book_title",
        "book_authors",
        "note",
    ])?;

    for action in actions {
        let amount = action
            .amount_cents
            .map(|cents| cents.to_string())
            .unwrap_or_default();
        let authors = action.book_authors.join("; ");
        writer.write_record([
            action.ts.as_str(),
            action.kind.as_str(),
            amount.as_str(),
            action.isbn.as_deref().unwrap_or(""),
            action.book_title.as_deref().unwrap_or(""),
            authors.as_str(),
            action.note.as_deref().unwrap_or(""),
        ])?;
    }

    writer.flush()?;
    Ok(actions.len())
}
