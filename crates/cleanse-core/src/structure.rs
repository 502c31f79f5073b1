//! Column identifier steps.

use std::collections::BTreeMap;

use cleanse_model::{CleanError, Result, StepOutcome, Table};

use crate::skip_missing_column;

/// Lowercase an identifier and turn each space into an underscore.
pub fn normalize_column_name(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

/// Normalize every column identifier.
///
/// Fails with [`CleanError::ColumnCollision`] before touching the table when
/// two identifiers normalize to the same name.
pub fn normalize_column_names(table: &mut Table) -> Result<StepOutcome> {
    let originals: Vec<String> = table
        .column_names()
        .into_iter()
        .map(str::to_string)
        .collect();
    let normalized: Vec<String> = originals
        .iter()
        .map(|name| normalize_column_name(name))
        .collect();

    let mut sources: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for (original, target) in originals.iter().zip(&normalized) {
        sources
            .entry(target.as_str())
            .or_default()
            .push(original.clone());
    }
    if let Some((target, sources)) = sources.into_iter().find(|(_, s)| s.len() > 1) {
        return Err(CleanError::ColumnCollision {
            target: target.to_string(),
            sources,
        });
    }

    let renamed = originals
        .iter()
        .zip(&normalized)
        .filter(|(before, after)| before != after)
        .count();
    table.set_column_names(normalized)?;
    tracing::debug!(renamed, "normalized column identifiers");
    Ok(StepOutcome::applied())
}

/// Rename `from` to `to` when `from` exists.
///
/// A missing source identifier is a skipped step, not an error. Renaming onto
/// another existing identifier fails with [`CleanError::ColumnCollision`].
pub fn rename_column(table: &mut Table, from: &str, to: &str) -> Result<StepOutcome> {
    let renamed = table
        .rename_column(from, to)
        .map_err(|_| CleanError::ColumnCollision {
            target: to.to_string(),
            sources: vec![from.to_string(), to.to_string()],
        })?;
    if renamed {
        Ok(StepOutcome::applied())
    } else {
        Ok(skip_missing_column("rename_column", from))
    }
}
