//! Save/restore of pending reminders
//!
//! One JSON record per line. The stream is self-delimited, so a crash that
//! truncates the final line costs exactly one record: everything before it
//! still loads.

use anyhow::{Context, Result};
use log::{info, warn};
use std::fs;
use std::io::Write;
use std::path::Path;

use super::entity::ReminderEntity;

/// Write every entity as one JSON line. Called during orderly shutdown.
pub fn save_all(path: &Path, entities: &[ReminderEntity]) -> Result<()> {
    if entities.is_empty() {
        // Nothing pending; don't leave a stale file for the next start.
        if path.exists() {
            fs::remove_file(path)
                .with_context(|| format!("failed to remove stale save file {}", path.display()))?;
        }
        return Ok(());
    }

    let mut file = fs::File::create(path)
        .with_context(|| format!("failed to create save file {}", path.display()))?;
    for entity in entities {
        let line = serde_json::to_string(entity).context("failed to serialize reminder")?;
        writeln!(file, "{line}")?;
    }
    file.flush()?;
    info!("saved {} pending reminder(s) to {}", entities.len(), path.display());
    Ok(())
}

/// Read back all records and delete the file.
///
/// A missing file yields an empty list. A corrupt or truncated record is
/// skipped with a warning; every well-formed record still loads.
pub fn load_all(path: &Path) -> Result<Vec<ReminderEntity>> {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(e).with_context(|| format!("failed to read save file {}", path.display()))
        }
    };

    let mut entities = Vec::new();
    for (number, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<ReminderEntity>(line) {
            Ok(entity) => entities.push(entity),
            Err(e) => {
                warn!(
                    "skipping corrupt reminder record on line {} of {}: {e}",
                    number + 1,
                    path.display()
                );
            }
        }
    }

    // Records are rescheduled by the caller; the file has served its
    // purpose and a later shutdown rewrites it from live state.
    fs::remove_file(path)
        .with_context(|| format!("failed to remove consumed save file {}", path.display()))?;

    info!("loaded {} saved reminder(s) from {}", entities.len(), path.display());
    Ok(entities)
}
