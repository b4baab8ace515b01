pub mod fight;
pub mod stats;

use std::path::Path;

use arena_core::{CombatantRecord, CombatantSnapshot, Ingested, Lexicon};
use colored::Colorize;

/// Load the lexicon, or an empty one when no path is given.
fn load_lexicon(path: Option<&Path>) -> Result<Lexicon, String> {
    match path {
        Some(path) => Lexicon::from_path(path).map_err(|e| e.to_string()),
        None => Ok(Lexicon::new()),
    }
}

/// Read and ingest a combatant snapshot.
fn ingest(path: &Path, lexicon: &Lexicon) -> Result<Ingested<CombatantRecord>, String> {
    let snapshot = CombatantSnapshot::from_path(path).map_err(|e| e.to_string())?;
    Ok(snapshot.ingest(lexicon))
}

/// Ingest a combatant, printing any substitutions to stderr.
fn load_combatant(path: &Path, lexicon: &Lexicon) -> Result<CombatantRecord, String> {
    let ingested = ingest(path, lexicon)?;
    for substitution in &ingested.substitutions {
        eprintln!(
            "  {} {}: {substitution}",
            "warning:".yellow(),
            ingested.value.name
        );
    }
    Ok(ingested.into_value())
}
