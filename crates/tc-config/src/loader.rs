//! CSV override loader.
//!
//! # CSV format
//!
//! One row per override.  Keys must already be registered; values are parsed
//! according to the registered default's type.
//!
//! ```csv
//! subsystem,name,team,value
//! attacker,switch_to_kick_dist,,1800
//! keeper,ball_danger_zone,default,300
//! keeper,ball_danger_zone,blue,450
//! ```
//!
//! **`team`** field:
//!
//! | Value              | Meaning                                  |
//! |--------------------|------------------------------------------|
//! | empty / `default`  | `OverrideScope::Default`                 |
//! | `yellow` / `blue`  | `OverrideScope::Team(color)`             |
//!
//! Rows are applied in file order, so a later row for the same scope and key
//! wins.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tc_core::TeamColor;

use crate::{ConfigError, ConfigResult, OverrideScope, TunableRegistry};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct OverrideRecord {
    subsystem: String,
    name:      String,
    #[serde(default)]
    team:      String,
    value:     String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Apply every override in the CSV file at `path` to `registry`.
///
/// Returns the number of rows applied.
pub fn load_overrides_csv(path: &Path, registry: &mut TunableRegistry) -> ConfigResult<usize> {
    let file = std::fs::File::open(path).map_err(ConfigError::Io)?;
    load_overrides_reader(file, registry)
}

/// Like [`load_overrides_csv`] but accepts any `Read` source.
pub fn load_overrides_reader<R: Read>(
    reader:   R,
    registry: &mut TunableRegistry,
) -> ConfigResult<usize> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut applied = 0usize;

    for result in csv_reader.deserialize::<OverrideRecord>() {
        let row = result.map_err(|e| ConfigError::Parse(e.to_string()))?;

        let key = registry
            .find_key(&row.subsystem, &row.name)
            .ok_or_else(|| ConfigError::UnknownKey {
                subsystem: row.subsystem.clone(),
                name:      row.name.clone(),
            })?;
        let default = registry.default_of(&key).ok_or_else(|| ConfigError::UnknownKey {
            subsystem: row.subsystem.clone(),
            name:      row.name.clone(),
        })?;

        let scope = parse_scope(&row.team)?;
        let value = default.parse_like(&row.value)?;
        registry.set_override(scope, key, value)?;
        applied += 1;
    }

    Ok(applied)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_scope(s: &str) -> ConfigResult<OverrideScope> {
    match s.trim() {
        "" | "default" => Ok(OverrideScope::Default),
        other => other
            .parse::<TeamColor>()
            .map(OverrideScope::Team)
            .map_err(|_| {
                ConfigError::Parse(format!(
                    "invalid team {other:?}: expected \"default\", \"yellow\", or \"blue\""
                ))
            }),
    }
}
