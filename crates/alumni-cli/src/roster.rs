// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use alumni_table::Cells;
use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct RosterFile {
    #[serde(default)]
    alumni: Vec<RosterEntry>,
}

#[derive(Debug, Deserialize)]
struct RosterEntry {
    sr_no: Option<Serial>,
    name: Option<String>,
    role: Option<String>,
    company: Option<String>,
    domain: Option<String>,
}

/// Serials are usually written as bare integers but may be any label.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Serial {
    Number(i64),
    Text(String),
}

impl Serial {
    fn into_cell(self) -> String {
        match self {
            Self::Number(value) => value.to_string(),
            Self::Text(value) => value,
        }
    }
}

pub fn load_roster(path: &Path) -> Result<Vec<Cells>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read roster file {}", path.display()))?;
    let cells = parse_roster(&raw).with_context(|| format!("parse roster {}", path.display()))?;
    debug!(path = %path.display(), rows = cells.len(), "loaded roster");
    Ok(cells)
}

fn parse_roster(raw: &str) -> Result<Vec<Cells>> {
    let file: RosterFile = toml::from_str(raw)?;
    file.alumni
        .into_iter()
        .enumerate()
        .map(|(index, entry)| entry_cells(index + 1, entry))
        .collect()
}

fn entry_cells(record: usize, entry: RosterEntry) -> Result<Cells> {
    let missing = |field: &str| anyhow!("alumni record {record} is missing `{field}`");
    Ok([
        entry.sr_no.ok_or_else(|| missing("sr_no"))?.into_cell(),
        entry.name.ok_or_else(|| missing("name"))?,
        entry.role.ok_or_else(|| missing("role"))?,
        entry.company.ok_or_else(|| missing("company"))?,
        entry.domain.ok_or_else(|| missing("domain"))?,
    ])
}
