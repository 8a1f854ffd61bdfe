// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::roster;
use alumni_app::AuthPayload;
use alumni_table::Cells;
use alumni_testkit::AlumniFaker;
use anyhow::{Context, Result, bail};
use std::fs;
use std::path::PathBuf;
use tracing::info;

pub const DEMO_SEED: u64 = 42;
pub const DEMO_ROSTER_SIZE: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterSource {
    File(PathBuf),
    Demo { seed: u64, count: usize },
    Unset,
}

pub struct CliRuntime {
    roster: RosterSource,
    export_dir: PathBuf,
}

impl CliRuntime {
    pub fn new(roster: RosterSource, export_dir: PathBuf) -> Self {
        Self { roster, export_dir }
    }
}

impl alumni_tui::AppRuntime for CliRuntime {
    fn load_roster(&mut self) -> Result<Vec<Cells>> {
        match &self.roster {
            RosterSource::File(path) => roster::load_roster(path),
            RosterSource::Demo { seed, count } => {
                Ok(AlumniFaker::new(*seed).roster_cells(*count))
            }
            RosterSource::Unset => bail!(
                "no roster configured; pass --roster <path>, set [data].roster_path, or run with --demo"
            ),
        }
    }

    fn download(&mut self, file_name: &str, payload: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&self.export_dir).with_context(|| {
            format!(
                "create export directory {} -- set [export].dir or ALUMNI_EXPORT_DIR to change it",
                self.export_dir.display()
            )
        })?;
        let path = self.export_dir.join(file_name);
        fs::write(&path, payload).with_context(|| format!("write {}", path.display()))?;
        info!(path = %path.display(), bytes = payload.len(), "export written");
        Ok(path)
    }

    // No account backend exists yet; accepted submissions are only logged.
    fn submit_auth(&mut self, payload: &AuthPayload) -> Result<()> {
        payload.validate()?;
        info!(mode = payload.mode().as_str(), "auth form accepted");
        Ok(())
    }
}
