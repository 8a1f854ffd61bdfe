// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use alumni_app::TabKind;
use alumni_tui::UiOptions;
use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const APP_NAME: &str = "alumni";
const CONFIG_VERSION: i64 = 1;
const DEFAULT_NOTICE_TIMEOUT: &str = "4s";
const DEFAULT_LOADING_DELAY: &str = "300ms";
const STARTUP_LOADING_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub data: Data,
    #[serde(default)]
    pub export: Export,
    #[serde(default)]
    pub ui: Ui,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            data: Data::default(),
            export: Export::default(),
            ui: Ui::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Data {
    pub roster_path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Export {
    pub dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ui {
    pub start_tab: Option<String>,
    pub notice_timeout: Option<String>,
    pub loading_delay: Option<String>,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            start_tab: Some(TabKind::Home.as_str().to_owned()),
            notice_timeout: Some(DEFAULT_NOTICE_TIMEOUT.to_owned()),
            loading_delay: Some(DEFAULT_LOADING_DELAY.to_owned()),
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("ALUMNI_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set ALUMNI_CONFIG_PATH to the config file")
        })?;

        let app_dir = config_root.join(APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} has no version; add `version = 1` and keep values under [data], [export], and [ui]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(tab) = &self.ui.start_tab
            && TabKind::parse(tab).is_none()
        {
            bail!(
                "ui.start_tab in {} must be one of home, directory, about; got {tab:?}",
                path.display()
            );
        }

        for (key, raw) in [
            ("ui.notice_timeout", &self.ui.notice_timeout),
            ("ui.loading_delay", &self.ui.loading_delay),
        ] {
            let Some(raw) = raw else {
                continue;
            };
            let parsed = parse_duration(raw).with_context(|| format!("{key} in {}", path.display()))?;
            if parsed <= Duration::ZERO {
                bail!("{key} in {} must be positive, got {raw}", path.display());
            }
        }

        if let Some(roster) = &self.data.roster_path
            && roster.trim().is_empty()
        {
            bail!(
                "data.roster_path in {} is empty; remove it or point it at a roster file",
                path.display()
            );
        }

        Ok(())
    }

    pub fn roster_path(&self) -> Option<PathBuf> {
        self.data.roster_path.as_deref().map(PathBuf::from)
    }

    /// `[export].dir`, then `ALUMNI_EXPORT_DIR`, then the platform download
    /// directory, then the working directory.
    pub fn export_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.export.dir {
            return Ok(PathBuf::from(dir));
        }
        if let Some(dir) = env::var_os("ALUMNI_EXPORT_DIR") {
            return Ok(PathBuf::from(dir));
        }
        if let Some(dir) = dirs::download_dir() {
            return Ok(dir);
        }
        env::current_dir().context(
            "resolve export directory; set [export].dir or ALUMNI_EXPORT_DIR to choose one",
        )
    }

    pub fn start_tab(&self) -> TabKind {
        self.ui
            .start_tab
            .as_deref()
            .and_then(TabKind::parse)
            .unwrap_or(TabKind::Home)
    }

    pub fn ui_options(&self) -> Result<UiOptions> {
        Ok(UiOptions {
            notice_timeout: parse_duration(
                self.ui
                    .notice_timeout
                    .as_deref()
                    .unwrap_or(DEFAULT_NOTICE_TIMEOUT),
            )?,
            loading_delay: parse_duration(
                self.ui
                    .loading_delay
                    .as_deref()
                    .unwrap_or(DEFAULT_LOADING_DELAY),
            )?,
            startup_delay: STARTUP_LOADING_DELAY,
        })
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# alumni config\n# Place this file at: {}\n\nversion = 1\n\n[data]\n# Roster of [[alumni]] tables with sr_no, name, role, company, domain\n# roster_path = \"/absolute/path/to/roster.toml\"\n\n[export]\n# Optional. Default is $ALUMNI_EXPORT_DIR, then the platform download dir\n# dir = \"/absolute/path/to/exports\"\n\n[ui]\nstart_tab = \"home\"\nnotice_timeout = \"{}\"\nloading_delay = \"{}\"\n",
            path.display(),
            DEFAULT_NOTICE_TIMEOUT,
            DEFAULT_LOADING_DELAY,
        )
    }
}

fn parse_duration(raw: &str) -> Result<Duration> {
    if let Some(value) = raw.strip_suffix("ms") {
        let millis: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        return Ok(Duration::from_millis(millis));
    }
    if let Some(value) = raw.strip_suffix('s') {
        let secs: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        return Ok(Duration::from_secs(secs));
    }
    if let Some(value) = raw.strip_suffix('m') {
        let mins: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        let Some(secs) = mins.checked_mul(60) else {
            bail!("invalid duration {raw:?}; {mins} minutes is out of range");
        };
        return Ok(Duration::from_secs(secs));
    }

    bail!("invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m (for example 300ms or 4s)")
}

#[cfg(test)]
mod tests {
    use super::{Config, parse_duration};
    use alumni_app::TabKind;
    use anyhow::Result;
    use crate::env_lock;
    use std::path::PathBuf;
    use std::time::Duration;

    fn write_config(content: &str) -> Result<(tempfile::TempDir, PathBuf)> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        std::fs::write(&path, content)?;
        Ok((temp, path))
    }

    #[test]
    fn missing_config_uses_defaults() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let config = Config::load(&temp.path().join("missing.toml"))?;
        assert_eq!(config.version, 1);
        assert_eq!(config.start_tab(), TabKind::Home);
        assert_eq!(config.roster_path(), None);
        let options = config.ui_options()?;
        assert_eq!(options.notice_timeout, Duration::from_secs(4));
        assert_eq!(options.loading_delay, Duration::from_millis(300));
        assert_eq!(options.startup_delay, Duration::from_millis(1000));
        Ok(())
    }

    #[test]
    fn unversioned_config_is_rejected_with_actionable_message() -> Result<()> {
        let (_temp, path) = write_config("[ui]\nstart_tab = \"about\"\n")?;
        let error = Config::load(&path).expect_err("unversioned config should fail");
        let message = error.to_string();
        assert!(message.contains("version = 1"));
        assert!(message.contains("[data], [export], and [ui]"));
        Ok(())
    }

    #[test]
    fn v1_config_parses() -> Result<()> {
        let (_temp, path) = write_config(
            "version = 1\n[data]\nroster_path = \"/srv/roster.toml\"\n[export]\ndir = \"/srv/out\"\n[ui]\nstart_tab = \"directory\"\nnotice_timeout = \"2s\"\nloading_delay = \"150ms\"\n",
        )?;

        let config = Config::load(&path)?;
        assert_eq!(config.roster_path(), Some(PathBuf::from("/srv/roster.toml")));
        assert_eq!(config.export_dir()?, PathBuf::from("/srv/out"));
        assert_eq!(config.start_tab(), TabKind::Directory);
        let options = config.ui_options()?;
        assert_eq!(options.notice_timeout, Duration::from_secs(2));
        assert_eq!(options.loading_delay, Duration::from_millis(150));
        Ok(())
    }

    #[test]
    fn malformed_config_returns_parse_error() -> Result<()> {
        let (_temp, path) = write_config("{{not toml")?;
        let error = Config::load(&path).expect_err("malformed config should fail");
        assert!(error.to_string().contains("parse TOML config"));
        Ok(())
    }

    #[test]
    fn unsupported_config_version_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 2\n")?;
        let error = Config::load(&path).expect_err("v2 config should fail");
        assert!(error.to_string().contains("unsupported config version 2"));
        Ok(())
    }

    #[test]
    fn unknown_start_tab_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[ui]\nstart_tab = \"dashboard\"\n")?;
        let error = Config::load(&path).expect_err("unknown tab should fail");
        let message = error.to_string();
        assert!(message.contains("ui.start_tab"), "unexpected message: {message}");
        assert!(message.contains("home, directory, about"));
        Ok(())
    }

    #[test]
    fn zero_durations_are_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[ui]\nnotice_timeout = \"0s\"\n")?;
        let error = Config::load(&path).expect_err("zero timeout should fail");
        assert!(error.to_string().contains("must be positive"));
        Ok(())
    }

    #[test]
    fn invalid_duration_names_the_key() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[ui]\nloading_delay = \"soon\"\n")?;
        let error = Config::load(&path).expect_err("bad duration should fail");
        let message = format!("{error:#}");
        assert!(message.contains("ui.loading_delay"), "unexpected message: {message}");
        assert!(message.contains("invalid duration"));
        Ok(())
    }

    #[test]
    fn empty_roster_path_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[data]\nroster_path = \"  \"\n")?;
        let error = Config::load(&path).expect_err("blank roster path should fail");
        assert!(error.to_string().contains("data.roster_path"));
        Ok(())
    }

    #[test]
    fn default_path_honors_env_override() -> Result<()> {
        let _guard = env_lock();
        let temp = tempfile::tempdir()?;
        let override_path = temp.path().join("custom-config.toml");
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("ALUMNI_CONFIG_PATH", &override_path);
        }
        let resolved = Config::default_path()?;
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("ALUMNI_CONFIG_PATH");
        }
        assert_eq!(resolved, override_path);
        Ok(())
    }

    #[test]
    fn export_dir_prefers_config_over_env_override() -> Result<()> {
        let _guard = env_lock();
        let (_temp, path) = write_config("version = 1\n[export]\ndir = \"/explicit/out\"\n")?;
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("ALUMNI_EXPORT_DIR", "/from/env");
        }
        let config = Config::load(&path)?;
        let resolved = config.export_dir();
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("ALUMNI_EXPORT_DIR");
        }
        assert_eq!(resolved?, PathBuf::from("/explicit/out"));
        Ok(())
    }

    #[test]
    fn export_dir_uses_env_override_when_config_missing() -> Result<()> {
        let _guard = env_lock();
        let (_temp, path) = write_config("version = 1\n")?;
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("ALUMNI_EXPORT_DIR", "/from/env-only");
        }
        let config = Config::load(&path)?;
        let resolved = config.export_dir();
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("ALUMNI_EXPORT_DIR");
        }
        assert_eq!(resolved?, PathBuf::from("/from/env-only"));
        Ok(())
    }

    #[test]
    fn durations_parse_ms_seconds_and_minutes() -> Result<()> {
        assert_eq!(parse_duration("500ms")?, Duration::from_millis(500));
        assert_eq!(parse_duration("5s")?, Duration::from_secs(5));
        assert_eq!(parse_duration("2m")?, Duration::from_secs(120));
        Ok(())
    }

    #[test]
    fn duration_rejects_minutes_that_overflow() {
        let error =
            parse_duration("307445734561825861m").expect_err("overflowing minutes should fail");
        assert!(error.to_string().contains("invalid duration"));
        assert_eq!(
            parse_duration("307445734561825860m").ok(),
            Some(Duration::from_secs(307_445_734_561_825_860 * 60))
        );
    }

    #[test]
    fn overflowing_config_duration_is_a_load_error() -> Result<()> {
        let (_temp, path) =
            write_config("version = 1\n[ui]\nnotice_timeout = \"307445734561825861m\"\n")?;
        let error = Config::load(&path).expect_err("overflowing timeout should fail");
        assert!(format!("{error:#}").contains("ui.notice_timeout"));
        Ok(())
    }

    #[test]
    fn duration_rejects_garbage() {
        let error = parse_duration("oops").expect_err("invalid duration should fail");
        assert!(error.to_string().contains("invalid duration"));
    }

    #[test]
    fn example_config_round_trips_through_loader() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        let example = Config::example_config(&path);
        assert!(example.contains("version = 1"));
        assert!(example.contains("[data]"));
        assert!(example.contains("[export]"));
        assert!(example.contains("[ui]"));

        std::fs::write(&path, &example)?;
        let config = Config::load(&path)?;
        assert_eq!(config.start_tab(), TabKind::Home);
        Ok(())
    }
}
