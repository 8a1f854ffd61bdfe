// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod roster;
mod runtime;

use alumni_app::{AppState, ColumnKey, SortDirection};
use alumni_table::{Table, TableOp};
use alumni_tui::AppRuntime;
use anyhow::{Context, Result, anyhow, bail};
use config::Config;
use runtime::{CliRuntime, DEMO_ROSTER_SIZE, DEMO_SEED, RosterSource};
use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `alumni --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;
    let ui_options = config.ui_options()?;
    let source = roster_source(&options, &config);
    let mut runtime = CliRuntime::new(source.clone(), config.export_dir()?);

    if options.check_only {
        if source != RosterSource::Unset {
            runtime.load_roster()?;
        }
        return Ok(());
    }

    let (log_path, _log_guard) = logging::init()?;
    info!(log = %log_path.display(), config = %options.config_path.display(), "alumni starting");

    if options.export_csv {
        return export_to_stdout(&mut runtime, &options);
    }

    let mut state = AppState {
        active_tab: config.start_tab(),
        ..AppState::default()
    };
    alumni_tui::run_app(&mut state, &mut runtime, ui_options)
}

fn roster_source(options: &CliOptions, config: &Config) -> RosterSource {
    if options.demo {
        return RosterSource::Demo {
            seed: DEMO_SEED,
            count: DEMO_ROSTER_SIZE,
        };
    }
    options
        .roster_path
        .clone()
        .or_else(|| config.roster_path())
        .map_or(RosterSource::Unset, RosterSource::File)
}

fn export_to_stdout(runtime: &mut CliRuntime, options: &CliOptions) -> Result<()> {
    let mut table = Table::new(runtime.load_roster()?);
    if let Some(query) = &options.query {
        table.apply_query(query);
    }
    if let Some((key, direction)) = options.sort {
        table.dispatch(TableOp::Sort { key, direction });
    }

    let payload = table.export_csv().context("export roster as CSV")?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(&payload).context("write CSV to stdout")?;
    stdout.flush().context("flush stdout")?;
    info!(rows = table.visible_count(), "exported roster to stdout");
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    roster_path: Option<PathBuf>,
    print_config_path: bool,
    print_example: bool,
    demo: bool,
    check_only: bool,
    export_csv: bool,
    query: Option<String>,
    sort: Option<(ColumnKey, SortDirection)>,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        roster_path: None,
        print_config_path: false,
        print_example: false,
        demo: false,
        check_only: false,
        export_csv: false,
        query: None,
        sort: None,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--roster" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--roster requires a file path"))?;
                options.roster_path = Some(PathBuf::from(value.as_ref()));
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--demo" => {
                options.demo = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--export-csv" => {
                options.export_csv = true;
            }
            "--query" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--query requires search text"))?;
                options.query = Some(value.as_ref().to_owned());
            }
            "--sort" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--sort requires a column key"))?;
                options.sort = Some(parse_sort_arg(value.as_ref())?);
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    if !options.export_csv && (options.query.is_some() || options.sort.is_some()) {
        bail!("--query and --sort only apply together with --export-csv");
    }

    Ok(options)
}

fn parse_sort_arg(raw: &str) -> Result<(ColumnKey, SortDirection)> {
    let (key, direction) = match raw.split_once(':') {
        Some((key, "asc")) => (key, SortDirection::Asc),
        Some((key, "desc")) => (key, SortDirection::Desc),
        Some((_, other)) => bail!("invalid sort direction {other:?}; use asc or desc"),
        None => (raw, SortDirection::Asc),
    };
    let key = ColumnKey::parse(key).ok_or_else(|| {
        anyhow!("unknown sort column {key:?}; use one of: sr-no, name, role, company, domain")
    })?;
    Ok((key, direction))
}

fn print_help() {
    println!("alumni");
    println!("  --config <path>          Use a specific config path");
    println!("  --roster <path>          Load alumni from a roster TOML file");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --demo                   Launch with a generated demo roster");
    println!("  --check                  Validate config + roster and exit");
    println!("  --export-csv             Print the roster as CSV and exit");
    println!("  --query <text>           With --export-csv: keep matching rows only");
    println!("  --sort <key>[:desc]      With --export-csv: sort by sr-no, name, role, company, domain");
    println!("  --help                   Show this help");
}

/// Serializes tests that touch process environment variables.
#[cfg(test)]
fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    use std::sync::{Mutex, OnceLock};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    match ENV_LOCK.get_or_init(|| Mutex::new(())).lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
