//! audio-prep CLI entry point

use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use audio_prep::audio::{distinct_sample_rates, get_sample_rate, is_same_sample_rate};
use audio_prep::config::{Cli, Command, Settings};
use audio_prep::files::{collect_audio_files, rename, rename_by_keyword, RenamePlan};
use audio_prep::{logging, PrepError, Result};

fn main() -> ExitCode {
    let cli = Cli::parse();

    logging::init_logging(cli.verbose, !cli.no_log_file);

    let mut settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Cannot load settings: {}", e);
            return ExitCode::FAILURE;
        }
    };
    cli.command.apply_overrides(&mut settings);

    let settings_file = cli.config.clone().or_else(Settings::default_path);
    match run(&cli.command, &settings, settings_file.as_deref()) {
        Ok(code) => code,
        Err(e) => {
            log::error!("{}", e);
            if e.is_missing_path() {
                log::info!("Check that every path given on the command line exists");
            }
            ExitCode::FAILURE
        }
    }
}

/// An explicit `--config` file must load; the default location falls back to defaults
fn load_settings(cli: &Cli) -> Result<Settings> {
    match cli.config.as_deref() {
        Some(path) if matches!(cli.command, Command::InitConfig { .. }) && !path.exists() => {
            Ok(Settings::default())
        }
        Some(path) => Settings::load_from(path),
        None => Ok(Settings::load()),
    }
}

fn run(command: &Command, settings: &Settings, settings_file: Option<&Path>) -> Result<ExitCode> {
    settings.validate()?;

    match command {
        Command::Rate(files) => {
            for path in files.resolve()? {
                println!("{}\t{}", path.display(), get_sample_rate(&path));
            }
        }
        Command::Resample { files, output, .. } => {
            let paths = files.resolve()?;
            let report = settings.resampler().resampling(
                &paths,
                output.as_deref(),
                settings.target_sample_rate,
            )?;
            for file in &report.converted {
                println!("{} -> {}", file.input.display(), file.output.display());
            }
        }
        Command::Check { files, .. } => {
            let paths = files.resolve()?;
            let target = settings.target_sample_rate;
            let unreadable = paths
                .iter()
                .filter(|path| !get_sample_rate(path).is_known())
                .count();
            if unreadable > 0 {
                log::warn!("{} of {} files have no readable sample rate", unreadable, paths.len());
            }
            if is_same_sample_rate(&paths, target) {
                println!("All {} files are at {} Hz", paths.len(), target);
            } else {
                let found: Vec<String> = distinct_sample_rates(&paths)
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                println!(
                    "Not uniform at {} Hz (found: {})",
                    target,
                    if found.is_empty() { "no files".to_string() } else { found.join(", ") }
                );
                return Ok(ExitCode::from(1));
            }
        }
        Command::Rename { from, to } => {
            rename(from, to)?;
        }
        Command::RenameKeyword { keyword, files } => {
            let paths = files.resolve()?;
            for (old, new) in paths.iter().zip(rename_by_keyword(&paths, keyword)?) {
                println!("{} -> {}", old.display(), new.display());
            }
        }
        Command::RenamePlan { plan, base } => {
            let mut loaded = RenamePlan::load(plan)?;
            if let Some(base) = base {
                loaded = loaded.resolved_against(base);
            }
            let count = loaded.apply()?;
            println!("Applied {} renames", count);
        }
        Command::List { dir, recursive } => {
            for path in collect_audio_files(dir, *recursive)? {
                println!("{}", path.display());
            }
        }
        Command::InitConfig { force } => {
            let path: PathBuf = settings_file
                .map(Path::to_path_buf)
                .ok_or_else(|| PrepError::Config("Could not determine config directory".to_string()))?;
            if path.exists() && !force {
                return Err(PrepError::Config(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )));
            }
            settings.save(&path)?;
            println!("Wrote {}", path.display());
        }
    }

    Ok(ExitCode::SUCCESS)
}
