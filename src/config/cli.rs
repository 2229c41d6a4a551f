//! CLI argument parsing

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use super::Settings;
use crate::conversion::Backend;
use crate::error::Result;
use crate::files::collect_audio_files;

/// audio-prep - prepare short audio recordings for a classification dataset
///
/// Reads sample rates, resamples batches with sox or ffmpeg, checks that a
/// batch shares one rate, and renames files in bulk.
#[derive(Parser, Debug)]
#[command(name = "audio-prep")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Settings file (defaults to <config dir>/audio-prep/settings.json)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Show debug output in the terminal
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Do not write a log file
    #[arg(long, global = true)]
    pub no_log_file: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the sample rate of each file
    Rate(FileArgs),

    /// Resample files to a target rate, in place or into a directory
    Resample {
        #[command(flatten)]
        files: FileArgs,

        /// Write converted copies here instead of replacing the originals
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Target sample rate in Hz (defaults to the configured rate)
        #[arg(short, long, value_name = "HZ")]
        rate: Option<u32>,

        /// Conversion program
        #[arg(long, value_enum)]
        backend: Option<Backend>,

        /// Path to the conversion program binary
        #[arg(long, value_name = "PATH")]
        tool_path: Option<PathBuf>,

        /// Directory under which the staging directory is created
        #[arg(long, value_name = "DIR")]
        main_path: Option<PathBuf>,
    },

    /// Exit non-zero unless every file has the target rate
    Check {
        #[command(flatten)]
        files: FileArgs,

        /// Expected sample rate in Hz (defaults to the configured rate)
        #[arg(short, long, value_name = "HZ")]
        rate: Option<u32>,
    },

    /// Rename a single file
    Rename { from: PathBuf, to: PathBuf },

    /// Rename files to <keyword>_<n>.<ext> in the order given
    RenameKeyword {
        keyword: String,

        #[command(flatten)]
        files: FileArgs,
    },

    /// Apply the from/to pairs of a JSON rename plan
    RenamePlan {
        plan: PathBuf,

        /// Resolve relative plan entries against this directory
        #[arg(long, value_name = "DIR")]
        base: Option<PathBuf>,
    },

    /// List audio files in a directory
    List {
        dir: PathBuf,

        #[arg(short, long)]
        recursive: bool,
    },

    /// Write the current settings to the settings file
    InitConfig {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },
}

/// Input files, given directly or collected from a directory
#[derive(Args, Debug, Clone)]
pub struct FileArgs {
    /// Audio files to process
    pub files: Vec<PathBuf>,

    /// Also take every audio file in this directory (sorted by path)
    #[arg(short, long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Descend into subdirectories of --dir
    #[arg(long, requires = "dir")]
    pub recursive: bool,
}

impl FileArgs {
    /// Explicit files first, then directory contents
    pub fn resolve(&self) -> Result<Vec<PathBuf>> {
        let mut files = self.files.clone();
        if let Some(dir) = &self.dir {
            files.extend(collect_audio_files(dir, self.recursive)?);
        }
        Ok(files)
    }
}

impl Command {
    /// Apply command-line overrides on top of loaded settings
    pub fn apply_overrides(&self, settings: &mut Settings) {
        match self {
            Command::Resample {
                rate,
                backend,
                tool_path,
                main_path,
                ..
            } => {
                if let Some(rate) = rate {
                    settings.target_sample_rate = *rate;
                }
                if let Some(backend) = backend {
                    settings.backend = *backend;
                }
                if let Some(path) = tool_path {
                    settings.tool_path = Some(path.clone());
                }
                if let Some(path) = main_path {
                    settings.main_path = path.clone();
                }
            }
            Command::Check { rate: Some(rate), .. } => {
                settings.target_sample_rate = *rate;
            }
            _ => {}
        }
    }
}
