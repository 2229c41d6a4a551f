//! audio-prep - file management and audio preprocessing for a dataset of
//! short recordings
//!
//! - `audio`: sample rate probing and uniform-rate checks
//! - `conversion`: batch resampling through sox or ffmpeg
//! - `files`: rename/move/delete helpers, keyword and plan renaming, discovery
//! - `config`: persistent settings and the CLI definition

pub mod audio;
pub mod config;
pub mod conversion;
pub mod error;
pub mod files;
pub mod logging;

#[cfg(test)]
mod test_fixtures;

pub use audio::{get_sample_rate, is_same_sample_rate, SampleRate};
pub use conversion::{resampling, Resampler, DEFAULT_TARGET_SAMPLE_RATE};
pub use error::{PrepError, Result};
pub use files::{rename, rename_by_keyword};
