//! Sample rate conversion
//!
//! Batches are driven by `Resampler`; the actual work is done by an external
//! program behind the `AudioTransformer` trait.

mod resampler;
mod staging;
mod transformer;

pub use resampler::{ConvertedFile, ResampleReport, Resampler, DEFAULT_TARGET_SAMPLE_RATE};
pub use staging::{staging_path, StagingDir, STAGING_DIR_NAME};
pub use transformer::{
    resolve_tool_path, AudioTransformer, Backend, FfmpegTransformer, SoxTransformer,
};

use std::path::Path;

use crate::config::Settings;
use crate::error::Result;

/// Resample a batch with the backend and anchor path from `settings`
///
/// Without `output_dir` the files are replaced in place.
pub fn resampling<P: AsRef<Path>>(
    paths: &[P],
    output_dir: Option<&Path>,
    target_sample_rate: u32,
    settings: &Settings,
) -> Result<ResampleReport> {
    settings
        .resampler()
        .resampling(paths, output_dir, target_sample_rate)
}
