//! Batch resampling
//!
//! Two modes:
//! - Output directory given: converted copies are written there under their
//!   original names, originals untouched.
//! - No output directory: files are converted into a staging directory under
//!   the anchor path, then each one is renamed over its original.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::staging::{staging_path, StagingDir};
use super::transformer::AudioTransformer;
use crate::error::{PrepError, Result};
use crate::files::replace_file;

/// Sample rate used when none is specified
pub const DEFAULT_TARGET_SAMPLE_RATE: u32 = 16000;

/// One converted file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedFile {
    /// Original input path
    pub input: PathBuf,
    /// Where the converted audio ended up (same as `input` for in-place runs)
    pub output: PathBuf,
}

/// Outcome of a completed batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResampleReport {
    pub target_sample_rate: u32,
    pub in_place: bool,
    pub converted: Vec<ConvertedFile>,
}

/// Runs batches of files through an `AudioTransformer`
pub struct Resampler<T: AudioTransformer> {
    transformer: T,
    /// Anchor for the staging directory used by in-place runs
    main_path: PathBuf,
}

impl<T: AudioTransformer> Resampler<T> {
    pub fn new(transformer: T, main_path: impl Into<PathBuf>) -> Self {
        Self {
            transformer,
            main_path: main_path.into(),
        }
    }

    pub fn transformer(&self) -> &T {
        &self.transformer
    }

    pub fn main_path(&self) -> &Path {
        &self.main_path
    }

    /// Convert every file in `paths` to `target_sample_rate`
    ///
    /// All inputs (and the output directory, if given) are checked before the
    /// first conversion. A tool failure aborts the batch; files finished
    /// before it stay converted.
    pub fn resampling<P: AsRef<Path>>(
        &self,
        paths: &[P],
        output_dir: Option<&Path>,
        target_sample_rate: u32,
    ) -> Result<ResampleReport> {
        if let Some(dir) = output_dir {
            if !dir.exists() {
                return Err(PrepError::OutputDirNotFound(dir.to_path_buf()));
            }
            if !dir.is_dir() {
                return Err(PrepError::NotADirectory(dir.to_path_buf()));
            }
        }

        // Same-named inputs only collide when copies share one output directory
        let inputs = validate_inputs(paths, output_dir.is_some())?;
        if output_dir.is_none() {
            reject_staged_inputs(&inputs, &self.main_path)?;
        }

        log::info!(
            "Resampling {} files to {} Hz with {} ({})",
            inputs.len(),
            target_sample_rate,
            self.transformer.name(),
            if output_dir.is_some() { "copy" } else { "in place" }
        );

        let converted = match output_dir {
            Some(dir) => self.convert_into(&inputs, dir, target_sample_rate)?,
            None => self.convert_in_place(&inputs, target_sample_rate)?,
        };

        log::info!("Resampled {} files", converted.len());

        Ok(ResampleReport {
            target_sample_rate,
            in_place: output_dir.is_none(),
            converted,
        })
    }

    fn convert_into(
        &self,
        inputs: &[(PathBuf, String)],
        output_dir: &Path,
        target_sample_rate: u32,
    ) -> Result<Vec<ConvertedFile>> {
        let mut converted = Vec::with_capacity(inputs.len());

        for (input, file_name) in inputs {
            let output = output_dir.join(file_name);
            self.transformer.convert(input, &output, target_sample_rate)?;
            log::debug!("Converted {:?} -> {:?}", input, output);
            converted.push(ConvertedFile {
                input: input.clone(),
                output,
            });
        }

        Ok(converted)
    }

    fn convert_in_place(
        &self,
        inputs: &[(PathBuf, String)],
        target_sample_rate: u32,
    ) -> Result<Vec<ConvertedFile>> {
        let staging = StagingDir::create(&self.main_path)?;
        let mut converted = Vec::with_capacity(inputs.len());

        for (input, file_name) in inputs {
            let staged = staging.staged_path(file_name);
            self.transformer.convert(input, &staged, target_sample_rate)?;
            replace_file(&staged, input)?;
            log::debug!("Replaced {:?} with resampled audio", input);
            converted.push(ConvertedFile {
                input: input.clone(),
                output: input.clone(),
            });
        }

        staging.close()?;
        Ok(converted)
    }
}

/// Check that every input exists and has a usable file name
///
/// With `unique_names` two inputs may not share a file name.
fn validate_inputs<P: AsRef<Path>>(
    paths: &[P],
    unique_names: bool,
) -> Result<Vec<(PathBuf, String)>> {
    let mut seen = HashSet::new();
    let mut inputs = Vec::with_capacity(paths.len());

    for path in paths {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PrepError::MissingFile(path.to_path_buf()));
        }

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| PrepError::InvalidFileName(path.to_path_buf()))?
            .to_string();

        if unique_names && !seen.insert(file_name.clone()) {
            return Err(PrepError::DuplicateFileName(file_name));
        }

        inputs.push((path.to_path_buf(), file_name));
    }

    Ok(inputs)
}

/// The staging directory is wiped before use, so nothing in it can be an input
fn reject_staged_inputs(inputs: &[(PathBuf, String)], main_path: &Path) -> Result<()> {
    let staging = staging_path(main_path);
    let staging = staging.canonicalize().unwrap_or(staging);

    for (input, _) in inputs {
        let resolved = input.canonicalize()?;
        if resolved.starts_with(&staging) {
            return Err(PrepError::InputInStaging(input.clone()));
        }
    }
    Ok(())
}
