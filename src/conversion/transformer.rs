//! External tool subprocess handling for sample rate conversion

use std::path::{Path, PathBuf};
use std::process::Command;

use serde::{Deserialize, Serialize};

use crate::error::{PrepError, Result};

/// Converts one audio file into another at a target sample rate
///
/// Channel count and bit depth are left to the implementation's defaults.
pub trait AudioTransformer {
    /// Short name used in log lines
    fn name(&self) -> &str;

    /// Write `input` resampled to `target_sample_rate` at `output`
    fn convert(&self, input: &Path, output: &Path, target_sample_rate: u32) -> Result<()>;
}

impl<T: AudioTransformer + ?Sized> AudioTransformer for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn convert(&self, input: &Path, output: &Path, target_sample_rate: u32) -> Result<()> {
        (**self).convert(input, output, target_sample_rate)
    }
}

/// Which external program performs the conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Sox,
    Ffmpeg,
}

impl Backend {
    /// Program name looked up on PATH
    pub fn program(self) -> &'static str {
        match self {
            Backend::Sox => "sox",
            Backend::Ffmpeg => "ffmpeg",
        }
    }

    /// Build the transformer for this backend
    ///
    /// `tool_path` overrides where the binary is found.
    pub fn transformer(self, tool_path: Option<&Path>) -> Box<dyn AudioTransformer> {
        let program = resolve_tool_path(self, tool_path);
        match self {
            Backend::Sox => Box::new(SoxTransformer::new(program)),
            Backend::Ffmpeg => Box::new(FfmpegTransformer::new(program)),
        }
    }
}

/// Find the binary for a backend
///
/// An explicit override wins. Otherwise a copy bundled next to the executable
/// under `resources/bin/` is preferred, falling back to the bare program name
/// so the OS searches PATH at spawn time.
pub fn resolve_tool_path(backend: Backend, tool_path: Option<&Path>) -> PathBuf {
    if let Some(path) = tool_path {
        return path.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        let local_path = exe_dir.join("resources").join("bin").join(backend.program());
        if local_path.exists() {
            log::debug!("Found {} at local path: {:?}", backend.program(), local_path);
            return local_path;
        }
    }

    PathBuf::from(backend.program())
}

/// Resamples with sox: `sox <input> <output> rate -h <rate>`
#[derive(Debug, Clone)]
pub struct SoxTransformer {
    program: PathBuf,
}

impl SoxTransformer {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn args(input: &Path, output: &Path, target_sample_rate: u32) -> Vec<String> {
        vec![
            input.to_string_lossy().into_owned(),
            output.to_string_lossy().into_owned(),
            "rate".to_string(),
            "-h".to_string(),
            target_sample_rate.to_string(),
        ]
    }
}

impl AudioTransformer for SoxTransformer {
    fn name(&self) -> &str {
        "sox"
    }

    fn convert(&self, input: &Path, output: &Path, target_sample_rate: u32) -> Result<()> {
        let mut cmd = Command::new(&self.program);
        cmd.args(Self::args(input, output, target_sample_rate));
        run_tool(self.name(), cmd, input, output, target_sample_rate)
    }
}

/// Resamples with ffmpeg: `ffmpeg -y -i <input> -vn -ar <rate> <output>`
#[derive(Debug, Clone)]
pub struct FfmpegTransformer {
    program: PathBuf,
}

impl FfmpegTransformer {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn args(input: &Path, output: &Path, target_sample_rate: u32) -> Vec<String> {
        // -y   : overwrite output without asking
        // -vn  : drop any embedded picture stream
        // -ar  : output sample rate
        vec![
            "-y".to_string(),
            "-i".to_string(),
            input.to_string_lossy().into_owned(),
            "-vn".to_string(),
            "-ar".to_string(),
            target_sample_rate.to_string(),
            output.to_string_lossy().into_owned(),
        ]
    }
}

impl AudioTransformer for FfmpegTransformer {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    fn convert(&self, input: &Path, output: &Path, target_sample_rate: u32) -> Result<()> {
        let mut cmd = Command::new(&self.program);
        cmd.args(Self::args(input, output, target_sample_rate));
        run_tool(self.name(), cmd, input, output, target_sample_rate)
    }
}

/// Run a prepared tool command to completion and map its exit status
fn run_tool(
    tool: &str,
    mut cmd: Command,
    input: &Path,
    output: &Path,
    target_sample_rate: u32,
) -> Result<()> {
    log::debug!(
        "{}: {} -> {} at {} Hz",
        tool,
        input.display(),
        output.display(),
        target_sample_rate
    );

    let result = cmd
        .output()
        .map_err(|e| PrepError::conversion(input, format!("Failed to spawn {}: {}", tool, e)))?;

    if result.status.success() {
        return Ok(());
    }

    // Partial output must never be mistaken for a finished conversion
    let _ = std::fs::remove_file(output);

    let stderr = String::from_utf8_lossy(&result.stderr);
    Err(PrepError::conversion(
        input,
        format!(
            "{} exited with status {}: {}",
            tool,
            result.status,
            stderr.lines().last().unwrap_or("Unknown error")
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{get_sample_rate, SampleRate};
    use crate::test_fixtures::{tool_available, write_pcm_wav};
    use tempfile::TempDir;

    #[test]
    fn test_sox_args() {
        let args = SoxTransformer::args(Path::new("/d/in.wav"), Path::new("/t/in.wav"), 16000);
        assert_eq!(args, vec!["/d/in.wav", "/t/in.wav", "rate", "-h", "16000"]);
    }

    #[test]
    fn test_ffmpeg_args() {
        let args =
            FfmpegTransformer::args(Path::new("/d/in.wav"), Path::new("/t/in.wav"), 22050);
        assert_eq!(
            args,
            vec!["-y", "-i", "/d/in.wav", "-vn", "-ar", "22050", "/t/in.wav"]
        );
    }

    #[test]
    fn test_backend_serde_names() {
        assert_eq!(serde_json::to_string(&Backend::Sox).unwrap(), "\"sox\"");
        let parsed: Backend = serde_json::from_str("\"ffmpeg\"").unwrap();
        assert_eq!(parsed, Backend::Ffmpeg);
        assert_eq!(Backend::default(), Backend::Sox);
    }

    #[test]
    fn test_override_tool_path_wins() {
        let path = resolve_tool_path(Backend::Sox, Some(Path::new("/opt/sox/bin/sox")));
        assert_eq!(path, PathBuf::from("/opt/sox/bin/sox"));
    }

    #[test]
    fn test_missing_tool_is_conversion_error() {
        let dir = TempDir::new().unwrap();
        let input = write_pcm_wav(dir.path(), "in.wav", 44100);
        let tfm = SoxTransformer::new(dir.path().join("no-such-sox"));

        let err = tfm
            .convert(&input, &dir.path().join("out.wav"), 16000)
            .unwrap_err();
        match err {
            PrepError::Conversion { path, reason } => {
                assert_eq!(path, input);
                assert!(reason.contains("Failed to spawn sox"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_sox_resamples_when_installed() {
        if !tool_available("sox") {
            return;
        }
        let dir = TempDir::new().unwrap();
        let input = write_pcm_wav(dir.path(), "in.wav", 44100);
        let output = dir.path().join("out.wav");

        Backend::Sox
            .transformer(None)
            .convert(&input, &output, 16000)
            .unwrap();
        assert_eq!(get_sample_rate(&output), SampleRate::Known(16000));
    }

    #[test]
    fn test_ffmpeg_resamples_when_installed() {
        if !tool_available("ffmpeg") {
            return;
        }
        let dir = TempDir::new().unwrap();
        let input = write_pcm_wav(dir.path(), "in.wav", 48000);
        let output = dir.path().join("out.wav");

        Backend::Ffmpeg
            .transformer(None)
            .convert(&input, &output, 16000)
            .unwrap();
        assert_eq!(get_sample_rate(&output), SampleRate::Known(16000));
    }

    #[test]
    fn test_failed_run_removes_partial_output() {
        if !tool_available("sox") {
            return;
        }
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("junk.wav");
        std::fs::write(&input, b"not audio").unwrap();
        let output = dir.path().join("out.wav");

        let result = SoxTransformer::new("sox").convert(&input, &output, 16000);
        assert!(result.is_err());
        assert!(!output.exists());
    }
}
