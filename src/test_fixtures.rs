//! Test fixtures for sample rate, resampling and renaming tests
//!
//! WAV files are written in-process with hound so tests do not depend on an
//! installed audio tool. Tests that do need sox or ffmpeg call
//! `tool_available` first and return early when it is missing.

#![cfg(test)]

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::conversion::AudioTransformer;
use crate::error::{PrepError, Result};

/// Number of frames written to every generated file (a quarter second at 16 kHz)
const FIXTURE_FRAMES: u32 = 4000;

/// Write a mono 16-bit PCM WAV with a short sine tone
pub fn write_pcm_wav(dir: &Path, name: &str, sample_rate: u32) -> PathBuf {
    let path = dir.join(name);
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(&path, spec).expect("Failed to create wav");
    for i in 0..FIXTURE_FRAMES {
        let t = i as f32 / sample_rate as f32;
        let sample = (t * 440.0 * 2.0 * std::f32::consts::PI).sin() * i16::MAX as f32 * 0.5;
        writer.write_sample(sample as i16).expect("Failed to write sample");
    }
    writer.finalize().expect("Failed to finalize wav");

    path
}

/// Write a mono 32-bit float WAV (not linear integer PCM)
pub fn write_float_wav(dir: &Path, name: &str, sample_rate: u32) -> PathBuf {
    let path = dir.join(name);
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };

    let mut writer = hound::WavWriter::create(&path, spec).expect("Failed to create wav");
    for _ in 0..FIXTURE_FRAMES {
        writer.write_sample(0.0f32).expect("Failed to write sample");
    }
    writer.finalize().expect("Failed to finalize wav");

    path
}

/// Check whether an external program can be spawned from PATH
pub fn tool_available(program: &str) -> bool {
    Command::new(program)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok()
}

/// In-process stand-in for sox/ffmpeg
///
/// Copies the samples unchanged and stamps the target rate into the header,
/// which is all the orchestration tests look at. Records every call and can
/// be told to fail on a given file name.
#[derive(Default)]
pub struct StampingTransformer {
    pub fail_on: Option<String>,
    pub calls: RefCell<Vec<(PathBuf, PathBuf)>>,
}

impl StampingTransformer {
    pub fn failing_on(name: &str) -> Self {
        Self {
            fail_on: Some(name.to_string()),
            ..Default::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl AudioTransformer for StampingTransformer {
    fn name(&self) -> &str {
        "stamp"
    }

    fn convert(&self, input: &Path, output: &Path, target_sample_rate: u32) -> Result<()> {
        self.calls
            .borrow_mut()
            .push((input.to_path_buf(), output.to_path_buf()));

        let file_name = input.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if self.fail_on.as_deref() == Some(file_name) {
            return Err(PrepError::conversion(input, "stamp: simulated failure"));
        }

        let mut reader = hound::WavReader::open(input)
            .map_err(|e| PrepError::conversion(input, e.to_string()))?;
        let spec = hound::WavSpec {
            sample_rate: target_sample_rate,
            ..reader.spec()
        };
        let mut writer = hound::WavWriter::create(output, spec)
            .map_err(|e| PrepError::conversion(input, e.to_string()))?;
        for sample in reader.samples::<i16>() {
            let sample = sample.map_err(|e| PrepError::conversion(input, e.to_string()))?;
            writer
                .write_sample(sample)
                .map_err(|e| PrepError::conversion(input, e.to_string()))?;
        }
        writer
            .finalize()
            .map_err(|e| PrepError::conversion(input, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_pcm_wav() {
        let dir = TempDir::new().unwrap();
        let path = write_pcm_wav(dir.path(), "gen.wav", 22050);
        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().sample_rate, 22050);
        assert_eq!(reader.duration(), FIXTURE_FRAMES);
    }

    #[test]
    fn test_stamping_transformer_sets_rate() {
        let dir = TempDir::new().unwrap();
        let src = write_pcm_wav(dir.path(), "in.wav", 44100);
        let dst = dir.path().join("out.wav");

        let tfm = StampingTransformer::default();
        tfm.convert(&src, &dst, 16000).unwrap();

        assert_eq!(hound::WavReader::open(&dst).unwrap().spec().sample_rate, 16000);
        assert_eq!(tfm.call_count(), 1);
    }
}
