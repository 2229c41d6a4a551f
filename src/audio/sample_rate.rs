//! Sample rate reading for PCM audio containers

use std::fmt;
use std::fs::File;
use std::path::Path;

use symphonia::core::codecs::{
    CodecType, CODEC_TYPE_PCM_S16BE, CODEC_TYPE_PCM_S16LE, CODEC_TYPE_PCM_S24BE,
    CODEC_TYPE_PCM_S24LE, CODEC_TYPE_PCM_S32BE, CODEC_TYPE_PCM_S32LE, CODEC_TYPE_PCM_S8,
    CODEC_TYPE_PCM_U16BE, CODEC_TYPE_PCM_U16LE, CODEC_TYPE_PCM_U24BE, CODEC_TYPE_PCM_U24LE,
    CODEC_TYPE_PCM_U32BE, CODEC_TYPE_PCM_U32LE, CODEC_TYPE_PCM_U8,
};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Sample rate of an audio file as reported by its container header
///
/// `Unknown` covers every file that could not be read as linear PCM: missing,
/// corrupt, or simply a different format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SampleRate {
    Known(u32),
    Unknown,
}

impl SampleRate {
    pub fn is_known(self) -> bool {
        matches!(self, SampleRate::Known(_))
    }
}

impl fmt::Display for SampleRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleRate::Known(hz) => write!(f, "{} Hz", hz),
            SampleRate::Unknown => write!(f, "unknown"),
        }
    }
}

/// Read the sample rate of a linear PCM audio file
///
/// Never fails: anything that cannot be parsed yields `SampleRate::Unknown`.
/// The file handle is dropped before returning on every path.
pub fn get_sample_rate(path: &Path) -> SampleRate {
    match read_pcm_sample_rate(path) {
        Ok(hz) => SampleRate::Known(hz),
        Err(reason) => {
            log::debug!("No sample rate for {}: {}", path.display(), reason);
            SampleRate::Unknown
        }
    }
}

fn read_pcm_sample_rate(path: &Path) -> Result<u32, String> {
    let file = File::open(path).map_err(|e| format!("Failed to open file: {}", e))?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension() {
        hint.with_extension(&ext.to_string_lossy());
    }

    let format_opts = FormatOptions::default();
    let metadata_opts = MetadataOptions::default();

    let detected = symphonia::default::get_probe()
        .format(&hint, mss, &format_opts, &metadata_opts)
        .map_err(|e| format!("Failed to read audio format: {}", e))?;

    let track = detected
        .format
        .default_track()
        .ok_or_else(|| "No default track found".to_string())?;

    if !is_linear_pcm(track.codec_params.codec) {
        return Err(format!(
            "Codec {:?} is not linear PCM",
            track.codec_params.codec
        ));
    }

    match track.codec_params.sample_rate {
        Some(hz) if hz > 0 => Ok(hz),
        _ => Err("Header carries no sample rate".to_string()),
    }
}

/// Integer linear PCM only; float and companded (A-law, mu-law) data are rejected
fn is_linear_pcm(codec: CodecType) -> bool {
    [
        CODEC_TYPE_PCM_U8,
        CODEC_TYPE_PCM_S8,
        CODEC_TYPE_PCM_S16LE,
        CODEC_TYPE_PCM_S16BE,
        CODEC_TYPE_PCM_U16LE,
        CODEC_TYPE_PCM_U16BE,
        CODEC_TYPE_PCM_S24LE,
        CODEC_TYPE_PCM_S24BE,
        CODEC_TYPE_PCM_U24LE,
        CODEC_TYPE_PCM_U24BE,
        CODEC_TYPE_PCM_S32LE,
        CODEC_TYPE_PCM_S32BE,
        CODEC_TYPE_PCM_U32LE,
        CODEC_TYPE_PCM_U32BE,
    ]
    .contains(&codec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{write_float_wav, write_pcm_wav};
    use tempfile::TempDir;

    #[test]
    fn test_reads_header_rate() {
        let dir = TempDir::new().unwrap();
        for rate in [8000, 16000, 22050, 44100, 48000] {
            let path = write_pcm_wav(dir.path(), &format!("tone_{}.wav", rate), rate);
            assert_eq!(get_sample_rate(&path), SampleRate::Known(rate));
        }
    }

    #[test]
    fn test_missing_file_is_unknown() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            get_sample_rate(&dir.path().join("nope.wav")),
            SampleRate::Unknown
        );
    }

    #[test]
    fn test_non_audio_is_unknown() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("labels.wav");
        std::fs::write(&path, "file,state\nx.wav,hungry\n").unwrap();
        assert_eq!(get_sample_rate(&path), SampleRate::Unknown);
    }

    #[test]
    fn test_truncated_header_is_unknown() {
        let dir = TempDir::new().unwrap();
        let good = write_pcm_wav(dir.path(), "good.wav", 16000);
        let bytes = std::fs::read(&good).unwrap();
        let cut = dir.path().join("cut.wav");
        std::fs::write(&cut, &bytes[..20]).unwrap();
        assert_eq!(get_sample_rate(&cut), SampleRate::Unknown);
    }

    #[test]
    fn test_float_wav_is_unknown() {
        let dir = TempDir::new().unwrap();
        let path = write_float_wav(dir.path(), "float.wav", 16000);
        assert_eq!(get_sample_rate(&path), SampleRate::Unknown);
    }

    #[test]
    fn test_sample_rate_accessors() {
        assert!(SampleRate::Known(16000).is_known());
        assert!(!SampleRate::Unknown.is_known());
        assert_eq!(SampleRate::Known(16000).to_string(), "16000 Hz");
        assert_eq!(SampleRate::Unknown.to_string(), "unknown");
    }
}
