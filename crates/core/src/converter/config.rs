//! Configuration for the converter module.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::types::SourceKind;

/// Configuration for the decoder | encoder pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// Path to the decoder binary (ffmpeg-compatible command line).
    #[serde(default = "default_decoder_path")]
    pub decoder_path: PathBuf,

    /// Path to the encoder binary (lame-compatible command line).
    #[serde(default = "default_encoder_path")]
    pub encoder_path: PathBuf,

    /// Decoder log level; informational output is suppressed, errors kept.
    #[serde(default = "default_decoder_log_level")]
    pub decoder_log_level: String,

    /// Format of the stream piped from decoder to encoder.
    #[serde(default = "default_intermediate_format")]
    pub intermediate_format: String,

    /// VBR quality passed to the encoder (0 = best, 9 = smallest).
    #[serde(default = "default_encoder_quality")]
    pub encoder_quality: u8,

    /// Extension of the target codec, without the dot.
    #[serde(default = "default_target_extension")]
    pub target_extension: String,

    /// Source extensions the decoder is trusted with.
    #[serde(default = "default_supported_extensions")]
    pub supported_extensions: Vec<String>,

    /// Additional encoder arguments inserted before the input marker.
    #[serde(default)]
    pub extra_encoder_args: Vec<String>,
}

fn default_decoder_path() -> PathBuf {
    PathBuf::from("ffmpeg")
}

fn default_encoder_path() -> PathBuf {
    PathBuf::from("lame")
}

fn default_decoder_log_level() -> String {
    "error".to_string()
}

fn default_intermediate_format() -> String {
    "wav".to_string()
}

fn default_encoder_quality() -> u8 {
    2
}

fn default_target_extension() -> String {
    "mp3".to_string()
}

fn default_supported_extensions() -> Vec<String> {
    [
        "flac", "ogg", "oga", "opus", "m4a", "mp4", "aac", "wav", "wma", "ape", "wv", "aiff",
        "aif", "mpc",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            decoder_path: default_decoder_path(),
            encoder_path: default_encoder_path(),
            decoder_log_level: default_decoder_log_level(),
            intermediate_format: default_intermediate_format(),
            encoder_quality: default_encoder_quality(),
            target_extension: default_target_extension(),
            supported_extensions: default_supported_extensions(),
            extra_encoder_args: Vec::new(),
        }
    }
}

impl ConverterConfig {
    /// Creates a new config with custom decoder/encoder paths.
    pub fn with_paths(decoder_path: PathBuf, encoder_path: PathBuf) -> Self {
        Self {
            decoder_path,
            encoder_path,
            ..Default::default()
        }
    }

    /// Sets the encoder quality.
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.encoder_quality = quality;
        self
    }

    /// Sets the supported source extensions.
    pub fn with_supported_extensions(mut self, extensions: Vec<String>) -> Self {
        self.supported_extensions = extensions;
        self
    }

    /// Decides what to do with `path` based on its extension.
    ///
    /// Comparison ignores ASCII case; a file without extension is
    /// unsupported.
    pub fn classify(&self, path: &Path) -> SourceKind {
        let Some(extension) = path.extension().and_then(|e| e.to_str()) else {
            return SourceKind::Unsupported;
        };
        if extension.eq_ignore_ascii_case(&self.target_extension) {
            SourceKind::Target
        } else if self
            .supported_extensions
            .iter()
            .any(|supported| supported.eq_ignore_ascii_case(extension))
        {
            SourceKind::Transcodable
        } else {
            SourceKind::Unsupported
        }
    }
}
