//! Configuration loaded from the environment.

use std::env;
use std::path::PathBuf;
use tracing::warn;

const DEFAULT_EXTENSIONS: &str = "mp4,mov";
const DEFAULT_CRF: u32 = 28;

/// Hardware encoder selection: probe at startup, or force one path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HardwarePreference {
    Auto,
    On,
    Off,
}

impl HardwarePreference {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "auto" => Some(HardwarePreference::Auto),
            "on" => Some(HardwarePreference::On),
            "off" => Some(HardwarePreference::Off),
            _ => None,
        }
    }
}

/// Configuration for one batch run.
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Root directory scanned for input videos
    pub input_dir: PathBuf,
    /// Root directory the output tree is mirrored into
    pub output_dir: PathBuf,
    /// Recognized input file extensions, without the leading dot
    pub extensions: Vec<String>,
    /// libx265 preset for the software encoding path
    pub preset: String,
    /// CRF quality parameter for the software encoding path
    pub crf: u32,
    /// AAC audio bitrate, e.g. "128k"
    pub audio_bitrate: String,
    /// Hardware encoder selection (auto / on / off)
    pub hardware: HardwarePreference,
}

impl BatchConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        Self {
            input_dir: PathBuf::from(
                env::var("INPUT_DIR").unwrap_or_else(|_| String::from("input")),
            ),
            output_dir: PathBuf::from(
                env::var("OUTPUT_DIR").unwrap_or_else(|_| String::from("output")),
            ),
            extensions: parse_extensions(
                &env::var("EXTENSIONS").unwrap_or_else(|_| String::from(DEFAULT_EXTENSIONS)),
            ),
            preset: env::var("PRESET").unwrap_or_else(|_| String::from("faster")),
            crf: env::var("CRF")
                .ok()
                .map(|raw| parse_crf(&raw))
                .unwrap_or(DEFAULT_CRF),
            audio_bitrate: env::var("AUDIO_BITRATE").unwrap_or_else(|_| String::from("128k")),
            hardware: env::var("HWACCEL")
                .ok()
                .map(|raw| parse_hardware(&raw))
                .unwrap_or(HardwarePreference::Auto),
        }
    }
}

fn parse_extensions(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|ext| ext.trim().trim_start_matches('.').to_string())
        .filter(|ext| !ext.is_empty())
        .collect()
}

fn parse_crf(raw: &str) -> u32 {
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            warn!("Unparseable CRF value {:?}, using {}", raw, DEFAULT_CRF);
            DEFAULT_CRF
        }
    }
}

fn parse_hardware(raw: &str) -> HardwarePreference {
    match HardwarePreference::parse(raw.trim()) {
        Some(pref) => pref,
        None => {
            warn!("Unknown HWACCEL value {:?}, expected auto/on/off; probing", raw);
            HardwarePreference::Auto
        }
    }
}
