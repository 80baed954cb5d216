//! One-shot capability probe for the hardware encoding path.

use crate::config::{BatchConfig, HardwarePreference};
use crate::domain::profile::{EncoderProfile, HARDWARE_ENCODER};
use crate::ports::encoder::EncoderPort;
use regex::Regex;
use std::time::Duration;
use tracing::{info, warn};

const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Resolve the encoder profile for this run. Probes the encoder listing at
/// most once; a forced on/off preference skips the probe entirely. Any probe
/// failure falls back to the software profile, never fatal.
pub async fn resolve_profile(config: &BatchConfig, encoder: &impl EncoderPort) -> EncoderProfile {
    let use_hardware = match config.hardware {
        HardwarePreference::On => true,
        HardwarePreference::Off => false,
        HardwarePreference::Auto => hardware_available(encoder).await,
    };

    if use_hardware {
        info!("Using hardware encoder {}", HARDWARE_ENCODER);
        EncoderProfile::hardware(&config.audio_bitrate)
    } else {
        info!("Using software encoder libx265");
        EncoderProfile::software(&config.preset, config.crf, &config.audio_bitrate)
    }
}

async fn hardware_available(encoder: &impl EncoderPort) -> bool {
    let output = match tokio::time::timeout(PROBE_TIMEOUT, encoder.list_encoders()).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => {
            warn!("Encoder probe failed to run: {}", e);
            return false;
        }
        Err(_) => {
            warn!("Encoder probe timed out after {:?}", PROBE_TIMEOUT);
            return false;
        }
    };

    if !output.status.success() {
        warn!(
            "Encoder probe exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr)
        );
        return false;
    }

    encoder_listed(&String::from_utf8_lossy(&output.stdout), HARDWARE_ENCODER)
}

/// `ffmpeg -encoders` prints one line per encoder, capability flags first:
/// ` V....D hevc_videotoolbox    VideoToolbox H.265 Encoder`
fn encoder_listed(listing: &str, name: &str) -> bool {
    let pattern = format!(r"(?m)^\s*V\S*\s+{}\s", regex::escape(name));
    let re = Regex::new(&pattern).unwrap();
    re.is_match(listing)
}
