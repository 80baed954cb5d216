use crate::domain::profile::EncoderProfile;
use crate::ports::encoder::EncoderPort;
use async_trait::async_trait;
use std::io;
use std::path::Path;
use std::process::Output;
use tokio::process::Command as TokioCommand;

/// Binary the adapter shells out to; must be on PATH.
pub const FFMPEG_BIN: &str = "ffmpeg";

#[derive(Clone, Copy)]
pub struct FfmpegEncoder;

impl FfmpegEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FfmpegEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EncoderPort for FfmpegEncoder {
    async fn list_encoders(&self) -> io::Result<Output> {
        TokioCommand::new(FFMPEG_BIN)
            .arg("-hide_banner")
            .arg("-encoders")
            .output()
            .await
    }

    async fn run_encode(
        &self,
        input: &Path,
        output: &Path,
        profile: &EncoderProfile,
    ) -> io::Result<Output> {
        // .output() captures stderr so failures can be surfaced per job.
        TokioCommand::new(FFMPEG_BIN)
            .args(profile.encode_args(input, output))
            .output()
            .await
    }
}
