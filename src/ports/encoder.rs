use crate::domain::profile::EncoderProfile;
use async_trait::async_trait;
use std::io;
use std::path::Path;
use std::process::Output;

/// Boundary to the external encoder binary. Everything that actually talks
/// to ffmpeg goes through here so the services stay testable.
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait EncoderPort: Send + Sync {
    /// List the encoders this ffmpeg build supports (capability probe).
    async fn list_encoders(&self) -> io::Result<Output>;

    /// Run one transcode with the profile's fixed argument list.
    async fn run_encode(
        &self,
        input: &Path,
        output: &Path,
        profile: &EncoderProfile,
    ) -> io::Result<Output>;
}
