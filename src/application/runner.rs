//! Runs one transcode job and turns the outcome into a report.

use crate::domain::jobs::{Job, JobReport};
use crate::domain::profile::EncoderProfile;
use crate::ports::encoder::EncoderPort;
use std::fs;
use std::time::Instant;

/// Invoke the encoder once for `job`. Every failure mode collapses into a
/// `Failed` report; nothing here aborts the batch. A non-zero exit leaves
/// whatever ffmpeg wrote at the output path in place.
pub async fn run_job(job: &Job, profile: &EncoderProfile, encoder: &impl EncoderPort) -> JobReport {
    let before_size = match fs::metadata(&job.input_path) {
        Ok(meta) => meta.len(),
        Err(e) => return JobReport::failed(job.clone(), format!("Cannot stat input: {}", e)),
    };

    let started = Instant::now();
    let output = match encoder
        .run_encode(&job.input_path, &job.output_path, profile)
        .await
    {
        Ok(output) => output,
        Err(e) => {
            return JobReport::failed(job.clone(), format!("ffmpeg failed to start: {}", e))
        }
    };
    let elapsed = started.elapsed();

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return JobReport::failed(
            job.clone(),
            format!("ffmpeg exited with {}: {}", output.status, stderr.trim()),
        );
    }

    let after_size = match fs::metadata(&job.output_path) {
        Ok(meta) => meta.len(),
        Err(e) => {
            return JobReport::failed(job.clone(), format!("Output missing after encode: {}", e))
        }
    };

    JobReport::done(job.clone(), before_size, after_size, elapsed)
}
