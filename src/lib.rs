//! Presto - Batch Video Optimizer
//!
//! Hexagonal Architecture:
//! - domain/: Pure data and accounting (jobs, encoder profiles, run summary)
//! - ports/: Trait definitions for the external encoder
//! - adapters/: Concrete implementations (ffmpeg process adapter)
//! - application/: Services (capability probe, discovery, path mapping,
//!   job runner, worker pool)
//! - config: Environment configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports for convenience
pub use adapters::ffmpeg::FfmpegEncoder;
pub use config::{BatchConfig, HardwarePreference};
pub use domain::jobs::{Job, JobOutcome, JobReport};
pub use domain::profile::EncoderProfile;
pub use domain::report::RunSummary;
