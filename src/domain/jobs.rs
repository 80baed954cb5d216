use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// One file's transcode task. Created once per discovered input before
/// dispatch and consumed by exactly one runner invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

/// What happened to a single job. A failed encode is an explicit variant,
/// never an absent value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum JobOutcome {
    Done {
        before_size: u64,
        after_size: u64,
        elapsed: Duration,
    },
    Failed {
        reason: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobReport {
    pub job: Job,
    pub outcome: JobOutcome,
}

impl JobReport {
    pub fn done(job: Job, before_size: u64, after_size: u64, elapsed: Duration) -> Self {
        Self {
            job,
            outcome: JobOutcome::Done {
                before_size,
                after_size,
                elapsed,
            },
        }
    }

    pub fn failed(job: Job, reason: impl Into<String>) -> Self {
        Self {
            job,
            outcome: JobOutcome::Failed {
                reason: reason.into(),
            },
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self.outcome, JobOutcome::Done { .. })
    }
}
