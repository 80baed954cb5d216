//! Aggregated byte and timing totals for a completed batch.

use crate::domain::jobs::{JobOutcome, JobReport};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Total input bytes across successful jobs
    pub total_before: u64,
    /// Total output bytes across successful jobs
    pub total_after: u64,
    /// Summed per-job encoding time across successful jobs
    pub total_processing: Duration,
    /// Elapsed time for the whole batch
    pub wall_clock: Duration,
}

impl RunSummary {
    /// Fold one report into the totals. Failed jobs only bump the failure
    /// counter; their bytes and time stay out of the sums.
    pub fn record(&mut self, report: &JobReport) {
        self.attempted += 1;
        match &report.outcome {
            JobOutcome::Done {
                before_size,
                after_size,
                elapsed,
            } => {
                self.succeeded += 1;
                self.total_before += before_size;
                self.total_after += after_size;
                self.total_processing += *elapsed;
            }
            JobOutcome::Failed { .. } => {
                self.failed += 1;
            }
        }
    }

    pub fn finish(&mut self, wall_clock: Duration) {
        self.wall_clock = wall_clock;
    }

    /// Overall byte reduction, only meaningful when anything was encoded.
    pub fn reduction_percent(&self) -> Option<f64> {
        if self.total_before > 0 {
            Some((1.0 - self.total_after as f64 / self.total_before as f64) * 100.0)
        } else {
            None
        }
    }

    pub fn average_processing(&self) -> Option<Duration> {
        if self.succeeded > 0 {
            Some(self.total_processing / self.succeeded as u32)
        } else {
            None
        }
    }

    /// Final plain-text report block.
    pub fn render(&self) -> String {
        let mut lines = vec![
            String::from("Batch report"),
            String::from("-----------------------------"),
            format!(
                "Files attempted:  {} ({} ok, {} failed)",
                self.attempted, self.succeeded, self.failed
            ),
            format!("Original size:    {}", human_size(self.total_before)),
            format!("Optimized size:   {}", human_size(self.total_after)),
        ];

        if let Some(saved) = self.reduction_percent() {
            lines.push(format!("Space saved:      {:.2}%", saved));
        }
        if let Some(avg) = self.average_processing() {
            lines.push(format!(
                "Processing time:  {:.1}s ({:.1}s avg per file)",
                self.total_processing.as_secs_f64(),
                avg.as_secs_f64()
            ));
        }
        lines.push(format!(
            "Wall clock:       {:.1}s",
            self.wall_clock.as_secs_f64()
        ));

        lines.join("\n")
    }
}

/// Render a byte count on the B/KB/MB/GB/TB ladder with two decimals.
pub fn human_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    for unit in ["B", "KB", "MB", "GB"] {
        if size < 1024.0 {
            return format!("{:.2} {}", size, unit);
        }
        size /= 1024.0;
    }
    format!("{:.2} TB", size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::jobs::Job;
    use std::path::PathBuf;

    fn job(name: &str) -> Job {
        Job {
            input_path: PathBuf::from("input").join(name),
            output_path: PathBuf::from("output").join(name),
        }
    }

    #[test]
    fn test_failed_jobs_contribute_nothing() {
        let mut summary = RunSummary::default();
        summary.record(&JobReport::done(
            job("a.mov"),
            1000,
            400,
            Duration::from_secs(4),
        ));
        summary.record(&JobReport::failed(job("b.mov"), "exit 1"));

        assert_eq!(summary.attempted, 2);
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.total_before, 1000);
        assert_eq!(summary.total_after, 400);
        assert_eq!(summary.total_processing, Duration::from_secs(4));
    }

    #[test]
    fn test_reduction_percent() {
        let mut summary = RunSummary::default();
        summary.record(&JobReport::done(
            job("a.mov"),
            1000,
            250,
            Duration::from_secs(1),
        ));
        assert_eq!(summary.reduction_percent(), Some(75.0));
    }

    #[test]
    fn test_reduction_omitted_without_input_bytes() {
        let mut summary = RunSummary::default();
        summary.record(&JobReport::failed(job("a.mov"), "exit 1"));

        assert_eq!(summary.reduction_percent(), None);
        assert_eq!(summary.average_processing(), None);

        let rendered = summary.render();
        assert!(!rendered.contains("Space saved"));
        assert!(!rendered.contains("Processing time"));
    }

    #[test]
    fn test_average_processing() {
        let mut summary = RunSummary::default();
        summary.record(&JobReport::done(
            job("a.mov"),
            10,
            5,
            Duration::from_secs(2),
        ));
        summary.record(&JobReport::done(
            job("b.mov"),
            10,
            5,
            Duration::from_secs(4),
        ));
        assert_eq!(summary.average_processing(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_render_contains_totals() {
        let mut summary = RunSummary::default();
        summary.record(&JobReport::done(
            job("a.mov"),
            2 * 1024 * 1024,
            1024 * 1024,
            Duration::from_secs(2),
        ));
        summary.finish(Duration::from_secs(3));

        let rendered = summary.render();
        assert!(rendered.contains("1 ok, 0 failed"));
        assert!(rendered.contains("2.00 MB"));
        assert!(rendered.contains("1.00 MB"));
        assert!(rendered.contains("Space saved:      50.00%"));
        assert!(rendered.contains("Wall clock:       3.0s"));
    }

    #[test]
    fn test_summary_round_trips_through_json() {
        let mut summary = RunSummary::default();
        summary.record(&JobReport::done(
            job("a.mov"),
            100,
            60,
            Duration::from_secs(1),
        ));
        summary.finish(Duration::from_secs(2));

        let json = serde_json::to_string(&summary).unwrap();
        let back: RunSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back.succeeded, 1);
        assert_eq!(back.total_before, 100);
        assert_eq!(back.wall_clock, Duration::from_secs(2));
    }

    #[test]
    fn test_human_size_ladder() {
        assert_eq!(human_size(0), "0.00 B");
        assert_eq!(human_size(512), "512.00 B");
        assert_eq!(human_size(2048), "2.00 KB");
        assert_eq!(human_size(5 * 1024 * 1024), "5.00 MB");
        assert_eq!(human_size(3 * 1024 * 1024 * 1024), "3.00 GB");
        assert_eq!(human_size(2 * 1024 * 1024 * 1024 * 1024), "2.00 TB");
    }
}
