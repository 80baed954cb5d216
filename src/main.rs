//! Presto binary - batch-optimize a directory tree of videos to H.265.
//!
//! Wires up:
//! - Environment configuration
//! - The ffmpeg process adapter
//! - Capability probe, discovery, path mapping
//! - The bounded worker pool and the summary report

use clap::Parser;
use presto::application::discovery::find_video_files;
use presto::application::mapper::map_output_path;
use presto::application::probe::resolve_profile;
use presto::application::worker::{resolve_worker_count, WorkerPool};
use presto::domain::report::human_size;
use presto::{BatchConfig, FfmpegEncoder, Job, JobOutcome, JobReport, RunSummary};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "presto", version, about = "Batch-optimize videos to H.265 with ffmpeg")]
struct Args {
    /// Number of concurrent encodes; defaults to an automatic heuristic
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    workers: Option<u32>,

    /// Also print the final summary as a JSON object
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt::init();

    let config = BatchConfig::from_env();

    // Hard requirement, checked before any discovery or dispatch.
    if which::which("ffmpeg").is_err() {
        eprintln!("ffmpeg not found on PATH. Install it and try again.");
        std::process::exit(1);
    }

    let started = Instant::now();

    let files = find_video_files(&config.input_dir, &config.extensions);
    if files.is_empty() {
        println!("No video files found under {}", config.input_dir.display());
        return;
    }
    println!(
        "Found {} video files under {}",
        files.len(),
        config.input_dir.display()
    );

    let encoder = FfmpegEncoder::new();
    let profile = resolve_profile(&config, &encoder).await;
    println!(
        "Encoding with {} ({} {})",
        profile.video_codec, profile.quality_flag, profile.quality
    );

    // Build jobs up front. A file that cannot be mapped under the input
    // root becomes a failed report instead of aborting the batch.
    let mut jobs = Vec::new();
    let mut mapping_failures = Vec::new();
    for input_path in files {
        match map_output_path(&input_path, &config.input_dir, &config.output_dir) {
            Ok(output_path) => jobs.push(Job {
                input_path,
                output_path,
            }),
            Err(e) => {
                let reason = e.to_string();
                mapping_failures.push(JobReport::failed(
                    Job {
                        input_path,
                        output_path: config.output_dir.clone(),
                    },
                    reason,
                ));
            }
        }
    }

    let worker_count = resolve_worker_count(
        args.workers.map(|n| n as usize),
        jobs.len(),
        num_cpus::get(),
    );
    println!(
        "Dispatching {} jobs across {} workers\n",
        jobs.len(),
        worker_count
    );

    let total = jobs.len() + mapping_failures.len();
    let mut summary = RunSummary::default();
    let mut completed = 0;

    for report in &mapping_failures {
        completed += 1;
        print_report(completed, total, report);
        summary.record(report);
    }

    let pool = WorkerPool::new(encoder, profile);
    let (mut reports, handles) = pool.start(jobs, worker_count);
    while let Some(report) = reports.recv().await {
        completed += 1;
        print_report(completed, total, &report);
        summary.record(&report);
    }
    futures::future::join_all(handles).await;
    summary.finish(started.elapsed());

    println!("\n{}", summary.render());

    if args.json {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Failed to serialize summary: {}", e),
        }
    }
}

fn print_report(completed: usize, total: usize, report: &JobReport) {
    match &report.outcome {
        JobOutcome::Done {
            before_size,
            after_size,
            elapsed,
        } => println!(
            "[{}/{}] {} -> {} ({} -> {}, {:.1}s)",
            completed,
            total,
            report.job.input_path.display(),
            report.job.output_path.display(),
            human_size(*before_size),
            human_size(*after_size),
            elapsed.as_secs_f64()
        ),
        JobOutcome::Failed { reason } => eprintln!(
            "[{}/{}] FAILED {}: {}",
            completed,
            total,
            report.job.input_path.display(),
            reason
        ),
    }
}
