//! Bounded worker pool dispatching transcode jobs.

use crate::application::runner::run_job;
use crate::domain::jobs::{Job, JobReport};
use crate::domain::profile::EncoderProfile;
use crate::ports::encoder::EncoderPort;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Pick the number of concurrent workers. An explicit request always wins.
/// The encoder is multi-threaded on its own, so the automatic heuristic
/// stays well below the CPU count: tiny batches serialize, modest machines
/// cap at 3, bigger ones get half their cores.
pub fn resolve_worker_count(requested: Option<usize>, job_count: usize, cpu_count: usize) -> usize {
    if let Some(n) = requested {
        return n.max(1);
    }
    if job_count <= 2 {
        return 1;
    }
    if cpu_count <= 8 {
        3.min(job_count)
    } else {
        (cpu_count / 2).min(job_count)
    }
}

/// Fixed-size pool of worker tasks draining a shared job queue. Reports
/// arrive on the returned channel in completion order; the collector is the
/// only one mutating totals, so no locking is needed downstream.
pub struct WorkerPool<E> {
    encoder: Arc<E>,
    profile: Arc<EncoderProfile>,
}

impl<E: EncoderPort + 'static> WorkerPool<E> {
    pub fn new(encoder: E, profile: EncoderProfile) -> Self {
        Self {
            encoder: Arc::new(encoder),
            profile: Arc::new(profile),
        }
    }

    /// Spawn `worker_count` tasks over `jobs`. Returns the completion stream
    /// and the worker handles; the stream ends once every job has produced
    /// exactly one report and the workers have exited.
    pub fn start(
        &self,
        jobs: Vec<Job>,
        worker_count: usize,
    ) -> (mpsc::UnboundedReceiver<JobReport>, Vec<JoinHandle<()>>) {
        let queue = Arc::new(Mutex::new(VecDeque::from(jobs)));
        let (tx, rx) = mpsc::unbounded_channel();

        let handles = (0..worker_count)
            .map(|id| {
                let queue = queue.clone();
                let tx = tx.clone();
                let encoder = self.encoder.clone();
                let profile = self.profile.clone();
                tokio::spawn(async move {
                    worker_loop(id, queue, encoder, profile, tx).await;
                })
            })
            .collect();

        (rx, handles)
    }
}

async fn worker_loop<E: EncoderPort>(
    worker_id: usize,
    queue: Arc<Mutex<VecDeque<Job>>>,
    encoder: Arc<E>,
    profile: Arc<EncoderProfile>,
    tx: mpsc::UnboundedSender<JobReport>,
) {
    loop {
        // Guard is dropped before the await below.
        let job = match queue.lock().unwrap().pop_front() {
            Some(job) => job,
            None => break,
        };

        println!(
            "[Worker {}] Encoding {}",
            worker_id,
            job.input_path.display()
        );

        let report = run_job(&job, &profile, encoder.as_ref()).await;

        // A job failure is just a report; siblings keep running.
        if tx.send(report).is_err() {
            break;
        }
    }
}
