//! Background stitching behind a channel boundary.
//!
//! A [`StitchWorker`] owns one thread. Callers [`submit`](StitchWorker::submit)
//! a job and later receive a [`StitchOutcome`]. Only one job is accepted at a
//! time; a second submit while busy is refused. [`cancel`](StitchWorker::cancel)
//! is cooperative and takes effect at the next stage boundary.

use crate::diagnostics::StitchReport;
use crate::error::Result;
use crate::image::PixelBuffer;
use crate::paper::PaperSpec;
use crate::pipeline::{CancelToken, StitchParams, Stitcher};
use log::debug;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, RecvError, Sender, TryRecvError};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use thiserror::Error;

pub type JobId = u64;

/// Input for one run.
#[derive(Debug)]
pub struct StitchJob {
    pub top: PixelBuffer,
    pub bottom: PixelBuffer,
    pub paper: PaperSpec,
}

/// Result delivered for a submitted job.
#[derive(Debug)]
pub struct StitchOutcome {
    pub job_id: JobId,
    pub result: Result<(PixelBuffer, StitchReport)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("a stitching job is already running")]
    Busy,
    #[error("the stitching worker has stopped")]
    Disconnected,
}

/// Clears the busy flag when the job ends, including by unwinding.
struct IdleOnDrop<'a>(&'a AtomicBool);

impl Drop for IdleOnDrop<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

struct Envelope {
    id: JobId,
    job: StitchJob,
    cancel: CancelToken,
}

pub struct StitchWorker {
    jobs: Option<Sender<Envelope>>,
    outcomes: Receiver<StitchOutcome>,
    busy: Arc<AtomicBool>,
    current: Arc<Mutex<Option<CancelToken>>>,
    next_id: AtomicU64,
    handle: Option<JoinHandle<()>>,
}

impl StitchWorker {
    pub fn spawn(params: StitchParams) -> Self {
        let (job_tx, job_rx) = mpsc::channel::<Envelope>();
        let (out_tx, out_rx) = mpsc::channel();
        let busy = Arc::new(AtomicBool::new(false));
        let worker_busy = Arc::clone(&busy);

        let handle = thread::Builder::new()
            .name("scan-stitch-worker".into())
            .spawn(move || {
                let stitcher = Stitcher::new(params);
                for Envelope { id, job, cancel } in job_rx {
                    debug!("worker: starting job {id}");
                    let idle = IdleOnDrop(&worker_busy);
                    let result =
                        stitcher.process_cancellable(job.top, job.bottom, &job.paper, &cancel);
                    drop(idle);
                    if out_tx.send(StitchOutcome { job_id: id, result }).is_err() {
                        break;
                    }
                }
            })
            .ok();

        Self {
            jobs: Some(job_tx),
            outcomes: out_rx,
            busy,
            current: Arc::new(Mutex::new(None)),
            next_id: AtomicU64::new(1),
            handle,
        }
    }

    /// Queue `job` unless another one is still running.
    pub fn submit(&self, job: StitchJob) -> std::result::Result<JobId, SubmitError> {
        self.submit_with_cancel(job, CancelToken::new())
    }

    /// Like [`submit`](Self::submit), but the job observes a token the caller
    /// also holds. [`cancel`](Self::cancel) trips the same token.
    pub fn submit_with_cancel(
        &self,
        job: StitchJob,
        cancel: CancelToken,
    ) -> std::result::Result<JobId, SubmitError> {
        let jobs = match (&self.jobs, &self.handle) {
            (Some(jobs), Some(handle)) if !handle.is_finished() => jobs,
            _ => return Err(SubmitError::Disconnected),
        };
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(SubmitError::Busy);
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut current) = self.current.lock() {
            *current = Some(cancel.clone());
        }
        jobs.send(Envelope { id, job, cancel }).map_err(|_| {
            self.busy.store(false, Ordering::SeqCst);
            SubmitError::Disconnected
        })?;
        Ok(id)
    }

    /// Request cancellation of the running job, if any.
    pub fn cancel(&self) {
        if let Ok(current) = self.current.lock() {
            if let Some(token) = current.as_ref() {
                token.cancel();
            }
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Block until the next outcome arrives.
    pub fn recv(&self) -> std::result::Result<StitchOutcome, RecvError> {
        self.outcomes.recv()
    }

    pub fn try_recv(&self) -> std::result::Result<StitchOutcome, TryRecvError> {
        self.outcomes.try_recv()
    }
}

impl Drop for StitchWorker {
    fn drop(&mut self) {
        self.cancel();
        // Closing the job channel ends the worker loop.
        self.jobs.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
