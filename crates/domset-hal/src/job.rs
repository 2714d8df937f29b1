//! Bookkeeping for one execution of a gate program.
//!
//! A run is recorded when a program is handed to an executor and is
//! settled once the statevector has been evolved and the shots drawn, or
//! once a check (size, zero checkpoint, gate after measurement) has
//! stopped it. Local executors settle runs inside `submit`, so callers
//! rarely see the in-between states.
//!
//! ```text
//!   Queued → Running → Completed
//!                    ↘ Failed(reason)
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Handle returned by `submit`, used to look the run up again.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Where a run stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    /// Recorded, not yet evolving.
    Queued,
    /// Evolving or sampling.
    Running,
    /// Counts are ready to fetch.
    Completed,
    /// Stopped by a failed check; carries the executor's message.
    Failed(String),
}

impl JobStatus {
    /// `Completed` or `Failed`: the run will not change again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed(_))
    }

    pub fn is_success(&self) -> bool {
        *self == Self::Completed
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Queued => f.write_str("queued"),
            Self::Running => f.write_str("running"),
            Self::Completed => f.write_str("completed"),
            Self::Failed(reason) => write!(f, "failed ({reason})"),
        }
    }
}

/// One run of a program for a fixed number of shots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub status: JobStatus,
    pub shots: u32,
    /// When the program was handed over.
    pub created_at: DateTime<Utc>,
    /// When evolution began.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    /// When the run settled, successfully or not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    /// Executor name, for logs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,
}

impl Job {
    pub fn new(id: impl Into<JobId>, shots: u32) -> Self {
        Self {
            id: id.into(),
            status: JobStatus::Queued,
            shots,
            created_at: Utc::now(),
            started_at: None,
            finished_at: None,
            backend: None,
        }
    }

    pub fn with_backend(mut self, backend: impl Into<String>) -> Self {
        self.backend = Some(backend.into());
        self
    }

    /// Advance to `status` and stamp the matching time.
    ///
    /// A settled run keeps its status and timestamps.
    pub fn transition(&mut self, status: JobStatus) {
        if self.status.is_terminal() {
            return;
        }
        let now = Utc::now();
        if status == JobStatus::Running {
            self.started_at.get_or_insert(now);
        }
        if status.is_terminal() {
            self.finished_at.get_or_insert(now);
        }
        self.status = status;
    }

    /// Wall time from start to settle, once both are known.
    pub fn duration(&self) -> Option<chrono::Duration> {
        Some(self.finished_at? - self.started_at?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_run_settles_with_reason() {
        let mut job = Job::new("run-7", 64);
        job.transition(JobStatus::Running);
        job.transition(JobStatus::Failed("dirty scratch".into()));

        assert!(job.status.is_terminal());
        assert!(!job.status.is_success());
        assert_eq!(job.status.to_string(), "failed (dirty scratch)");
        assert!(job.duration().is_some_and(|d| d >= chrono::Duration::zero()));
    }

    #[test]
    fn test_settled_run_is_frozen() {
        let mut job = Job::new("run-8", 1024).with_backend("statevector");
        assert!(job.duration().is_none());

        job.transition(JobStatus::Completed);
        let finished = job.finished_at;
        assert!(finished.is_some());
        assert!(job.started_at.is_none());

        job.transition(JobStatus::Running);
        job.transition(JobStatus::Failed("late".into()));
        assert_eq!(job.status, JobStatus::Completed);
        assert_eq!(job.finished_at, finished);
        assert_eq!(job.backend.as_deref(), Some("statevector"));
    }
}
