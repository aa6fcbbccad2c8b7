use crate::job::InsightJob;
use crate::result::{InsightError, InsightResult};

/// Which job kinds a scheduler accepts.
///
/// - `Any`: run every job (shared worker).
/// - `Only`: accept a single job kind (dedicated worker).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum JobScope {
    Any,
    Only(&'static str),
}

impl JobScope {
    pub fn allows(&self, kind: &str) -> bool {
        match self {
            JobScope::Any => true,
            JobScope::Only(k) => *k == kind,
        }
    }
}

/// Executor for insight jobs.
pub trait InsightScheduler: Send + Sync + 'static {
    fn scope(&self) -> JobScope;

    fn run<J: InsightJob>(&self, job: J) -> Result<InsightResult, InsightError> {
        if !self.scope().allows(job.kind()) {
            return Err(InsightError::OutOfScope {
                kind: job.kind().to_string(),
            });
        }
        tracing::debug!(kind = job.kind(), "running insight job");
        job.run()
    }
}

/// Synchronous scheduler that runs jobs immediately in-process.
#[derive(Debug, Copy, Clone)]
pub struct LocalInsightScheduler {
    scope: JobScope,
}

impl LocalInsightScheduler {
    pub fn new(scope: JobScope) -> Self {
        Self { scope }
    }

    pub fn any() -> Self {
        Self::new(JobScope::Any)
    }
}

impl InsightScheduler for LocalInsightScheduler {
    fn scope(&self) -> JobScope {
        self.scope
    }
}
