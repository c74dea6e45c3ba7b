use std::fmt;
use std::sync::Arc;

use tracing::{error, info};

use crate::error::PipelineError;

/// The five sequential stages of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PipelineStage {
    Load,
    Clean,
    Encode,
    Merge,
    Write,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Load => "load",
            PipelineStage::Clean => "clean",
            PipelineStage::Encode => "encode",
            PipelineStage::Merge => "merge",
            PipelineStage::Write => "write",
        };
        f.write_str(name)
    }
}

/// Context about a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageContext {
    pub stage: PipelineStage,
}

/// Shape of a stage's output.
///
/// For stages producing several tables (load, clean, encode) these are the totals across
/// ratings, movies and users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageStats {
    pub rows: usize,
    pub columns: usize,
}

/// Observer interface for pipeline progress.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait PipelineObserver: Send + Sync {
    /// Called after a stage completes.
    fn on_stage_complete(&self, _ctx: &StageContext, _stats: StageStats) {}

    /// Called once when the run fails, with the stage that failed.
    fn on_failure(&self, _ctx: &StageContext, _error: &PipelineError) {}
}

/// Ignores every event.
#[derive(Debug, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn PipelineObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn PipelineObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl PipelineObserver for CompositeObserver {
    fn on_stage_complete(&self, ctx: &StageContext, stats: StageStats) {
        for o in &self.observers {
            o.on_stage_complete(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &StageContext, error: &PipelineError) {
        for o in &self.observers {
            o.on_failure(ctx, error);
        }
    }
}

/// Logs pipeline events through `tracing`.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn on_stage_complete(&self, ctx: &StageContext, stats: StageStats) {
        info!(
            stage = %ctx.stage,
            rows = stats.rows,
            columns = stats.columns,
            "stage complete"
        );
    }

    fn on_failure(&self, ctx: &StageContext, error: &PipelineError) {
        error!(stage = %ctx.stage, err = %error, "pipeline failed");
    }
}
