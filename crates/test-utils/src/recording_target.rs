use std::sync::{Arc, Mutex};

use cmdstub::errors::Result;
use cmdstub::shell::{Command, Process, Target};
use tokio_util::sync::CancellationToken;

/// A target wrapper that:
/// - records the canonical line of every command it is asked to start
/// - delegates the actual start to the wrapped target.
pub struct RecordingTarget<T> {
    inner: T,
    started: Arc<Mutex<Vec<String>>>,
}

impl<T: Target> RecordingTarget<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            started: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Canonical lines seen so far, in start order.
    pub fn started(&self) -> Vec<String> {
        self.started.lock().unwrap().clone()
    }
}

impl<T: Target> Target for RecordingTarget<T> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn start(&self, ctx: &CancellationToken, cmd: &Command) -> Result<Box<dyn Process>> {
        {
            let mut guard = self.started.lock().unwrap();
            guard.push(cmd.canonical_line());
        }
        self.inner.start(ctx, cmd)
    }
}
