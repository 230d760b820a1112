/// Outcome of one (native, prediction) pair, as reported to progress listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairStatus {
    Scored,
    Skipped,
    Failed,
}

#[derive(Debug, Clone)]
pub enum Progress {
    BatchStart {
        native: String,
        total: u64,
    },
    PairFinished {
        identifier: String,
        status: PairStatus,
    },
    BatchFinish {
        scored: usize,
        skipped: usize,
        failed: usize,
    },
    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards progress events to an optional callback.
///
/// Reports may come from worker threads during parallel batches, hence the `Send + Sync`
/// bound on the callback.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}
