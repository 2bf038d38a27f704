/// Generation job board — the sequential batch runner's state
///
/// A batch turns an ordered list of work items into job records that the
/// rest of the app only reads. The board enforces the runner's guarantees:
/// every record is published in `Pending` before any network traffic, at
/// most one record is `Generating` at a time, records are attempted in
/// sequence-index order, and a record that reached `Success` or `Error`
/// is never mutated again. Retrying means starting a new batch with fresh
/// records.
///
/// The async half of the loop lives in the iced update cycle: the app asks
/// `begin_next` for the next index, performs the service call, then feeds
/// the outcome back through `settle`.

use super::combos::WorkItem;
use super::wardrobe::ImageBlob;

/// Lifecycle of one job record.
/// `Success` and `Error` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Generating,
    Success,
    Error,
}

impl JobStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Success | JobStatus::Error)
    }
}

/// Tracked state of one work item's generation attempt.
#[derive(Debug, Clone)]
pub struct JobRecord {
    /// Derived from the work item's composition plus the sequence index,
    /// unique within the batch.
    pub id: String,
    pub work: WorkItem,
    pub status: JobStatus,
    pub result: Option<ImageBlob>,
    pub error: Option<String>,
}

/// Batch-level state sampled by the UI.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BatchProgress {
    #[default]
    Idle,
    Running {
        /// Zero-based index of the record currently generating
        current: usize,
        total: usize,
        message: String,
    },
}

/// Owns the job records for one phase. Only the runner mutates records;
/// observers read them through `records()`.
#[derive(Debug, Clone, Default)]
pub struct JobBoard {
    records: Vec<JobRecord>,
    progress: BatchProgress,
}

impl JobBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ordered read view of the current batch's records.
    pub fn records(&self) -> &[JobRecord] {
        &self.records
    }

    pub fn progress(&self) -> &BatchProgress {
        &self.progress
    }

    /// Progress text for the UI, empty when the batch is idle.
    pub fn progress_message(&self) -> &str {
        match &self.progress {
            BatchProgress::Idle => "",
            BatchProgress::Running { message, .. } => message,
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.progress, BatchProgress::Running { .. })
    }

    /// Look up a record by id.
    pub fn record(&self, id: &str) -> Option<&JobRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Publish a fresh batch: one `Pending` record per work item, replacing
    /// any previous batch, so observers see the full batch size and
    /// composition before the first request goes out.
    pub fn start_batch(&mut self, works: Vec<WorkItem>) {
        let total = works.len();

        self.records = works
            .into_iter()
            .enumerate()
            .map(|(index, work)| JobRecord {
                id: format!("{}-{}", work.id_slug(), index),
                work,
                status: JobStatus::Pending,
                result: None,
                error: None,
            })
            .collect();

        self.progress = BatchProgress::Running {
            current: 0,
            total,
            message: String::new(),
        };

        tracing::info!(total, "batch published");
    }

    /// Move the next pending record into `Generating` and publish the
    /// progress message for it. Returns the record's index, or `None` once
    /// every record is terminal — at which point the batch goes idle and
    /// the progress message is cleared.
    pub fn begin_next(&mut self) -> Option<usize> {
        let total = self.records.len();
        let index = self
            .records
            .iter()
            .position(|record| record.status == JobStatus::Pending);

        match index {
            Some(index) => {
                self.records[index].status = JobStatus::Generating;
                self.progress = BatchProgress::Running {
                    current: index,
                    total,
                    message: format!("Generating look {} of {}...", index + 1, total),
                };
                tracing::info!(index, total, "starting generation");
                Some(index)
            }
            None => {
                self.progress = BatchProgress::Idle;
                tracing::info!(total, "batch complete");
                None
            }
        }
    }

    /// Record the outcome of the in-flight item. Success stores the result
    /// image; failure stores a displayable message. Settling a record that
    /// is already terminal is ignored — terminal records are immutable.
    pub fn settle(&mut self, index: usize, outcome: Result<ImageBlob, String>) {
        let Some(record) = self.records.get_mut(index) else {
            return;
        };
        if record.status.is_terminal() {
            return;
        }

        match outcome {
            Ok(image) => {
                record.status = JobStatus::Success;
                record.result = Some(image);
            }
            Err(message) => {
                tracing::warn!(index, error = %message, "generation failed");
                record.status = JobStatus::Error;
                record.error = Some(message);
            }
        }
    }

    /// Drop all records and return to idle. Used when a newly selected
    /// outfit invalidates the previous accessory results.
    pub fn clear(&mut self) {
        self.records.clear();
        self.progress = BatchProgress::Idle;
    }
}
