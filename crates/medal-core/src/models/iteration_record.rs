use serde::{Deserialize, Serialize};

/// The loop's persistent cursor.
///
/// `al_iter` is 1-indexed once the loop has started; 0 means no iteration
/// has begun yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IterationRecord {
    pub al_iter: u32,
    /// Last completed epoch within `al_iter`.
    pub epoch: u32,
    /// Set once every training index is labeled.
    pub exhausted: bool,
}

/// Where a (re)started loop picks up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumePoint {
    /// Start `al_iter` from scratch: select points, label, train from epoch 1.
    Fresh { al_iter: u32 },
    /// Finish an interrupted iteration whose points are already labeled.
    Continue { al_iter: u32, epoch: u32 },
}

impl IterationRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the starting point given the per-iteration epoch budget.
    pub fn resume_point(&self, epochs: u32) -> ResumePoint {
        if self.al_iter == 0 || self.iteration_complete(epochs) {
            ResumePoint::Fresh {
                al_iter: self.al_iter + 1,
            }
        } else {
            ResumePoint::Continue {
                al_iter: self.al_iter,
                epoch: self.epoch,
            }
        }
    }

    /// Move the cursor to a new iteration and reset the epoch counter.
    pub fn begin_iteration(&mut self, al_iter: u32) {
        self.al_iter = al_iter;
        self.epoch = 0;
    }

    /// True once `epoch` has reached the per-iteration budget.
    pub fn iteration_complete(&self, epochs: u32) -> bool {
        self.epoch >= epochs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_record_starts_at_iteration_one() {
        let record = IterationRecord::new();
        assert_eq!(record.resume_point(5), ResumePoint::Fresh { al_iter: 1 });
    }

    #[test]
    fn finished_iteration_advances() {
        let record = IterationRecord {
            al_iter: 3,
            epoch: 5,
            exhausted: false,
        };
        assert_eq!(record.resume_point(5), ResumePoint::Fresh { al_iter: 4 });
    }

    #[test]
    fn interrupted_iteration_continues_at_epoch() {
        let record = IterationRecord {
            al_iter: 3,
            epoch: 2,
            exhausted: false,
        };
        assert_eq!(
            record.resume_point(5),
            ResumePoint::Continue { al_iter: 3, epoch: 2 }
        );
    }

    #[test]
    fn begin_iteration_resets_epoch() {
        let mut record = IterationRecord {
            al_iter: 1,
            epoch: 7,
            exhausted: false,
        };
        record.begin_iteration(2);
        assert_eq!(record.al_iter, 2);
        assert_eq!(record.epoch, 0);
        assert!(!record.iteration_complete(1));
    }
}
