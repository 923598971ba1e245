use std::iter::Rev;
use std::ops::Deref;
use std::vec::Drain;

use crate::tempus_assert_simple;

/// An undo log of changes, partitioned into checkpoints.
///
/// Entries recorded at checkpoint 0 can never be undone, so they are not retained.
#[derive(Clone, Debug)]
pub(crate) struct Trail<T> {
    current_checkpoint: usize,
    /// At index i is the position where the i-th checkpoint ends (exclusive) on the trail
    trail_delimiter: Vec<usize>,
    trail: Vec<T>,
}

// We explicitly implement the Default and not as a macro, because we want to avoid imposing Default
// on the generic type T.
impl<T> Default for Trail<T> {
    fn default() -> Self {
        Trail {
            current_checkpoint: Default::default(),
            trail_delimiter: Default::default(),
            trail: Default::default(),
        }
    }
}

impl<T> Trail<T> {
    pub(crate) fn new_checkpoint(&mut self) {
        self.current_checkpoint += 1;
        self.trail_delimiter.push(self.trail.len());
    }

    pub(crate) fn get_checkpoint(&self) -> usize {
        self.current_checkpoint
    }

    /// Undoes every checkpoint beyond `new_checkpoint`, yielding the entries most recent first.
    pub(crate) fn synchronise(&mut self, new_checkpoint: usize) -> Rev<Drain<'_, T>> {
        tempus_assert_simple!(new_checkpoint < self.current_checkpoint);

        let new_trail_len = self.trail_delimiter[new_checkpoint];

        self.current_checkpoint = new_checkpoint;
        self.trail_delimiter.truncate(new_checkpoint);
        self.trail.drain(new_trail_len..).rev()
    }

    /// Folds the entries of the current checkpoint into the previous one; the changes they
    /// describe are kept and will be undone together with the previous checkpoint.
    pub(crate) fn merge_into_previous_checkpoint(&mut self) {
        tempus_assert_simple!(self.current_checkpoint > 0);

        let _ = self.trail_delimiter.pop();
        self.current_checkpoint -= 1;

        if self.current_checkpoint == 0 {
            self.trail.clear();
        }
    }

    pub(crate) fn push(&mut self, elem: T) {
        if self.current_checkpoint > 0 {
            self.trail.push(elem)
        }
    }
}

impl<T> Deref for Trail<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.trail
    }
}
