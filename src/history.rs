use crate::snapshot::Snapshot;

/// Ordered stack of surface snapshots with a cursor.
///
/// `step` always points at the next slot to fill: snapshots below `step` are
/// done, the ones at or above it form a redo branch that the next commit
/// throws away.
#[derive(Debug, Default, Clone)]
pub struct SnapshotHistory {
    snapshots: Vec<Snapshot>,
    step: usize,
}

impl SnapshotHistory {
    /// Creates a new empty history
    pub fn new() -> Self {
        Self {
            snapshots: Vec::new(),
            step: 0,
        }
    }

    /// Truncate the redo branch, append `snapshot` and move the cursor past it
    pub fn commit(&mut self, snapshot: Snapshot) {
        let discarded = self.snapshots.len() - self.step;
        if discarded > 0 {
            log::debug!("Commit discards {} redo snapshot(s)", discarded);
        }
        self.snapshots.truncate(self.step);
        self.snapshots.push(snapshot);
        self.step = self.snapshots.len();
    }

    /// Where an undo would move the cursor, and the snapshot to show there.
    ///
    /// `None` when there is nothing to undo. The inner `None` means the blank
    /// surface.
    pub fn undo_target(&self) -> Option<(usize, Option<&Snapshot>)> {
        if self.step == 0 {
            return None;
        }
        let target = self.step - 1;
        let shown = target.checked_sub(1).and_then(|i| self.snapshots.get(i));
        Some((target, shown))
    }

    /// Where a redo would move the cursor, and the snapshot to show there
    pub fn redo_target(&self) -> Option<(usize, &Snapshot)> {
        self.snapshots.get(self.step).map(|snapshot| (self.step + 1, snapshot))
    }

    /// Move the cursor once a restore to `step` has been applied
    pub(crate) fn set_step(&mut self, step: usize) {
        debug_assert!(step <= self.snapshots.len());
        self.step = step.min(self.snapshots.len());
    }

    /// Drop every snapshot and reset the cursor
    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.step = 0;
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Returns true if there are snapshots that can be undone
    pub fn can_undo(&self) -> bool {
        self.step > 0
    }

    /// Returns true if there are snapshots that can be redone
    pub fn can_redo(&self) -> bool {
        self.step < self.snapshots.len()
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }
}
