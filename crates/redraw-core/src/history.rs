//! Linear undo/redo log of full snapshots.
//!
//! Entries `[0..=cursor]` are the past, with `cursor` being the live state;
//! entries after the cursor are the redo tail. Any commit truncates the tail
//! before appending, so there is only ever one timeline.

/// Snapshot history with a cursor.
#[derive(Clone, Debug)]
pub struct History<T> {
    entries: Vec<T>,
    cursor: usize,
    limit: Option<usize>,
}

impl<T: Clone> History<T> {
    /// History whose first entry (cursor 0) is `initial`.
    pub fn new(initial: T) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
            limit: None,
        }
    }

    /// History that keeps at most `limit` snapshots, evicting the oldest.
    /// The live entry is never evicted.
    pub fn with_limit(initial: T, limit: usize) -> Self {
        Self {
            limit: Some(limit.max(1)),
            ..Self::new(initial)
        }
    }

    /// Drop the redo tail, append `snapshot` and make it current.
    pub fn commit(&mut self, snapshot: T) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(snapshot);
        self.cursor = self.entries.len() - 1;
        self.enforce_limit();
    }

    /// Change the cap on kept snapshots. Existing entries over the cap are
    /// evicted oldest first; the live entry always survives, and the redo
    /// tail is shortened only if the past alone cannot make room.
    pub fn set_limit(&mut self, limit: Option<usize>) {
        self.limit = limit.map(|l| l.max(1));
        self.enforce_limit();
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Step back one entry and return the snapshot to restore, or `None`
    /// (and no change) at the start of the log.
    pub fn undo(&mut self) -> Option<&T> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor])
    }

    /// Step forward one entry, or `None` (and no change) at the tail.
    pub fn redo(&mut self) -> Option<&T> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor])
    }

    pub fn current(&self) -> &T {
        &self.entries[self.cursor]
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    fn enforce_limit(&mut self) {
        let Some(limit) = self.limit else {
            return;
        };
        if self.entries.len() <= limit {
            return;
        }
        let front = (self.entries.len() - limit).min(self.cursor);
        self.entries.drain(..front);
        self.cursor -= front;
        self.entries.truncate(limit.max(self.cursor + 1));
    }

    /// Forget everything and start over from `initial`.
    pub fn reset(&mut self, initial: T) {
        self.entries.clear();
        self.entries.push(initial);
        self.cursor = 0;
    }
}
