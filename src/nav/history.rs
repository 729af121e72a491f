//! Session history: one `(url, title)` entry per navigation, with a cursor.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub url: String,
    pub title: String,
}

#[derive(Debug, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
    idx: usize,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an entry for a completed navigation. Truncates forward entries
    /// first, the way a browser drops forward history on a new navigation.
    /// Re-navigating to the current entry is a no-op.
    pub fn push(&mut self, url: impl Into<String>, title: impl Into<String>) {
        let entry = HistoryEntry {
            url: url.into(),
            title: title.into(),
        };
        if let Some(current) = self.current() {
            if current.url == entry.url {
                return;
            }
        }
        self.entries.truncate(self.idx + 1);
        self.entries.push(entry);
        self.idx = self.entries.len() - 1;
    }

    pub fn current(&self) -> Option<&HistoryEntry> {
        self.entries.get(self.idx)
    }

    /// Move one step back; returns the entry now under the cursor.
    pub fn back(&mut self) -> Option<&HistoryEntry> {
        if self.idx > 0 {
            self.idx -= 1;
            self.entries.get(self.idx)
        } else {
            None
        }
    }

    /// Move one step forward; returns the entry now under the cursor.
    pub fn forward(&mut self) -> Option<&HistoryEntry> {
        if self.idx + 1 < self.entries.len() {
            self.idx += 1;
            self.entries.get(self.idx)
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
