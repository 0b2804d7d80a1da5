use crate::orchestrator::ResultRecord;

/// Session history of query results plus the version currently shown.
///
/// Records are only ever appended; `current` always indexes an existing record.
#[derive(Debug, Default)]
pub struct History {
    records: Vec<ResultRecord>,
    current: Option<usize>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HistoryError {
    #[error("version {index} does not exist (history has {len} entries)")]
    OutOfRange { index: usize, len: usize },
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and make it current. Returns its index.
    pub fn append_and_select(&mut self, record: ResultRecord) -> usize {
        self.records.push(record);
        let index = self.records.len() - 1;
        self.current = Some(index);
        tracing::debug!(index, len = self.records.len(), "history appended");
        index
    }

    /// Show an earlier version without touching the list.
    pub fn select(&mut self, index: usize) -> Result<(), HistoryError> {
        if index >= self.records.len() {
            return Err(HistoryError::OutOfRange {
                index,
                len: self.records.len(),
            });
        }
        self.current = Some(index);
        Ok(())
    }

    pub fn current(&self) -> Option<&ResultRecord> {
        self.current.and_then(|i| self.records.get(i))
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn get(&self, index: usize) -> Option<&ResultRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResultRecord> {
        self.records.iter()
    }
}
