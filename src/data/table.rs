use crate::core::types::PlaylistTrackRecord;

/// The loaded dataset.
///
/// Built once by the loader and only handed out by shared reference
/// afterwards; nothing in the crate can mutate rows after load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaylistTable {
    records: Vec<PlaylistTrackRecord>,
}

impl PlaylistTable {
    pub fn from_records(records: Vec<PlaylistTrackRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[PlaylistTrackRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlaylistTrackRecord> {
        self.records.iter()
    }

    /// At most `n` leading rows in file order.
    pub fn head(&self, n: usize) -> &[PlaylistTrackRecord] {
        &self.records[..n.min(self.records.len())]
    }
}

impl<'a> IntoIterator for &'a PlaylistTable {
    type Item = &'a PlaylistTrackRecord;
    type IntoIter = std::slice::Iter<'a, PlaylistTrackRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
