use std::collections::HashSet;

/// Links already seen during one traversal
///
/// Owned by a single walker and dropped with it. Links are compared by exact
/// string equality.
#[derive(Debug, Default)]
pub struct DedupLedger {
    seen: HashSet<String>,
}

impl DedupLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a link, returning false if it was already present
    pub fn insert(&mut self, link: &str) -> bool {
        self.seen.insert(link.to_string())
    }

    pub fn contains(&self, link: &str) -> bool {
        self.seen.contains(link)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
