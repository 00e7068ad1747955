/// Per-run counters for the consumer loop
///
/// `total_before` is the durable row count read when the run started. Only
/// rows that were actually inserted advance `persisted`, so after every
/// successful persist the store holds `total_before + persisted` rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionCounters {
    /// Rows in the store when the run started
    pub total_before: u64,

    /// Rows inserted by this run
    pub persisted: u64,

    /// Products whose name was already stored
    pub already_stored: u64,

    /// Items dropped because navigation, extraction or storage failed
    pub failed: u64,
}

impl SessionCounters {
    pub fn new(total_before: u64) -> Self {
        Self {
            total_before,
            ..Self::default()
        }
    }

    pub fn record_persisted(&mut self) {
        self.persisted += 1;
    }

    pub fn record_already_stored(&mut self) {
        self.already_stored += 1;
    }

    pub fn record_failed(&mut self) {
        self.failed += 1;
    }

    /// Ordinal of the product about to be processed, counted across runs
    pub fn next_ordinal(&self) -> u64 {
        self.total_before + self.persisted + 1
    }

    /// Row count the store should report now
    pub fn expected_total(&self) -> u64 {
        self.total_before + self.persisted
    }

    /// Number of emitted links the loop has handled
    pub fn handled(&self) -> u64 {
        self.persisted + self.already_stored + self.failed
    }
}
