//! Output store.
//!
//! The store owns every captured output record across all projects in append
//! order. The console reads it fresh on each render pass and only ever removes
//! records through a predicate, never by position, since positions shift as
//! new output arrives.

use crate::model::OutputRecord;
use std::sync::mpsc::{self, Receiver, Sender};

/// Append-ordered collection of output records.
pub trait OutputStore {
    /// Append a record and notify subscribers.
    fn append(&mut self, record: OutputRecord);

    /// All records in append order.
    fn records(&self) -> &[OutputRecord];

    /// Records matching `predicate`, in append order.
    fn query<F>(&self, predicate: F) -> Vec<&OutputRecord>
    where
        F: Fn(&OutputRecord) -> bool,
    {
        self.records().iter().filter(|r| predicate(r)).collect()
    }

    /// Remove every record matching `predicate`. Returns how many were removed.
    fn remove_where<F>(&mut self, predicate: F) -> usize
    where
        F: Fn(&OutputRecord) -> bool;

    /// Receive a copy of every record appended from now on.
    fn subscribe(&mut self) -> Receiver<OutputRecord>;
}

/// A full store evicts this fraction of its capacity at once.
const EVICTION_BATCH_DIVISOR: usize = 8;

/// In-memory [`OutputStore`] with an optional cap on retained records.
#[derive(Debug, Default)]
pub struct MemoryOutputStore {
    records: Vec<OutputRecord>,
    subscribers: Vec<Sender<OutputRecord>>,
    max_records: Option<usize>,
}

impl MemoryOutputStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that drops its oldest records once `max_records` is exceeded.
    ///
    /// Eviction removes an eighth of the capacity at a time, so the store
    /// holds between `7/8 max_records` and `max_records` records once full.
    pub fn with_capacity_limit(max_records: usize) -> Self {
        Self {
            max_records: Some(max_records),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl OutputStore for MemoryOutputStore {
    fn append(&mut self, record: OutputRecord) {
        // Drop subscribers whose receiver is gone
        self.subscribers
            .retain(|subscriber| subscriber.send(record.clone()).is_ok());

        self.records.push(record);

        if let Some(max) = self.max_records {
            if self.records.len() > max {
                // Evict a batch so a full store does not shift on every append
                let excess = self.records.len() - max + max / EVICTION_BATCH_DIVISOR;
                self.records.drain(..excess);
            }
        }
    }

    fn records(&self) -> &[OutputRecord] {
        &self.records
    }

    fn remove_where<F>(&mut self, predicate: F) -> usize
    where
        F: Fn(&OutputRecord) -> bool,
    {
        let before = self.records.len();
        self.records.retain(|r| !predicate(r));
        before - self.records.len()
    }

    fn subscribe(&mut self) -> Receiver<OutputRecord> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }
}
