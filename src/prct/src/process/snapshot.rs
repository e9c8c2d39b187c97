//! Point-in-time copy of the process table.
//!
//! Capturing reads every process once, so later queries see a consistent
//! forest instead of the freshest one. The same type doubles as a fixed
//! in-memory forest for tests.

use eyre::Result;
use std::collections::BTreeMap;
use tracing::debug;

use super::{Pid, ProcState, ProcessInfoSource};

/// Metadata recorded for one process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessEntry {
    pub pid: Pid,
    pub ppid: Option<Pid>,
    pub state: Option<ProcState>,
}

impl ProcessEntry {
    pub fn new(pid: Pid, ppid: Pid, state: ProcState) -> Self {
        Self {
            pid,
            ppid: Some(ppid),
            state: Some(state),
        }
    }
}

/// Process table keyed by PID; enumerates in ascending PID order.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    entries: BTreeMap<Pid, ProcessEntry>,
}

impl Snapshot {
    /// Read every process visible through `source` once.
    ///
    /// Processes that vanish between listing and reading are left out.
    pub fn capture<S: ProcessInfoSource + ?Sized>(source: &S) -> Result<Self> {
        let mut entries = BTreeMap::new();
        for pid in source.pids()? {
            let ppid = source.parent_of(pid);
            let state = source.state_of(pid);
            if ppid.is_none() && state.is_none() {
                continue;
            }
            entries.insert(pid, ProcessEntry { pid, ppid, state });
        }
        debug!("Captured {} processes", entries.len());
        Ok(Self { entries })
    }

    pub fn from_entries(entries: impl IntoIterator<Item = ProcessEntry>) -> Self {
        Self {
            entries: entries.into_iter().map(|entry| (entry.pid, entry)).collect(),
        }
    }

    pub fn insert(&mut self, entry: ProcessEntry) {
        self.entries.insert(entry.pid, entry);
    }

    pub fn get(&self, pid: Pid) -> Option<&ProcessEntry> {
        self.entries.get(&pid)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<ProcessEntry> for Snapshot {
    fn from_iter<I: IntoIterator<Item = ProcessEntry>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}

impl ProcessInfoSource for Snapshot {
    fn pids(&self) -> Result<Vec<Pid>> {
        Ok(self.entries.keys().copied().collect())
    }

    fn parent_of(&self, pid: Pid) -> Option<Pid> {
        self.entries.get(&pid)?.ppid
    }

    fn state_of(&self, pid: Pid) -> Option<ProcState> {
        self.entries.get(&pid)?.state
    }
}
