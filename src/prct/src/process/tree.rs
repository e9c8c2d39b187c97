//! Process tree traversal
//!
//! Every query re-enumerates the source and filters by parent id; there is
//! no native "children of X" lookup to lean on. With the live `/proc`
//! source each tree level costs a full scan, so recursive queries are
//! O(processes x depth). The table may change under a traversal, so a
//! process that forks or exits mid-scan can be missed or seen twice.

use eyre::Result;
use tracing::debug;

use super::{ancestry::is_in_tree, Pid, ProcState, ProcessInfoSource};

/// PID of the process manager that adopts orphaned processes.
pub const DEFAULT_INIT_PID: Pid = 1;

/// Selection rule for [`ProcessTree::descendants`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DescendantFilter {
    /// Only report zombie processes.
    pub defunct_only: bool,
    /// Only report processes whose parent is the init PID.
    pub orphan_only: bool,
    /// Descend into every child, matched or not.
    pub recursive: bool,
}

impl DescendantFilter {
    /// Zombies anywhere below the process.
    pub fn defunct() -> Self {
        Self {
            defunct_only: true,
            orphan_only: false,
            recursive: true,
        }
    }

    /// Orphans anywhere below the process.
    pub fn orphans() -> Self {
        Self {
            defunct_only: false,
            orphan_only: true,
            recursive: true,
        }
    }
}

/// Queries over the process forest exposed by a [`ProcessInfoSource`].
#[derive(Debug, Clone)]
pub struct ProcessTree<S> {
    source: S,
    init_pid: Pid,
}

impl<S: ProcessInfoSource> ProcessTree<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            init_pid: DEFAULT_INIT_PID,
        }
    }

    pub fn with_init_pid(mut self, init_pid: Pid) -> Self {
        self.init_pid = init_pid;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn pids(&self) -> Result<Vec<Pid>> {
        self.source.pids()
    }

    pub fn parent_of(&self, pid: Pid) -> Option<Pid> {
        self.source.parent_of(pid)
    }

    pub fn state_of(&self, pid: Pid) -> Option<ProcState> {
        self.source.state_of(pid)
    }

    /// Whether `pid` is `root` or one of its descendants.
    pub fn contains(&self, root: Pid, pid: Pid) -> bool {
        is_in_tree(&self.source, root, pid)
    }

    /// Zombie check; a vanished process counts as not defunct.
    pub fn is_defunct(&self, pid: Pid) -> bool {
        self.state_of(pid).is_some_and(ProcState::is_zombie)
    }

    pub fn is_orphan(&self, pid: Pid) -> bool {
        self.parent_of(pid) == Some(self.init_pid)
    }

    /// Direct children of `pid`.
    pub fn children(&self, pid: Pid) -> Result<Vec<Pid>> {
        Ok(self
            .pids()?
            .into_iter()
            .filter(|&child| self.parent_of(child) == Some(pid))
            .collect())
    }

    /// Processes whose grandparent is `pid`.
    pub fn grandchildren(&self, pid: Pid) -> Result<Vec<Pid>> {
        Ok(self
            .pids()?
            .into_iter()
            .filter(|&child| {
                self.parent_of(child).and_then(|parent| self.parent_of(parent)) == Some(pid)
            })
            .collect())
    }

    /// Descendants of `pid` that are not its direct children.
    ///
    /// A process matches when its grandparent or great-grandparent is
    /// `pid`; every match is reported and then searched the same way,
    /// depth first. Deeper levels are only reached through those
    /// recursive searches, which can report a deep process more than once.
    pub fn non_direct_descendants(&self, pid: Pid) -> Result<Vec<Pid>> {
        let mut found = Vec::new();
        self.collect_non_direct(pid, &mut found)?;
        Ok(found)
    }

    fn collect_non_direct(&self, pid: Pid, found: &mut Vec<Pid>) -> Result<()> {
        for candidate in self.pids()? {
            let Some(parent) = self.parent_of(candidate) else {
                continue;
            };
            if parent == 0 || parent == pid {
                continue;
            }

            let grandparent = self.parent_of(parent);
            let matched = grandparent == Some(pid)
                || grandparent.and_then(|gp| self.parent_of(gp)) == Some(pid);

            if matched {
                found.push(candidate);
                self.collect_non_direct(candidate, found)?;
            }
        }
        Ok(())
    }

    /// Number of zombies anywhere in the subtree below `pid`.
    pub fn count_defunct_descendants(&self, pid: Pid) -> Result<usize> {
        let mut count = 0;
        for child in self.children(pid)? {
            if self.is_defunct(child) {
                count += 1;
            }
            count += self.count_defunct_descendants(child)?;
        }
        Ok(count)
    }

    /// Children of `pid` (and, with `filter.recursive`, all deeper
    /// descendants) that pass `filter`, in depth-first order.
    pub fn descendants(&self, pid: Pid, filter: DescendantFilter) -> Result<Vec<Pid>> {
        let mut found = Vec::new();
        self.collect_descendants(pid, filter, &mut found)?;
        debug!("{} descendants of PID {} match {:?}", found.len(), pid, filter);
        Ok(found)
    }

    fn collect_descendants(
        &self,
        pid: Pid,
        filter: DescendantFilter,
        found: &mut Vec<Pid>,
    ) -> Result<()> {
        for child in self.pids()? {
            let parent = self.parent_of(child);
            if parent != Some(pid) {
                continue;
            }

            let matched = (filter.defunct_only && self.is_defunct(child))
                || (filter.orphan_only && parent == Some(self.init_pid))
                || (!filter.defunct_only && !filter.orphan_only);
            if matched {
                found.push(child);
            }

            if filter.recursive {
                self.collect_descendants(child, filter, found)?;
            }
        }
        Ok(())
    }

    /// Other children of `pid`'s parent; empty if the parent is unknown.
    pub fn siblings(&self, pid: Pid, zombies_only: bool) -> Result<Vec<Pid>> {
        let Some(parent) = self.parent_of(pid) else {
            return Ok(Vec::new());
        };

        Ok(self
            .pids()?
            .into_iter()
            .filter(|&other| other != pid && self.parent_of(other) == Some(parent))
            .filter(|&other| !zombies_only || self.is_defunct(other))
            .collect())
    }
}
