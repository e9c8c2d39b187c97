//! Read-only view of the process table.

use eyre::Result;

use super::{Pid, ProcState};

/// Where process metadata comes from.
///
/// The live implementation is [`ProcFs`](super::ProcFs); a
/// [`Snapshot`](super::Snapshot) answers the same questions from a table
/// captured once. Lookups return `None` when the process is gone or its
/// record cannot be read, which is never treated as an error.
pub trait ProcessInfoSource {
    /// Every process id currently visible, in no particular order.
    ///
    /// Fails only when the table itself cannot be listed.
    fn pids(&self) -> Result<Vec<Pid>>;

    fn parent_of(&self, pid: Pid) -> Option<Pid>;

    fn state_of(&self, pid: Pid) -> Option<ProcState>;
}

impl<S: ProcessInfoSource + ?Sized> ProcessInfoSource for &S {
    fn pids(&self) -> Result<Vec<Pid>> {
        (**self).pids()
    }

    fn parent_of(&self, pid: Pid) -> Option<Pid> {
        (**self).parent_of(pid)
    }

    fn state_of(&self, pid: Pid) -> Option<ProcState> {
        (**self).state_of(pid)
    }
}

impl<S: ProcessInfoSource + ?Sized> ProcessInfoSource for Box<S> {
    fn pids(&self) -> Result<Vec<Pid>> {
        (**self).pids()
    }

    fn parent_of(&self, pid: Pid) -> Option<Pid> {
        (**self).parent_of(pid)
    }

    fn state_of(&self, pid: Pid) -> Option<ProcState> {
        (**self).state_of(pid)
    }
}
