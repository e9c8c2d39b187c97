//! Subtree membership by walking parent links.

use std::collections::HashSet;
use tracing::debug;

use super::{Pid, ProcessInfoSource};

/// Whether `pid` lies in the subtree rooted at `root`, inclusive.
///
/// Follows parent links from `pid` until `root` is reached (true) or the
/// chain ends at an id of 0 or an unreadable process (false). A PID seen
/// twice means the source reported a cycle; the walk stops with false.
pub fn is_in_tree<S: ProcessInfoSource + ?Sized>(source: &S, root: Pid, pid: Pid) -> bool {
    let mut seen = HashSet::new();
    let mut current = pid;

    while current > 0 {
        if current == root {
            return true;
        }
        if !seen.insert(current) {
            debug!("Parent chain of PID {} loops at {}", pid, current);
            return false;
        }
        match source.parent_of(current) {
            Some(parent) => current = parent,
            None => return false,
        }
    }

    false
}
