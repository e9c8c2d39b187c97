use crate::process::ManagedProcess;
use prct::{Pid, ProcFs, ProcessTree};
use std::time::{Duration, Instant};

/// How long to wait for the kernel to reflect a spawn, exit or signal.
pub const SETTLE_TIMEOUT: Duration = Duration::from_secs(10);

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Tree over the live `/proc`.
pub fn live_tree() -> ProcessTree<ProcFs> {
    ProcessTree::new(ProcFs::default())
}

/// Poll `condition` until it holds or [`SETTLE_TIMEOUT`] passes.
pub fn wait_until(what: &str, mut condition: impl FnMut() -> bool) {
    let deadline = Instant::now() + SETTLE_TIMEOUT;
    while !condition() {
        assert!(Instant::now() < deadline, "timed out waiting for {what}");
        std::thread::sleep(POLL_INTERVAL);
    }
}

/// Children of `pid` once exactly `count` of them are visible.
pub fn wait_for_children(tree: &ProcessTree<ProcFs>, pid: Pid, count: usize) -> Vec<Pid> {
    let mut children = Vec::new();
    wait_until(&format!("{count} children of {pid}"), || {
        children = tree.children(pid).expect("failed to list /proc");
        children.len() == count
    });
    children.sort_unstable();
    children
}

/// A shell holding `count` sleeping children:
///
/// ```text
/// test ── sh ─┬─ sleep
///             └─ sleep
/// ```
pub fn spawn_sleepers(count: usize) -> ManagedProcess {
    let script = format!("{} wait", "sleep 60 & ".repeat(count));
    ManagedProcess::shell(&script).expect("failed to spawn sh")
}

/// A `sleep` that never reaps its exited child, leaving one zombie:
///
/// ```text
/// test ── sleep ── (true) <defunct>
/// ```
///
/// The shell forks the background `true` and then execs into `sleep`, so
/// the zombie's parent is the returned process.
pub fn spawn_zombie_holder() -> ManagedProcess {
    ManagedProcess::shell("true & exec sleep 60").expect("failed to spawn sh")
}
