//! Signal propagation over a process subtree

use eyre::Result;
use nix::sys::signal::Signal;
use tracing::debug;

use super::{
    signal::{SignalReport, SignalSender},
    tree::ProcessTree,
    Pid, ProcessInfoSource,
};

/// Signal every descendant of `pid`, deepest processes first.
///
/// Each child is searched for its own children before it is signalled
/// itself. `pid` is not signalled. A failed send is recorded and the walk
/// continues.
pub fn send_signal_to_descendants<S, K>(
    tree: &ProcessTree<S>,
    sender: &K,
    pid: Pid,
    signal: Signal,
) -> Result<SignalReport>
where
    S: ProcessInfoSource,
    K: SignalSender + ?Sized,
{
    send_signal_to_descendants_with(tree, sender, pid, signal, |_| {})
}

/// [`send_signal_to_descendants`], calling `before_send` with each target
/// right before it is signalled.
///
/// If the calling process is in the subtree it is signalled after every
/// other target.
pub fn send_signal_to_descendants_with<S, K, F>(
    tree: &ProcessTree<S>,
    sender: &K,
    pid: Pid,
    signal: Signal,
    mut before_send: F,
) -> Result<SignalReport>
where
    S: ProcessInfoSource,
    K: SignalSender + ?Sized,
    F: FnMut(Pid),
{
    debug!("Sending {:?} to all descendants of PID {}", signal, pid);
    let mut walk = SubtreeSignal {
        tree,
        sender,
        signal,
        before_send: &mut before_send,
        own_pid: std::process::id(),
        own_pid_reached: false,
        report: SignalReport::new(),
    };
    walk.visit(pid)?;

    if walk.own_pid_reached {
        debug!("Signalling own PID {} last", walk.own_pid);
        (walk.before_send)(walk.own_pid);
        walk.report.send(sender, walk.own_pid, signal);
    }
    Ok(walk.report)
}

struct SubtreeSignal<'a, S, K: ?Sized> {
    tree: &'a ProcessTree<S>,
    sender: &'a K,
    signal: Signal,
    before_send: &'a mut dyn FnMut(Pid),
    own_pid: Pid,
    own_pid_reached: bool,
    report: SignalReport,
}

impl<S, K> SubtreeSignal<'_, S, K>
where
    S: ProcessInfoSource,
    K: SignalSender + ?Sized,
{
    fn visit(&mut self, pid: Pid) -> Result<()> {
        for child in self.tree.pids()? {
            if self.tree.parent_of(child) == Some(pid) && self.tree.contains(pid, child) {
                self.visit(child)?;
                if child == self.own_pid {
                    self.own_pid_reached = true;
                    continue;
                }
                (self.before_send)(child);
                self.report.send(self.sender, child, self.signal);
            }
        }
        Ok(())
    }
}

/// SIGKILL the parent of every zombie inside `root`'s subtree, as long as
/// that parent is inside the subtree too.
///
/// A parent holding several zombies is signalled once per zombie.
pub fn kill_parents_of_zombies<S, K>(
    tree: &ProcessTree<S>,
    sender: &K,
    root: Pid,
) -> Result<SignalReport>
where
    S: ProcessInfoSource,
    K: SignalSender + ?Sized,
{
    kill_parents_of_zombies_with(tree, sender, root, |_| {})
}

/// [`kill_parents_of_zombies`], calling `before_send` with each parent
/// right before it is killed.
pub fn kill_parents_of_zombies_with<S, K, F>(
    tree: &ProcessTree<S>,
    sender: &K,
    root: Pid,
    mut before_send: F,
) -> Result<SignalReport>
where
    S: ProcessInfoSource,
    K: SignalSender + ?Sized,
    F: FnMut(Pid),
{
    let mut report = SignalReport::new();
    for pid in tree.pids()? {
        if !tree.is_defunct(pid) || !tree.contains(root, pid) {
            continue;
        }
        let Some(parent) = tree.parent_of(pid) else {
            continue;
        };
        if parent > 0 && tree.contains(root, parent) {
            debug!("Zombie PID {} is held by PID {}", pid, parent);
            before_send(parent);
            report.send(sender, parent, Signal::SIGKILL);
        }
    }
    Ok(report)
}

/// Signal a single process.
pub fn kill_process<K: SignalSender + ?Sized>(sender: &K, pid: Pid, signal: Signal) -> SignalReport {
    let mut report = SignalReport::new();
    report.send(sender, pid, signal);
    report
}
