//! Operations selectable on the command line and how their results print.

use crate::process::{
    kill_parents_of_zombies_with, kill_process, send_signal_to_descendants_with, DescendantFilter,
    Pid, ProcessInfoSource, ProcessTree, SignalSender,
};
use eyre::Result;
use nix::sys::signal::Signal;
use std::{
    fmt,
    io::{self, Write},
    str::FromStr,
};

/// One operation on the target process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Children,
    DefunctCount,
    NonDirectDescendants,
    DefunctDescendants,
    OrphanDescendants,
    Grandchildren,
    DefunctCheck,
    OrphanCheck,
    Siblings,
    ZombieSiblings,
    KillZombieParents,
    KillDescendants,
    StopDescendants,
    ContinueDescendants,
    KillTarget,
}

impl Action {
    pub const ALL: [Action; 15] = [
        Action::Children,
        Action::DefunctCount,
        Action::NonDirectDescendants,
        Action::DefunctDescendants,
        Action::OrphanDescendants,
        Action::Grandchildren,
        Action::DefunctCheck,
        Action::OrphanCheck,
        Action::Siblings,
        Action::ZombieSiblings,
        Action::KillZombieParents,
        Action::KillDescendants,
        Action::StopDescendants,
        Action::ContinueDescendants,
        Action::KillTarget,
    ];

    /// Command-line spelling.
    pub fn flag(self) -> &'static str {
        match self {
            Action::Children => "-id",
            Action::DefunctCount => "-dc",
            Action::NonDirectDescendants => "-ds",
            Action::DefunctDescendants => "-df",
            Action::OrphanDescendants => "-op",
            Action::Grandchildren => "-gc",
            Action::DefunctCheck => "-do",
            Action::OrphanCheck => "-so",
            Action::Siblings => "-lg",
            Action::ZombieSiblings => "-lz",
            Action::KillZombieParents => "--pz",
            Action::KillDescendants => "-sk",
            Action::StopDescendants => "-st",
            Action::ContinueDescendants => "-dt",
            Action::KillTarget => "-rp",
        }
    }

    /// Run against `target`, writing results to `out`.
    pub fn run<S, K, W>(self, tree: &ProcessTree<S>, sender: &K, target: Pid, out: &mut W) -> Result<()>
    where
        S: ProcessInfoSource,
        K: SignalSender + ?Sized,
        W: Write,
    {
        match self {
            Action::Children => write_pids(out, &tree.children(target)?)?,
            Action::DefunctCount => writeln!(out, "{}", tree.count_defunct_descendants(target)?)?,
            Action::NonDirectDescendants => write_pids(out, &tree.non_direct_descendants(target)?)?,
            Action::DefunctDescendants => {
                write_pids(out, &tree.descendants(target, DescendantFilter::defunct())?)?
            }
            Action::OrphanDescendants => {
                write_pids(out, &tree.descendants(target, DescendantFilter::orphans())?)?
            }
            Action::Grandchildren => write_pids(out, &tree.grandchildren(target)?)?,
            Action::DefunctCheck => {
                let verdict = if tree.is_defunct(target) { "Defunct" } else { "Not Defunct" };
                writeln!(out, "{verdict}")?;
            }
            Action::OrphanCheck => {
                let verdict = if tree.is_orphan(target) { "Orphan" } else { "Not Orphan" };
                writeln!(out, "{verdict}")?;
            }
            Action::Siblings => write_pids(out, &tree.siblings(target, false)?)?,
            Action::ZombieSiblings => write_pids(out, &tree.siblings(target, true)?)?,
            Action::KillZombieParents => {
                let mut written = Ok(());
                kill_parents_of_zombies_with(tree, sender, target, |pid| {
                    announce(out, &mut written, format_args!("Killing parent process: {pid}"));
                })?;
                written?;
            }
            Action::KillTarget => {
                kill_process(sender, target, Signal::SIGKILL);
            }
            Action::KillDescendants => {
                signal_descendants(tree, sender, target, Signal::SIGKILL, out)?
            }
            Action::StopDescendants => {
                signal_descendants(tree, sender, target, Signal::SIGSTOP, out)?
            }
            Action::ContinueDescendants => {
                signal_descendants(tree, sender, target, Signal::SIGCONT, out)?
            }
        }
        Ok(())
    }
}

impl FromStr for Action {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        Action::ALL
            .into_iter()
            .find(|action| action.flag() == s)
            .ok_or_else(|| eyre::eyre!("Invalid option: {}", s))
    }
}

fn signal_descendants<S, K, W>(
    tree: &ProcessTree<S>,
    sender: &K,
    target: Pid,
    signal: Signal,
    out: &mut W,
) -> Result<()>
where
    S: ProcessInfoSource,
    K: SignalSender + ?Sized,
    W: Write,
{
    let mut written = Ok(());
    send_signal_to_descendants_with(tree, sender, target, signal, |pid| {
        announce(
            out,
            &mut written,
            format_args!("Sending signal {} to process {}", signal as i32, pid),
        );
    })?;
    Ok(written?)
}

/// Write and flush one line ahead of a send. After the first write error
/// the remaining lines are dropped but the sends still go out.
fn announce<W: Write>(out: &mut W, written: &mut io::Result<()>, line: fmt::Arguments<'_>) {
    if written.is_ok() {
        *written = writeln!(out, "{line}").and_then(|()| out.flush());
    }
}

fn write_pids<W: Write>(out: &mut W, pids: &[Pid]) -> std::io::Result<()> {
    for pid in pids {
        writeln!(out, "{pid}")?;
    }
    Ok(())
}
