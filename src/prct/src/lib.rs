//! Query and signal a live process tree through `/proc`.
//!
//! [`ProcessTree`] answers ancestry and descendant questions over any
//! [`ProcessInfoSource`]: the live [`ProcFs`] reader, or a [`Snapshot`]
//! captured once. Signal propagation lives in [`process::cleanup`] and
//! reports every attempt through a [`SignalReport`].

pub mod cli;
pub mod process;
pub mod util;

pub use process::{
    is_in_tree, DescendantFilter, KillSender, Pid, ProcFs, ProcState, ProcessInfoSource,
    ProcessTree, SignalReport, SignalSender, Snapshot,
};
