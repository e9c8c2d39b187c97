//! Process table access, tree queries and signal propagation

pub mod ancestry;
pub mod cleanup;
pub mod parse;
pub mod procfs;
pub mod signal;
pub mod snapshot;
pub mod source;
pub mod state;
pub mod tree;

/// Kernel process identifier. Parent ids may be 0.
pub type Pid = u32;

// Re-export commonly used items
pub use ancestry::is_in_tree;
pub use cleanup::{
    kill_parents_of_zombies, kill_parents_of_zombies_with, kill_process, send_signal_to_descendants,
    send_signal_to_descendants_with,
};
pub use procfs::{ProcFs, DEFAULT_PROC_ROOT};
pub use signal::{KillSender, SignalOutcome, SignalReport, SignalSender};
pub use snapshot::{ProcessEntry, Snapshot};
pub use source::ProcessInfoSource;
pub use state::ProcState;
pub use tree::{DescendantFilter, ProcessTree, DEFAULT_INIT_PID};
