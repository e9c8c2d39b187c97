use crate::process::{Pid, DEFAULT_INIT_PID, DEFAULT_PROC_ROOT};
use clap::Parser;
use std::path::PathBuf;

/// Inspect and signal the descendants of a process
#[derive(Parser, Debug, Clone)]
#[command(name = "prct")]
#[command(version)]
#[command(about = "Inspect and signal a process tree through /proc")]
#[command(after_help = "Operations:\n  \
    (none)  print <target_pid> and its parent PID\n  \
    -id     list direct children\n  \
    -gc     list grandchildren\n  \
    -ds     list non-direct descendants\n  \
    -dc     count defunct descendants\n  \
    -df     list defunct descendants\n  \
    -op     list orphan descendants\n  \
    -do     report whether the target is defunct\n  \
    -so     report whether the target is an orphan\n  \
    -lg     list siblings\n  \
    -lz     list defunct siblings\n  \
    --pz    kill the parents of defunct descendants\n  \
    -sk     SIGKILL all descendants\n  \
    -st     SIGSTOP all descendants\n  \
    -dt     SIGCONT all descendants\n  \
    -rp     SIGKILL the target itself\n\n\
Examples:\n  \
    prct 1 4242\n  \
    prct 1 4242 -id\n  \
    prct --snapshot 4200 4242 -dc")]
pub struct Options {
    /// Root of the process tree to operate within
    pub root_pid: Pid,

    /// Process to inspect or act on; must be the root or one of its descendants
    pub target_pid: Pid,

    /// Operation to perform (see below)
    #[arg(allow_hyphen_values = true, value_name = "OPERATION")]
    pub operation: Option<String>,

    /// Mount point of the process-information filesystem
    #[arg(long, env = "PRCT_PROC_ROOT", value_name = "PATH", default_value = DEFAULT_PROC_ROOT)]
    pub proc_root: PathBuf,

    /// PID whose children count as orphans
    #[arg(long, env = "PRCT_INIT_PID", value_name = "PID", default_value_t = DEFAULT_INIT_PID)]
    pub init_pid: Pid,

    /// Read the process table once and answer from that copy.
    /// Results are consistent with each other but may be stale.
    #[arg(long, env = "PRCT_SNAPSHOT")]
    pub snapshot: bool,

    /// Enable debug-level logging on stderr.
    /// RUST_LOG takes precedence when set.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
