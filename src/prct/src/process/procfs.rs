//! Live process table backed by the `/proc` filesystem.

use eyre::{Result, WrapErr};
use std::path::PathBuf;
use tracing::trace;

use super::{
    parse::{parse_pid_name, parse_stat_state, parse_status_ppid},
    Pid, ProcState, ProcessInfoSource,
};

/// Default mount point of the process-information filesystem.
pub const DEFAULT_PROC_ROOT: &str = "/proc";

/// Reads process metadata fresh from a proc root on every call.
#[derive(Debug, Clone)]
pub struct ProcFs {
    root: PathBuf,
}

impl ProcFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Read `<root>/<pid>/<name>`, or `None` if the process is gone.
    fn read_record(&self, pid: Pid, name: &str) -> Option<String> {
        let path = self.root.join(pid.to_string()).join(name);
        match std::fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(e) => {
                trace!("Failed to read {}: {}", path.display(), e);
                None
            }
        }
    }
}

impl Default for ProcFs {
    fn default() -> Self {
        Self::new(DEFAULT_PROC_ROOT)
    }
}

impl ProcessInfoSource for ProcFs {
    fn pids(&self) -> Result<Vec<Pid>> {
        let entries = std::fs::read_dir(&self.root)
            .wrap_err_with(|| format!("Failed to open {}", self.root.display()))?;

        let pids = entries
            .flatten()
            .filter_map(|entry| parse_pid_name(entry.file_name().to_str()?))
            .collect();
        Ok(pids)
    }

    fn parent_of(&self, pid: Pid) -> Option<Pid> {
        parse_status_ppid(&self.read_record(pid, "status")?)
    }

    fn state_of(&self, pid: Pid) -> Option<ProcState> {
        parse_stat_state(&self.read_record(pid, "stat")?)
    }
}
