//! Runtime configuration resolved from command-line options and environment.

use crate::{
    cli::options::Options,
    process::{Pid, ProcFs, ProcessInfoSource, Snapshot},
};
use eyre::{Result, WrapErr};
use std::path::PathBuf;
use tracing::debug;

/// Settings that shape how the process table is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub proc_root: PathBuf,
    pub init_pid: Pid,
    pub snapshot: bool,
}

impl RuntimeConfig {
    /// Open the configured process table.
    ///
    /// In snapshot mode the whole table is read here, so an unreadable
    /// proc root fails immediately.
    pub fn open_source(&self) -> Result<Box<dyn ProcessInfoSource>> {
        let procfs = ProcFs::new(&self.proc_root);
        if !self.snapshot {
            return Ok(Box::new(procfs));
        }

        let snapshot = Snapshot::capture(&procfs).wrap_err_with(|| {
            format!("Failed to snapshot processes under {}", self.proc_root.display())
        })?;
        Ok(Box::new(snapshot))
    }
}

/// Build the runtime configuration from parsed options.
///
/// Clap has already applied the `PRCT_*` environment fallbacks.
pub fn load_runtime_config(opts: &Options) -> RuntimeConfig {
    let config = RuntimeConfig {
        proc_root: opts.proc_root.clone(),
        init_pid: opts.init_pid,
        snapshot: opts.snapshot,
    };
    debug!("Runtime config: {:?}", config);
    config
}
