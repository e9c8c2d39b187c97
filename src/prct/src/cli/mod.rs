//! Command-line front end

pub mod action;
pub mod config;
pub mod options;

use crate::process::{Pid, ProcessInfoSource, ProcessTree, SignalSender};
use action::Action;
use config::load_runtime_config;
use eyre::Result;
use options::Options;
use std::io::Write;
use tracing::debug;

/// Run one invocation described by `opts`, writing results to `out`.
pub fn run<K, W>(opts: &Options, sender: &K, out: &mut W) -> Result<()>
where
    K: SignalSender + ?Sized,
    W: Write,
{
    let config = load_runtime_config(opts);
    let source = config.open_source()?;
    let tree = ProcessTree::new(source).with_init_pid(config.init_pid);
    execute(
        &tree,
        sender,
        opts.root_pid,
        opts.target_pid,
        opts.operation.as_deref(),
        out,
    )
}

/// Validate that `target` sits in `root`'s tree, then perform `operation`.
///
/// An unknown operation or a target outside the tree is reported on `out`
/// and is not an error.
pub fn execute<S, K, W>(
    tree: &ProcessTree<S>,
    sender: &K,
    root: Pid,
    target: Pid,
    operation: Option<&str>,
    out: &mut W,
) -> Result<()>
where
    S: ProcessInfoSource,
    K: SignalSender + ?Sized,
    W: Write,
{
    if !tree.contains(root, target) {
        writeln!(
            out,
            "The process {target} does not belong to the tree rooted at {root}"
        )?;
        return Ok(());
    }

    let Some(operation) = operation else {
        match tree.parent_of(target) {
            Some(parent) => writeln!(out, "{target} {parent}")?,
            None => writeln!(out, "{target} -1")?,
        }
        return Ok(());
    };

    match operation.parse::<Action>() {
        Ok(action) => {
            debug!("Running {:?} on PID {}", action, target);
            action.run(tree, sender, target, out)
        }
        Err(_) => {
            writeln!(out, "Invalid option")?;
            Ok(())
        }
    }
}
