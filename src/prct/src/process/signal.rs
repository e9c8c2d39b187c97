//! Signal delivery and per-target outcome tracking.

use nix::{
    errno::Errno,
    sys::signal::{kill, Signal},
    unistd::Pid as NixPid,
};
use tracing::{debug, warn};

use super::Pid;

/// Delivers a signal to a single process.
pub trait SignalSender {
    fn send(&self, pid: Pid, signal: Signal) -> nix::Result<()>;
}

impl<K: SignalSender + ?Sized> SignalSender for &K {
    fn send(&self, pid: Pid, signal: Signal) -> nix::Result<()> {
        (**self).send(pid, signal)
    }
}

/// Sends signals with `kill(2)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct KillSender;

impl SignalSender for KillSender {
    fn send(&self, pid: Pid, signal: Signal) -> nix::Result<()> {
        // 0 and anything that wraps negative would address a process group
        let raw = i32::try_from(pid).map_err(|_| Errno::ESRCH)?;
        if raw <= 0 {
            return Err(Errno::ESRCH);
        }
        kill(NixPid::from_raw(raw), signal)
    }
}

/// Result of one signal attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalOutcome {
    pub pid: Pid,
    pub signal: Signal,
    pub result: nix::Result<()>,
}

impl SignalOutcome {
    pub fn is_delivered(&self) -> bool {
        self.result.is_ok()
    }
}

/// Every signal attempt of one operation, in the order they were made.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignalReport {
    outcomes: Vec<SignalOutcome>,
}

impl SignalReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send `signal` to `pid` and record the outcome. Failures are logged
    /// and kept; they never stop the caller.
    pub fn send<K: SignalSender + ?Sized>(&mut self, sender: &K, pid: Pid, signal: Signal) {
        let result = sender.send(pid, signal);
        match &result {
            Ok(()) => debug!("Sent {:?} to PID {}", signal, pid),
            Err(e) => warn!("Failed to send {:?} to PID {}: {}", signal, pid, e),
        }
        self.outcomes.push(SignalOutcome {
            pid,
            signal,
            result,
        });
    }

    /// PIDs in attempt order, delivered or not.
    pub fn targets(&self) -> impl Iterator<Item = Pid> + '_ {
        self.outcomes.iter().map(|outcome| outcome.pid)
    }

    pub fn delivered(&self) -> impl Iterator<Item = Pid> + '_ {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.is_delivered())
            .map(|outcome| outcome.pid)
    }

    pub fn failed(&self) -> impl Iterator<Item = &SignalOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.is_delivered())
    }

    pub fn is_clean(&self) -> bool {
        self.failed().next().is_none()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}
