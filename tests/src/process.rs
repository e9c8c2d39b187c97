use nix::{
    sys::signal::{killpg, Signal},
    unistd::Pid,
};
use std::io;
use std::os::unix::process::CommandExt;
use std::process::{Child, Command, Stdio};

/// RAII wrapper that spawns a process in its own process group and kills the
/// entire group on drop.  This prevents stray test processes from lingering
/// after a test finishes (or panics).
pub struct ManagedProcess {
    child: Child,
    pgid: i32,
}

impl ManagedProcess {
    /// Spawn `cmd` as the leader of a new process group.
    pub fn spawn(cmd: &mut Command) -> io::Result<Self> {
        let child = cmd
            .process_group(0)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        let pgid = child.id() as i32;
        Ok(Self { child, pgid })
    }

    /// Spawn `sh -c <script>`.
    pub fn shell(script: &str) -> io::Result<Self> {
        Self::spawn(Command::new("sh").arg("-c").arg(script))
    }

    /// Return the PID of the child process.
    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// Whether the child has exited (reaping it if so).
    pub fn has_exited(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(Some(_)))
    }
}

impl Drop for ManagedProcess {
    fn drop(&mut self) {
        // An error here means the whole group is already gone.
        let _ = killpg(Pid::from_raw(self.pgid), Signal::SIGKILL);
        // Reap zombie.
        let _ = self.child.wait();
    }
}
