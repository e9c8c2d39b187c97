//! Process run-state as reported in `/proc/<pid>/stat`.

/// Single-character scheduler state of a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcState {
    Running,
    Sleeping,
    DiskSleep,
    Stopped,
    Zombie,
    Dead,
    Idle,
    Other(char),
}

impl ProcState {
    pub fn from_code(code: char) -> Self {
        match code {
            'R' => ProcState::Running,
            'S' => ProcState::Sleeping,
            'D' => ProcState::DiskSleep,
            'T' | 't' => ProcState::Stopped,
            'Z' => ProcState::Zombie,
            'X' | 'x' => ProcState::Dead,
            'I' => ProcState::Idle,
            other => ProcState::Other(other),
        }
    }

    /// Terminated but not yet reaped by its parent.
    pub fn is_zombie(self) -> bool {
        self == ProcState::Zombie
    }
}
