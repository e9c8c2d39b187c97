//! Parsers for the per-process records under `/proc`.
//!
//! All functions take the record text so they can be exercised without a
//! live kernel. A record that does not have the expected shape yields
//! `None`; callers treat that the same as a vanished process.

use super::{Pid, ProcState};

/// Parse a directory entry name of the proc root as a PID.
///
/// Only names made purely of ASCII digits qualify (`self`, `sys`, `+1`
/// and friends are rejected).
pub fn parse_pid_name(name: &str) -> Option<Pid> {
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    name.parse().ok()
}

/// Extract the parent PID from the contents of `/proc/<pid>/status`.
pub fn parse_status_ppid(content: &str) -> Option<Pid> {
    content
        .lines()
        .find_map(|line| line.strip_prefix("PPid:"))
        .and_then(|value| value.split_whitespace().next())
        .and_then(|value| value.parse().ok())
}

/// Extract the run-state from the contents of `/proc/<pid>/stat`.
///
/// Format: `pid (comm) state ppid ...`. The command name can contain
/// spaces and parentheses, so the state is the first field after the
/// last `)`.
pub fn parse_stat_state(content: &str) -> Option<ProcState> {
    let (_, rest) = content.rsplit_once(')')?;
    let field = rest.split_whitespace().next()?;
    let mut chars = field.chars();
    let code = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    Some(ProcState::from_code(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATUS: &str = "Name:\tbash\n\
        Umask:\t0022\n\
        State:\tS (sleeping)\n\
        Tgid:\t4242\n\
        Ngid:\t0\n\
        Pid:\t4242\n\
        PPid:\t4100\n\
        TracerPid:\t0\n";

    #[test]
    fn test_parse_status_ppid() {
        assert_eq!(parse_status_ppid(STATUS), Some(4100));
    }

    #[test]
    fn test_parse_status_ppid_zero() {
        assert_eq!(parse_status_ppid("Name:\tsystemd\nPPid:\t0\n"), Some(0));
    }

    #[test]
    fn test_parse_status_missing_or_garbled() {
        assert_eq!(parse_status_ppid("Name:\tbash\nPid:\t1\n"), None);
        assert_eq!(parse_status_ppid("PPid:\tabc\n"), None);
        assert_eq!(parse_status_ppid("PPid:\n"), None);
        assert_eq!(parse_status_ppid(""), None);
    }

    #[test]
    fn test_parse_stat_state() {
        let stat = "4242 (bash) S 4100 4242 4242 34816 4300 4194304 1544";
        assert_eq!(parse_stat_state(stat), Some(ProcState::Sleeping));
    }

    #[test]
    fn test_parse_stat_state_zombie() {
        assert_eq!(
            parse_stat_state("300 (worker) Z 200 300 300 0 -1"),
            Some(ProcState::Zombie)
        );
    }

    #[test]
    fn test_parse_stat_state_odd_comm() {
        // comm with spaces and a closing paren
        let stat = "77 (tmux: server) (x)) Z 1 77 77 0 -1";
        assert_eq!(parse_stat_state(stat), Some(ProcState::Zombie));
    }

    #[test]
    fn test_parse_stat_state_truncated() {
        assert_eq!(parse_stat_state("77 (cat"), None);
        assert_eq!(parse_stat_state("77 (cat)"), None);
        assert_eq!(parse_stat_state("77 (cat) SZ 1"), None);
    }

    #[test]
    fn test_parse_pid_name() {
        assert_eq!(parse_pid_name("1"), Some(1));
        assert_eq!(parse_pid_name("4194304"), Some(4_194_304));
        assert_eq!(parse_pid_name("self"), None);
        assert_eq!(parse_pid_name("+12"), None);
        assert_eq!(parse_pid_name("12a"), None);
        assert_eq!(parse_pid_name(""), None);
        assert_eq!(parse_pid_name("99999999999"), None);
    }
}
