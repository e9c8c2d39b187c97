// Live tests: spawn real process trees and query them through /proc.

#![cfg(target_os = "linux")]

use nix::sys::signal::Signal;
use prct::{
    is_in_tree,
    process::{kill_parents_of_zombies, send_signal_to_descendants, ProcState},
    DescendantFilter, KillSender, ProcessInfoSource,
};
use prct_tests::fixtures::{
    live_tree, spawn_sleepers, spawn_zombie_holder, wait_for_children, wait_until,
};

#[test]
fn test_children_of_spawned_shell() {
    let tree = live_tree();
    let shell = spawn_sleepers(2);
    let children = wait_for_children(&tree, shell.id(), 2);

    let me = std::process::id();
    assert!(tree.children(me).unwrap().contains(&shell.id()));
    for &child in &children {
        assert_eq!(tree.parent_of(child), Some(shell.id()));
        assert!(is_in_tree(tree.source(), shell.id(), child));
        assert!(is_in_tree(tree.source(), me, child));
        assert!(tree.grandchildren(me).unwrap().contains(&child));
        assert!(tree.non_direct_descendants(me).unwrap().contains(&child));
    }

    let mut siblings = tree.siblings(children[0], false).unwrap();
    siblings.sort_unstable();
    assert_eq!(siblings, vec![children[1]]);
    assert!(!tree.is_defunct(children[0]));
}

#[test]
fn test_zombie_is_counted() {
    let tree = live_tree();
    let holder = spawn_zombie_holder();

    wait_until("zombie under holder", || {
        tree.count_defunct_descendants(holder.id()).unwrap() == 1
    });

    let zombies = tree
        .descendants(holder.id(), DescendantFilter::defunct())
        .unwrap();
    assert_eq!(zombies.len(), 1);
    assert!(tree.is_defunct(zombies[0]));
    assert_eq!(tree.state_of(zombies[0]), Some(ProcState::Zombie));
    assert!(!tree.is_defunct(holder.id()));
}

#[test]
fn test_stop_and_continue_descendants() {
    let tree = live_tree();
    let shell = spawn_sleepers(2);
    let children = wait_for_children(&tree, shell.id(), 2);

    let report = send_signal_to_descendants(&tree, &KillSender, shell.id(), Signal::SIGSTOP)
        .unwrap();
    assert!(report.is_clean());
    let mut signalled: Vec<_> = report.delivered().collect();
    signalled.sort_unstable();
    assert_eq!(signalled, children);

    wait_until("children stopped", || {
        children
            .iter()
            .all(|&pid| tree.state_of(pid) == Some(ProcState::Stopped))
    });

    send_signal_to_descendants(&tree, &KillSender, shell.id(), Signal::SIGCONT).unwrap();
    wait_until("children resumed", || {
        children
            .iter()
            .all(|&pid| tree.state_of(pid) != Some(ProcState::Stopped))
    });
}

#[test]
fn test_kill_descendants_lets_shell_finish() {
    let tree = live_tree();
    let mut shell = spawn_sleepers(2);
    wait_for_children(&tree, shell.id(), 2);

    let report = send_signal_to_descendants(&tree, &KillSender, shell.id(), Signal::SIGKILL)
        .unwrap();
    assert_eq!(report.delivered().count(), 2);

    // sh's `wait` returns once both sleeps are gone
    wait_until("shell exit", || shell.has_exited());
}

#[test]
fn test_kill_parents_of_zombies_live() {
    let tree = live_tree();
    let mut holder = spawn_zombie_holder();
    wait_until("zombie under holder", || {
        tree.count_defunct_descendants(holder.id()).unwrap() == 1
    });

    let report = kill_parents_of_zombies(&tree, &KillSender, holder.id()).unwrap();
    assert_eq!(report.delivered().collect::<Vec<_>>(), vec![holder.id()]);

    wait_until("holder exit", || holder.has_exited());
}

#[test]
fn test_live_pids_are_listed() {
    let source = live_tree();
    let pids = source.source().pids().unwrap();
    assert!(pids.contains(&std::process::id()));
    assert!(pids.contains(&1));
}
