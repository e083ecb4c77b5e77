#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn empty_queue_has_nothing_due() {
    let mut q: TimerQueue<&str> = TimerQueue::new();
    assert!(q.is_empty());
    assert_eq!(q.next_due(), None);
    assert_eq!(q.pop_due(1e12), None);
}

#[test]
fn events_fire_in_due_order() {
    let mut q = TimerQueue::new();
    q.schedule(300.0, "c");
    q.schedule(100.0, "a");
    q.schedule(200.0, "b");
    assert_eq!(q.len(), 3);
    assert_eq!(q.pop_due(1_000.0), Some((100.0, "a")));
    assert_eq!(q.pop_due(1_000.0), Some((200.0, "b")));
    assert_eq!(q.pop_due(1_000.0), Some((300.0, "c")));
    assert!(q.is_empty());
}

#[test]
fn nothing_fires_early() {
    let mut q = TimerQueue::new();
    q.schedule(500.0, 1);
    assert_eq!(q.pop_due(499.999), None);
    assert_eq!(q.next_due(), Some(500.0));
    assert_eq!(q.pop_due(500.0), Some((500.0, 1)));
}

#[test]
fn ties_keep_insertion_order() {
    let mut q = TimerQueue::new();
    for i in 0..10 {
        q.schedule(42.0, i);
    }
    let fired: Vec<_> = std::iter::from_fn(|| q.pop_due(42.0)).map(|(_, e)| e).collect();
    assert_eq!(fired, (0..10).collect::<Vec<_>>());
}

#[test]
fn pending_lists_everything() {
    let mut q = TimerQueue::new();
    q.schedule(1.0, 'x');
    q.schedule(2.0, 'y');
    let mut seen: Vec<_> = q.pending().map(|(due, e)| (due, *e)).collect();
    seen.sort_by(|a, b| a.0.total_cmp(&b.0));
    assert_eq!(seen, vec![(1.0, 'x'), (2.0, 'y')]);
}

#[test]
fn scheduling_while_draining_is_seen_in_order() {
    let mut q = TimerQueue::new();
    q.schedule(10.0, 1);
    q.schedule(30.0, 3);
    let (due, _) = q.pop_due(100.0).expect("first");
    q.schedule(due + 10.0, 2);
    assert_eq!(q.pop_due(100.0), Some((20.0, 2)));
    assert_eq!(q.pop_due(100.0), Some((30.0, 3)));
}
