//! Guards shared across threads.

use std::sync::mpsc;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use task_lock::{call_site, InMemoryGateway, LockGuard, LockOptions, Signature};

use crate::support::Runs;

fn sync_guard(gateway: Arc<InMemoryGateway>, options: LockOptions) -> Arc<LockGuard> {
    Arc::new(LockGuard::new("sync", Signature::new(["account"]), options, gateway).unwrap())
}

#[test]
fn second_non_blocking_call_is_skipped_while_first_holds() {
    let guard = sync_guard(
        Arc::new(InMemoryGateway::new()),
        LockOptions::new().release_on_completion(true),
    );
    let runs = Runs::default();
    let (entered_tx, entered_rx) = mpsc::channel();
    let (finish_tx, finish_rx) = mpsc::channel::<()>();

    let first = {
        let guard = Arc::clone(&guard);
        let runs = runs.clone();
        thread::spawn(move || {
            guard
                .invoke(&call_site!("acct-1"), || {
                    runs.hit();
                    entered_tx.send(()).unwrap();
                    finish_rx.recv().unwrap();
                })
                .unwrap()
        })
    };

    entered_rx.recv().unwrap();
    let second = guard.invoke(&call_site!("acct-1"), || runs.hit()).unwrap();
    assert!(second.is_skipped());

    finish_tx.send(()).unwrap();
    assert!(!first.join().unwrap().is_skipped());
    assert_eq!(runs.count(), 1);
}

#[test]
fn blocking_call_waits_for_the_holder() {
    let guard = sync_guard(
        Arc::new(InMemoryGateway::new()),
        LockOptions::new()
            .blocking(true)
            .with_timeout(Duration::from_secs(5))
            .release_on_completion(true),
    );
    let runs = Runs::default();
    let (entered_tx, entered_rx) = mpsc::channel();

    let first = {
        let guard = Arc::clone(&guard);
        let runs = runs.clone();
        thread::spawn(move || {
            guard
                .invoke(&call_site!("acct-1"), || {
                    runs.hit();
                    entered_tx.send(()).unwrap();
                    thread::sleep(Duration::from_millis(50));
                })
                .unwrap()
        })
    };

    entered_rx.recv().unwrap();
    let second = guard.invoke(&call_site!("acct-1"), || runs.hit()).unwrap();

    assert!(!second.is_skipped());
    assert!(!first.join().unwrap().is_skipped());
    assert_eq!(runs.count(), 2);
}

#[test]
fn different_keys_run_in_parallel() {
    let guard = sync_guard(Arc::new(InMemoryGateway::new()), LockOptions::new());
    let barrier = Arc::new(Barrier::new(4));
    let runs = Runs::default();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let guard = Arc::clone(&guard);
            let barrier = Arc::clone(&barrier);
            let runs = runs.clone();
            thread::spawn(move || {
                guard
                    .invoke(&call_site!(format!("acct-{}", i)), || {
                        runs.hit();
                        // every body must be inside its lock at the same time
                        barrier.wait();
                    })
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert!(!handle.join().unwrap().is_skipped());
    }
    assert_eq!(runs.count(), 4);
}

#[test]
fn same_key_runs_once_across_racing_threads() {
    let guard = sync_guard(Arc::new(InMemoryGateway::new()), LockOptions::new());
    let barrier = Arc::new(Barrier::new(8));
    let runs = Runs::default();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let guard = Arc::clone(&guard);
            let barrier = Arc::clone(&barrier);
            let runs = runs.clone();
            thread::spawn(move || {
                barrier.wait();
                guard.invoke(&call_site!("acct-1"), || runs.hit()).unwrap()
            })
        })
        .collect();

    let skipped = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|outcome| outcome.is_skipped())
        .count();

    assert_eq!(runs.count(), 1);
    assert_eq!(skipped, 7);
}
