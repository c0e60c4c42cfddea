mod common;

use std::sync::Arc;
use std::thread;

use common::{entry, init_tracing, Entry};
use evaluators::prelude::*;
use evaluators::{EvaluatorError, Evaluators, SynchronizedEvaluators};

#[test]
fn concurrent_writers_lose_nothing() {
    init_tracing();
    let shared = Arc::new(SynchronizedEvaluators::new());
    let writers: Vec<_> = (0..2)
        .map(|w| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                for i in 0..1000 {
                    shared.push(entry("w", w * 1000 + i)).expect("push");
                }
            })
        })
        .collect();
    for writer in writers {
        writer.join().expect("writer finished");
    }

    assert_eq!(shared.len(), 2000);
    let mut values: Vec<i64> = shared.to_vec().into_iter().map(|e| e.value).collect();
    values.sort_unstable();
    assert!(values.into_iter().eq(0..2000));
}

#[test]
fn concurrent_push_if_absent_keeps_keys_unique() {
    let shared = Arc::new(SynchronizedEvaluators::new());
    let workers: Vec<_> = (0..4)
        .map(|_| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                for i in 0..50 {
                    let name = format!("key{i}");
                    shared.push_if_absent(entry(&name, i), name.as_str()).expect("push");
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }
    assert_eq!(shared.len(), 50);
}

#[test]
fn readers_and_writers_interleave_safely() {
    let shared = Arc::new(SynchronizedEvaluators::new());
    let writer = {
        let shared = Arc::clone(&shared);
        thread::spawn(move || {
            for i in 0..500 {
                shared.push(entry("n", i)).unwrap();
                if i % 3 == 0 {
                    shared.acquire_first();
                }
            }
        })
    };
    let reader = {
        let shared = Arc::clone(&shared);
        thread::spawn(move || {
            for _ in 0..500 {
                // whatever is seen is a consistent snapshot
                let snapshot = shared.to_vec();
                assert!(snapshot.windows(2).all(|w| w[0].value < w[1].value));
            }
        })
    };
    writer.join().unwrap();
    reader.join().unwrap();
    assert_eq!(shared.len(), 500 - 167);
}

#[test]
fn same_contract_as_plain_store() {
    let store = SynchronizedEvaluators::new();
    store.push(entry("A", 1)).unwrap();
    store.push(entry("B", 2)).unwrap();
    store.push_at(1, entry("C", 3)).unwrap();
    assert_eq!(store.to_string(), "[A=1, C=3, B=2]");

    assert_eq!(store.remove("B").map(|e| e.value), Some(2));
    assert_eq!(store.peek(), Some(entry("C", 3)));
    assert_eq!(store.acquire_first(), Some(entry("A", 1)));
    assert_eq!(store.len(), 1);

    assert_eq!(store.get(0).unwrap(), entry("C", 3));
    assert_eq!(store.get(1).unwrap_err(), EvaluatorError::OutOfRange { index: 1, len: 1 });
    assert!(store.push_at(5, entry("x", 0)).is_err());
    assert_eq!(store.remove_at(5), None);

    assert_eq!(store.set_evaluated("C", entry("C", 30)).unwrap(), entry("C", 3));
    assert_eq!(store.evaluate(&30i64).map(|e| e.name), Some("C".to_string()));
    assert!(store.set_evaluated("zz", entry("zz", 0)).is_err());
}

#[test]
fn bulk_and_maintenance_operations() {
    let store: SynchronizedEvaluators<Entry> = SynchronizedEvaluators::with_capacity(4).unwrap();
    assert_eq!(store.capacity(), 4);
    store.push_all((0..6).map(|i| entry("n", i))).unwrap();
    store.push_all_at(0, [entry("head", -1)]).unwrap();
    store.push_all_from(&Evaluators::as_immutable([entry("tail", 99)])).unwrap();
    assert_eq!(store.len(), 8);
    assert_eq!(store.index_of("head"), Some(0));
    assert_eq!(store.peek().unwrap().name, "tail");

    store.reverse();
    assert_eq!(store.index_of("tail"), Some(0));
    store.pop();
    assert!(!store.contains("head"));

    store.trim();
    assert_eq!(store.capacity(), store.len());
    store.clear();
    assert!(store.is_empty());

    assert!(SynchronizedEvaluators::<Entry>::with_capacity(-3).is_err());
}

#[test]
fn compound_updates_under_one_lock() {
    let shared = Arc::new(SynchronizedEvaluators::from(vec![entry("counter", 0)]));
    let workers: Vec<_> = (0..4)
        .map(|_| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                for _ in 0..250 {
                    shared.with_mut(|store| {
                        let current = store.evaluate("counter").map(|e| e.value).unwrap_or(0);
                        store.set_evaluated("counter", entry("counter", current + 1)).unwrap();
                    });
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }
    assert_eq!(shared.with(|store| store.evaluate("counter").map(|e| e.value)), Some(1000));
}

#[test]
fn equality_clone_and_snapshots() {
    let left = SynchronizedEvaluators::from_slice(&[entry("a", 1), entry("b", 2)]);
    let right = left.clone();
    assert_eq!(left, right);
    assert_eq!(left, left);

    right.push(entry("c", 3)).unwrap();
    assert_ne!(left, right);
    assert_eq!(left.len(), 2);

    let buffer = left.to_array_in(vec![None; 4]);
    assert_eq!(buffer[1], Some(entry("b", 2)));
    assert_eq!(buffer[2], None);
    assert_eq!(left.to_boxed_slice().len(), 2);

    let plain: Evaluators<Entry> = right.into_inner();
    assert_eq!(plain.len(), 3);
}

#[test]
fn poisoned_lock_is_recovered() {
    let shared = Arc::new(SynchronizedEvaluators::from(vec![entry("a", 1)]));
    let crashed = {
        let shared = Arc::clone(&shared);
        thread::spawn(move || {
            let _: () = shared.with(|_| panic!("relation blew up"));
        })
        .join()
    };
    assert!(crashed.is_err());

    assert!(shared.is_poisoned());

    shared.push(entry("b", 2)).unwrap();
    assert!(!shared.is_poisoned());
    assert_eq!(shared.len(), 2);
    assert_eq!(shared.to_string(), "[a=1, b=2]");
}

#[test]
fn panicking_compound_update_keeps_its_writes() {
    init_tracing();
    let shared = Arc::new(SynchronizedEvaluators::from(vec![entry("a", 1)]));
    let crashed = {
        let shared = Arc::clone(&shared);
        thread::spawn(move || {
            let _: () = shared.with_mut(|store| {
                store.push(entry("b", 2)).unwrap();
                panic!("update abandoned halfway");
            });
        })
        .join()
    };
    assert!(crashed.is_err());
    assert!(shared.is_poisoned());

    // the first operation afterwards clears the poison; later ones see a healthy lock
    shared.push(entry("c", 3)).unwrap();
    assert!(!shared.is_poisoned());
    shared.push(entry("d", 4)).unwrap();
    assert!(!shared.is_poisoned());

    assert_eq!(shared.to_string(), "[a=1, b=2, c=3, d=4]");
}

#[test]
fn shared_stores_feed_each_other() {
    let source = SynchronizedEvaluators::from(vec![entry("x", 1), entry("y", 2)]);
    let target = SynchronizedEvaluators::from(vec![entry("a", 0)]);
    target.push_all_from_shared(&source).unwrap();
    target.push_all_from_shared_at(0, &source).unwrap();
    assert_eq!(target.to_string(), "[x=1, y=2, a=0, x=1, y=2]");
    assert!(target.push_all_from_shared_at(9, &source).is_err());

    // a store can be appended to itself without deadlocking
    source.push_all_from_shared(&source).unwrap();
    assert_eq!(source.to_string(), "[x=1, y=2, x=1, y=2]");

    let plain: Evaluators<Entry> = Evaluators::from(&target);
    assert_eq!(plain.len(), 5);
    let mut other = Evaluators::new();
    other.push_all(source.to_vec()).unwrap();
    assert_eq!(other.index_of("y"), Some(1));
}
