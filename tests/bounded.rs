use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use easy_queue::prelude::*;

#[test]
fn smoke() {
    let q = BoundedBlockingQueue::new(1);

    q.push(7).unwrap();
    assert_eq!(q.pop(), Ok(7));

    q.push(8).unwrap();
    assert_eq!(q.pop(), Ok(8));
    assert_eq!(q.try_pop(), Err(TryDequeueError::Empty));
}

#[test]
fn capacity() {
    let q = BoundedBlockingQueue::<usize>::new(3);
    assert_eq!(q.capacity(), 3);
    assert_eq!(q.slack(), 3);
}

#[test]
#[should_panic(expected = "capacity must be positive")]
fn zero_capacity_panics() {
    BoundedBlockingQueue::<()>::new(0);
}

#[test]
fn zero_capacity_try_new() {
    assert_eq!(
        BoundedBlockingQueue::<()>::try_new(0).unwrap_err(),
        BuildError::ZeroCapacity
    );
    assert!(BoundedBlockingQueue::<()>::try_new(1).is_ok());
}

#[test]
fn len_empty_full() {
    let q = BoundedBlockingQueue::new(2);

    assert_eq!(q.len(), 0);
    assert_eq!(q.is_empty(), true);
    assert_eq!(q.is_full(), false);

    q.push(()).unwrap();

    assert_eq!(q.len(), 1);
    assert_eq!(q.is_empty(), false);
    assert_eq!(q.is_full(), false);
    assert_eq!(q.slack(), 1);

    q.push(()).unwrap();

    assert_eq!(q.len(), 2);
    assert_eq!(q.is_full(), true);
    assert_eq!(q.slack(), 0);

    q.pop().unwrap();
    q.pop().unwrap();

    assert_eq!(q.len(), 0);
    assert_eq!(q.is_empty(), true);
    assert_eq!(q.is_full(), false);
}

#[test]
fn fifo() {
    const COUNT: usize = 64;

    let q = BoundedBlockingQueue::new(COUNT);

    for i in 0..COUNT {
        q.push(i).unwrap();
    }
    for i in 0..COUNT {
        assert_eq!(q.pop(), Ok(i));
    }
    assert!(q.is_empty());
}

#[test]
fn try_push_full() {
    let q = BoundedBlockingQueue::new(1);

    q.try_push(1).unwrap();

    let err = q.try_push(2).unwrap_err();
    assert!(err.is_full());
    assert_eq!(err.into_inner(), 2);
    assert_eq!(q.len(), 1);
}

#[test]
fn try_iter() {
    let q = BoundedBlockingQueue::new(4);

    for i in 0..3 {
        q.push(i).unwrap();
    }

    assert_eq!(q.try_iter().collect::<Vec<_>>(), [0, 1, 2]);
    assert_eq!(q.try_iter().next(), None);
    assert!(!q.is_shutdown());
}

#[test]
fn option_values() {
    let q = BoundedBlockingQueue::new(2);

    q.push(None).unwrap();
    q.push(Some(1)).unwrap();

    assert_eq!(q.pop(), Ok(None));
    assert_eq!(q.pop(), Ok(Some(1)));
}

#[test]
fn trait_objects() {
    fn fill(q: &dyn BlockingQueue<u8>) {
        while !q.is_full() {
            q.push(q.len() as u8).unwrap();
        }
    }

    let q = BoundedBlockingQueue::new(3);
    fill(&q);

    assert_eq!(Queue::slack(&q), 0);
    assert_eq!(Queue::try_pop(&q), Ok(0));
    assert_eq!(BlockingQueue::pop(&q), Ok(1));
}

#[test]
fn debug() {
    let q: BoundedBlockingQueue<u8> = Builder::new().capacity(2).name("jobs").build().unwrap();
    q.push(1).unwrap();

    let s = format!("{:?}", q);
    assert!(s.contains("\"jobs\""));
    assert!(s.contains("capacity: 2"));
    assert!(s.contains("len: 1"));
    assert!(s.contains("shutdown: false"));
}

#[test]
fn pop_waits_for_push() {
    let q = BoundedBlockingQueue::new(1);

    thread::scope(|s| {
        let consumer = s.spawn(|| q.pop());

        thread::sleep(Duration::from_millis(100));
        assert!(!consumer.is_finished());

        q.push(42).unwrap();
        assert_eq!(consumer.join().unwrap(), Ok(42));
    });
    assert!(q.is_empty());
}

#[test]
fn push_waits_for_pop() {
    let q = BoundedBlockingQueue::new(2);

    q.push('A').unwrap();
    q.push('B').unwrap();

    thread::scope(|s| {
        let producer = s.spawn(|| q.push('C'));

        thread::sleep(Duration::from_millis(100));
        assert!(!producer.is_finished());
        assert_eq!(q.len(), 2);

        assert_eq!(q.pop(), Ok('A'));
        assert_eq!(producer.join().unwrap(), Ok(()));
    });

    assert_eq!(q.pop(), Ok('B'));
    assert_eq!(q.pop(), Ok('C'));
    assert!(q.is_empty());
}

#[test]
fn drops() {
    const RUNS: usize = if cfg!(miri) { 5 } else { 50 };
    const CAP: usize = 16;

    static DROPS: AtomicUsize = AtomicUsize::new(0);

    struct DropCounter;

    impl Drop for DropCounter {
        fn drop(&mut self) {
            DROPS.fetch_add(1, Ordering::SeqCst);
        }
    }

    for _ in 0..RUNS {
        let pushed = fastrand::usize(0..=CAP);
        let popped = fastrand::usize(0..=pushed);

        DROPS.store(0, Ordering::SeqCst);
        let q = BoundedBlockingQueue::new(CAP);

        for _ in 0..pushed {
            q.push(DropCounter).unwrap();
        }
        for _ in 0..popped {
            drop(q.pop().unwrap());
        }

        assert_eq!(DROPS.load(Ordering::SeqCst), popped);
        drop(q);
        assert_eq!(DROPS.load(Ordering::SeqCst), pushed);
    }
}
