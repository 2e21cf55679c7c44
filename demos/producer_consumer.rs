use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use easy_queue::config::Builder;
use easy_queue::BoundedBlockingQueue;

fn main() {
    const PRODUCERS: usize = 4;
    const CONSUMERS: usize = 3;
    const N: usize = 1000;
    const R: usize = PRODUCERS * (N * (N - 1)) / 2;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Capacity comes from `EASY_QUEUE_CAPACITY` when set.
    let q: BoundedBlockingQueue<usize> = Builder::from_env()
        .expect("invalid EASY_QUEUE_CAPACITY")
        .name("demo")
        .build()
        .expect("failed to build queue");

    let producers_left = AtomicUsize::new(PRODUCERS);
    let total = AtomicUsize::new(0);

    thread::scope(|s| {
        for _ in 0..CONSUMERS {
            s.spawn(|| {
                let sum: usize = q.iter().sum();
                total.fetch_add(sum, Ordering::Relaxed);
            });
        }

        for _ in 0..PRODUCERS {
            s.spawn(|| {
                for i in 0..N {
                    if q.push(i).is_err() {
                        break;
                    }
                }
                // The last producer out closes the queue.
                if producers_left.fetch_sub(1, Ordering::AcqRel) == 1 {
                    q.shutdown();
                }
            });
        }
    });

    assert_eq!(total.load(Ordering::Relaxed), R);
    println!("consumed {} in total, queue {:?}", R, q);
}
