//! Batched map with a progress callback.
//!
//! The updater's execution model, factored out for reuse: a sequence of
//! fixed-size batches, each batch a set of concurrent futures joined before
//! the next batch starts. At most `batch_size` operations are in flight at
//! any instant; there is no cancellation — once started, a run proceeds to
//! completion.

use std::future::Future;

use futures::future::join_all;

/// Runs `op` over `items` in fixed-size batches.
///
/// `op` receives the 0-based global index of the item. Outputs come back in
/// input order. After each batch completes, `on_progress` fires with a
/// percentage computed from whole batches:
/// `min(round(batches_done * batch_size / total * 100), 100)`.
///
/// # Panics
///
/// Panics if `batch_size` is zero.
pub async fn batched_map<T, U, F, Fut, P>(
    items: Vec<T>,
    batch_size: usize,
    op: F,
    mut on_progress: P,
) -> Vec<U>
where
    F: Fn(usize, T) -> Fut,
    Fut: Future<Output = U>,
    P: FnMut(u8),
{
    assert!(batch_size > 0, "batch_size must be at least 1");

    let total = items.len();
    let mut outputs = Vec::with_capacity(total);
    let mut batch_start = 0usize;

    let mut items = items.into_iter();
    while batch_start < total {
        let batch: Vec<T> = items.by_ref().take(batch_size).collect();
        let futures = batch
            .into_iter()
            .enumerate()
            .map(|(offset, item)| op(batch_start + offset, item));
        outputs.extend(join_all(futures).await);

        batch_start += batch_size;
        on_progress(percent_complete(batch_start, total));
    }

    outputs
}

/// Progress percentage after `processed` of `total` items, rounded half-up
/// and capped at 100.
fn percent_complete(processed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let rounded = (processed * 200 + total) / (2 * total);
    u8::try_from(rounded.min(100)).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;

    #[tokio::test]
    async fn splits_25_items_into_three_batches() {
        let progress = Mutex::new(Vec::new());
        let items: Vec<usize> = (0..25).collect();

        let outputs = batched_map(
            items,
            10,
            |index, item| async move {
                assert_eq!(index, item);
                item * 2
            },
            |pct| progress.lock().unwrap().push(pct),
        )
        .await;

        assert_eq!(outputs.len(), 25);
        assert_eq!(outputs[24], 48, "outputs keep input order");
        // 10/25, 20/25, then capped.
        assert_eq!(*progress.lock().unwrap(), vec![40, 80, 100]);
    }

    #[tokio::test]
    async fn progress_after_second_batch_is_at_least_80_percent() {
        let progress = Mutex::new(Vec::new());
        let items: Vec<u32> = (0..25).collect();

        batched_map(
            items,
            10,
            |_, item| async move { item },
            |pct| progress.lock().unwrap().push(pct),
        )
        .await;

        let snapshots = progress.lock().unwrap();
        assert_eq!(snapshots.len(), 3, "exactly 3 batches for 25 rows at size 10");
        assert!(snapshots[1] >= 80, "after batch 2: {}", snapshots[1]);
    }

    #[tokio::test]
    async fn at_most_batch_size_operations_in_flight() {
        let in_flight = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);

        batched_map(
            (0..12).collect::<Vec<u32>>(),
            4,
            |_, _| async {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::task::yield_now().await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
            },
            |_| {},
        )
        .await;

        assert!(peak.load(Ordering::SeqCst) <= 4);
    }

    #[tokio::test]
    async fn empty_input_fires_no_progress() {
        let calls = Mutex::new(0u32);
        let outputs: Vec<u32> = batched_map(
            Vec::<u32>::new(),
            10,
            |_, item| async move { item },
            |_| *calls.lock().unwrap() += 1,
        )
        .await;
        assert!(outputs.is_empty());
        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[test]
    fn percent_rounds_half_up_and_caps() {
        assert_eq!(percent_complete(10, 25), 40);
        assert_eq!(percent_complete(20, 25), 80);
        assert_eq!(percent_complete(30, 25), 100);
        assert_eq!(percent_complete(1, 3), 33);
        assert_eq!(percent_complete(2, 3), 67);
    }
}
