//! Bounded-concurrency dispatch.
//!
//! Runs one future per input item with a fixed ceiling on how many are in
//! flight at once. Both the probing and the copying phase use it; the phases
//! never overlap, so each gets the full limit.

use futures::{StreamExt, stream};
use std::future::Future;

/// Run `f` for every item with at most `limit` futures in flight.
///
/// Results come back in input order regardless of completion order.
/// A `limit` of 0 is treated as 1.
pub async fn dispatch<I, F, Fut, T>(items: I, limit: usize, f: F) -> Vec<T>
where
    I: IntoIterator,
    F: Fn(I::Item) -> Fut,
    Fut: Future<Output = T>,
{
    let limit = limit.max(1);

    let tasks = items.into_iter().enumerate().map(|(index, item)| {
        let fut = f(item);
        async move { (index, fut.await) }
    });

    let mut indexed: Vec<(usize, T)> = stream::iter(tasks)
        .buffer_unordered(limit)
        .collect()
        .await;

    indexed.sort_unstable_by_key(|(index, _)| *index);
    indexed.into_iter().map(|(_, value)| value).collect()
}
