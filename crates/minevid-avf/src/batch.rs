//! Parallel decoding of many files.
//!
//! Each input is decoded as one atomic unit on a worker thread. Workers pull
//! `(index, bytes)` tasks from a shared crossbeam channel and push results
//! back on another; results are returned in input order.

use std::thread;

use crossbeam_channel::unbounded;

use crate::decoder::Decoder;
use crate::error::ParseError;
use crate::types::ReplayRecord;

/// Resolve a worker count, applying auto-detection if `None`.
///
/// Explicit values are clamped to `[1, 64]`; auto-detection uses the
/// available parallelism clamped to `[1, 16]`.
pub fn resolved_worker_count(requested: Option<usize>) -> usize {
    match requested {
        Some(n) => n.clamp(1, 64),
        None => thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4)
            .clamp(1, 16),
    }
}

/// Decode every input, fanning out over a worker pool.
///
/// Equivalent to calling [`Decoder::decode`] on each input in turn.
pub fn decode_batch<B>(
    decoder: &Decoder,
    inputs: &[B],
    workers: Option<usize>,
) -> Vec<Result<ReplayRecord, ParseError>>
where
    B: AsRef<[u8]> + Sync,
{
    if inputs.is_empty() {
        return Vec::new();
    }
    let workers = resolved_worker_count(workers).min(inputs.len());

    let (task_tx, task_rx) = unbounded::<(usize, &[u8])>();
    let (result_tx, result_rx) = unbounded();
    for (index, input) in inputs.iter().enumerate() {
        // The receiver is alive until the scope below ends.
        let _ = task_tx.send((index, input.as_ref()));
    }
    drop(task_tx);

    thread::scope(|s| {
        for _ in 0..workers {
            let task_rx = task_rx.clone();
            let result_tx = result_tx.clone();
            s.spawn(move || {
                while let Ok((index, bytes)) = task_rx.recv() {
                    let _ = result_tx.send((index, decoder.decode(bytes)));
                }
            });
        }
    });
    drop(result_tx);

    let mut results: Vec<_> = result_rx.into_iter().collect();
    results.sort_unstable_by_key(|(index, _)| *index);
    tracing::debug!(
        inputs = inputs.len(),
        workers,
        failed = results.iter().filter(|(_, r)| r.is_err()).count(),
        "batch decode finished"
    );
    results.into_iter().map(|(_, result)| result).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_worker_counts_are_clamped() {
        assert_eq!(resolved_worker_count(Some(0)), 1);
        assert_eq!(resolved_worker_count(Some(8)), 8);
        assert_eq!(resolved_worker_count(Some(1000)), 64);
        let auto = resolved_worker_count(None);
        assert!((1..=16).contains(&auto));
    }

    #[test]
    fn empty_batch() {
        let inputs: Vec<Vec<u8>> = Vec::new();
        assert!(decode_batch(&Decoder::default(), &inputs, Some(4)).is_empty());
    }

    #[test]
    fn failures_keep_input_order() {
        let inputs: Vec<Vec<u8>> = (0..20u8).map(|n| vec![52, 0, 0, 0, 0, 10 + n]).collect();
        let results = decode_batch(&Decoder::default(), &inputs, Some(3));
        assert_eq!(results.len(), 20);
        for (n, result) in results.iter().enumerate() {
            let err = result.as_ref().unwrap_err();
            assert_eq!(
                err.kind,
                crate::ErrorKind::UnrecognizedMode { code: 10 + n as u8 }
            );
        }
    }
}
