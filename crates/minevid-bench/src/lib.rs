//! Benchmark corpora for the minevid decoder.
//!
//! - [`reference_corpus`]: one recording per preset plus a custom board
//! - [`batch_corpus`]: many recordings of mixed length for pool benchmarks

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use minevid_test_utils::{long_replay, AvfBuilder, RawEvent};

/// Finish `builder` with `n_events` mouse moves.
fn with_events(builder: AvfBuilder, n_events: usize) -> Vec<u8> {
    let events: Vec<RawEvent> = (0..n_events.max(1))
        .map(|i| {
            RawEvent::new(
                1,
                (i % 256) as u16,
                (i % 200) as u16,
                (i / 100) as u16,
                (i % 100) as u8,
            )
        })
        .collect();
    builder.events(&events).pair("Skin", "Classic").build()
}

/// Beginner, Intermediate, Expert and a 50x50 custom game, 2K events each.
pub fn reference_corpus() -> Vec<Vec<u8>> {
    vec![
        with_events(AvfBuilder::beginner(), 2_000),
        with_events(AvfBuilder::intermediate(), 2_000),
        with_events(AvfBuilder::expert(), 2_000),
        with_events(AvfBuilder::custom(50, 50, 500), 2_000),
    ]
}

/// `files` Expert recordings whose event counts cycle from 1K to 20K.
pub fn batch_corpus(files: usize) -> Vec<Vec<u8>> {
    (0..files)
        .map(|i| long_replay(1_000 * (1 + i % 20)))
        .collect()
}
