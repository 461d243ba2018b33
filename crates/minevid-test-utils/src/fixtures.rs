//! Ready-made recordings.
//!
//! - [`sample_beginner`]: a short Beginner game with known metadata.
//! - [`long_replay`]: an Expert game with a configurable number of events,
//!   sized for benchmarks.

use crate::{AvfBuilder, RawEvent};

/// Beginner, 10 mines, 3BV 123 in 45.67 s, skin `Classic`, three events.
///
/// Decodes to an 8x8 board with `elapsed_seconds == 44` and
/// `elapsed_hundredths == 67`.
pub fn sample_beginner() -> Vec<u8> {
    AvfBuilder::beginner()
        .score(123, "45.67")
        .events(&[
            RawEvent::new(1, 40, 40, 0, 0),
            RawEvent::new(3, 40, 40, 0, 12),
            RawEvent::new(5, 40, 40, 1, 3),
        ])
        .pair("Skin", "Classic")
        .build()
}

/// Expert game with `n_events` mouse moves spread over the clock.
///
/// `n_events` is raised to 1 if zero.
pub fn long_replay(n_events: usize) -> Vec<u8> {
    let events: Vec<RawEvent> = (0..n_events.max(1))
        .map(|i| {
            let x = (i % 480) as u16;
            let y = (i % 256) as u16;
            // Seconds stay at 0 for the first record so the sentinel holds.
            let seconds = (i / 100) as u16;
            let mouse = if i == 0 { 3 } else { 1 };
            RawEvent::new(mouse, x, y, seconds, (i % 100) as u8)
        })
        .collect();
    AvfBuilder::expert()
        .score(180, "120.34")
        .events(&events)
        .pair("Skin", "Classic")
        .pair("Realtime", "120,34")
        .player("Bench Player")
        .build()
}
