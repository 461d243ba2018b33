//! Event stream phase: fixed 8-byte mouse records.
//!
//! The stream has no length prefix. Its start is found by sliding a 3-byte
//! window until `w[2] == 1 && w[1] <= 1`, which matches the first bytes of
//! a record stamped at 0 seconds. Records follow back to back until one
//! decodes to a negative time.
//!
//! ```text
//! byte: 0      1     2      3     4          5     6      7
//!       mouse  x_hi  sec_lo x_lo  hundredths y_hi  sec_hi y_lo
//! ```

use crate::cursor::ByteCursor;
use crate::error::{ParseError, Phase};
use crate::types::EventSample;

/// Size of one event record.
pub const RECORD_LEN: usize = 8;

/// Width of the sentinel search window.
const SENTINEL_WINDOW: usize = 3;

fn is_sentinel(window: &[u8; SENTINEL_WINDOW]) -> bool {
    window[2] == 1 && window[1] <= 1
}

/// Scan for the first record and decode records until the terminator.
///
/// The terminating record is consumed and discarded.
pub fn decode_events(cursor: &mut ByteCursor<'_>) -> Result<Vec<EventSample>, ParseError> {
    cursor.set_phase(Phase::EventStream);

    let mut window = [0u8; SENTINEL_WINDOW];
    while !is_sentinel(&window) {
        window = [window[1], window[2], cursor.next_byte()?];
    }
    // A match inside the zeroed prefix starts the record before the cursor did.
    let start = cursor.position().saturating_sub(SENTINEL_WINDOW);

    let mut record = [0u8; RECORD_LEN];
    record[..SENTINEL_WINDOW].copy_from_slice(&window);
    for byte in &mut record[SENTINEL_WINDOW..] {
        *byte = cursor.next_byte()?;
    }

    let mut events = Vec::new();
    while let Some(sample) = EventSample::decode(&record) {
        events.push(sample);
        for byte in &mut record {
            *byte = cursor.next_byte()?;
        }
    }

    tracing::trace!(
        start,
        end = cursor.position(),
        count = events.len(),
        "event stream"
    );
    Ok(events)
}
