//! Byte-level search for node markers.
//!
//! The scanner walks the stream one byte at a time without parsing the node
//! tree. When a byte starts a candidate sequence it reads the rest of the
//! candidate in place:
//!
//! - A broken terminator candidate is rewound to just after its first byte,
//!   so the same byte can still start a marker.
//! - A broken marker candidate is *not* rewound. Bytes consumed while probing
//!   it are never re-examined as the start of another sequence, so a marker
//!   beginning inside a failed candidate (e.g. `FE FE 0E` when looking for
//!   `FE 0E`) is skipped. Existing extracted data depends on this.
//!
//! Escape bytes (`0xFD`) are not interpreted; a literal `FE` inside a node
//! payload is indistinguishable from a node start.

use std::io::{Read, Seek};

use tracing::trace;

use super::ByteCursor;
use crate::error::Result;

/// How a scan ended, other than running out of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Marker consumed; the cursor sits on the first byte after it.
    Found,
    /// Terminator seen and left unconsumed; the cursor sits on its first byte.
    Terminated,
}

enum Tail {
    Matched,
    /// Mismatch after reading `read` bytes, the mismatching byte included.
    Broken { read: usize },
}

/// Read `expected.len()` bytes one at a time until one differs.
fn match_tail<R: Read + Seek>(cursor: &mut ByteCursor<R>, expected: &[u8]) -> Result<Tail> {
    for (i, &want) in expected.iter().enumerate() {
        if cursor.read_u8()? != want {
            return Ok(Tail::Broken { read: i + 1 });
        }
    }
    Ok(Tail::Matched)
}

/// Advance until `marker` is found or `terminator` is seen.
///
/// Fails with `Error::EndOfStream` when the input runs out first, which is
/// the normal "no more markers" signal. An empty marker matches immediately;
/// an empty terminator is the same as none.
pub fn scan_for_marker<R: Read + Seek>(
    cursor: &mut ByteCursor<R>,
    marker: &[u8],
    terminator: Option<&[u8]>,
) -> Result<ScanOutcome> {
    let Some((&marker_first, marker_tail)) = marker.split_first() else {
        return Ok(ScanOutcome::Found);
    };
    let terminator = terminator.and_then(|t| t.split_first());

    loop {
        let byte = cursor.read_u8()?;

        if let Some((&term_first, term_tail)) = terminator {
            if byte == term_first {
                match match_tail(cursor, term_tail)? {
                    Tail::Matched => {
                        cursor.seek_relative(-(term_tail.len() as i64 + 1))?;
                        return Ok(ScanOutcome::Terminated);
                    }
                    Tail::Broken { read } => {
                        trace!(offset = cursor.position(), read, "terminator candidate broken");
                        cursor.seek_relative(-(read as i64))?;
                    }
                }
            }
        }

        if byte == marker_first {
            if let Tail::Matched = match_tail(cursor, marker_tail)? {
                return Ok(ScanOutcome::Found);
            }
        }
    }
}
