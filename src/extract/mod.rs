//! House tile extraction.
//!
//! The traversal alternates between looking for the next tile area and
//! collecting the house tiles inside it:
//!
//! ```text
//! Seeking(Area) -> ReadingArea -> Seeking(TileOrEnd) <-> ReadingTile
//!      ^                                 |
//!      +----------- area marker ---------+      (end of stream -> Done)
//! ```
//!
//! Running out of input while *seeking* is the normal way to finish.
//! Running out while *reading* a record aborts the whole extraction.

pub mod store;

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use tracing::{debug, info};

use crate::codec::{
    scan_for_marker, ByteCursor, HouseTile, ScanOutcome, TileArea, HOUSE_TILE_MARKER,
    IDENTIFIER_OTBM, IDENTIFIER_ZERO, TILE_AREA_MARKER,
};
use crate::error::{Context, Error, Result};

pub use store::RecordStore;

/// Traversal position. Tile states carry the area their offsets apply to,
/// so a tile can never be placed against a stale or missing area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Seeking(Seeking),
    ReadingArea,
    ReadingTile(TileArea),
    Done,
}

/// The two states that scan the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seeking {
    Area,
    TileOrEnd(TileArea),
}

/// What a seeking state's scan ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scan {
    Marker,
    Terminator,
    EndOfStream,
}

impl Seeking {
    fn marker(&self) -> &'static [u8] {
        match self {
            Seeking::Area => &TILE_AREA_MARKER,
            Seeking::TileOrEnd(_) => &HOUSE_TILE_MARKER,
        }
    }

    fn terminator(&self) -> Option<&'static [u8]> {
        match self {
            Seeking::Area => None,
            Seeking::TileOrEnd(_) => Some(&TILE_AREA_MARKER),
        }
    }

    fn operation(&self) -> &'static str {
        match self {
            Seeking::Area => "looking for tile area node",
            Seeking::TileOrEnd(_) => "looking for house tile node",
        }
    }

    /// Next state after this state's scan.
    pub fn after_scan(self, scan: Scan) -> State {
        match (self, scan) {
            (Seeking::Area, Scan::Marker) => State::ReadingArea,
            (Seeking::Area, Scan::Terminator) => {
                unreachable!("tile area scans run without a terminator")
            }
            (Seeking::Area, Scan::EndOfStream) => State::Done,
            (Seeking::TileOrEnd(area), Scan::Marker) => State::ReadingTile(area),
            (Seeking::TileOrEnd(_), Scan::Terminator) => State::Seeking(Seeking::Area),
            (Seeking::TileOrEnd(_), Scan::EndOfStream) => State::Done,
        }
    }
}

fn scan<R: Read + Seek>(
    cursor: &mut ByteCursor<R>,
    marker: &[u8],
    terminator: Option<&[u8]>,
) -> Result<Scan> {
    match scan_for_marker(cursor, marker, terminator) {
        Ok(ScanOutcome::Found) => Ok(Scan::Marker),
        Ok(ScanOutcome::Terminated) => Ok(Scan::Terminator),
        Err(e) if e.is_end_of_stream() => Ok(Scan::EndOfStream),
        Err(e) => Err(e),
    }
}

/// Accept the 4-byte identifier if it is `OTBM` or all zeros.
pub fn check_identifier<R: Read + Seek>(cursor: &mut ByteCursor<R>) -> Result<()> {
    let identifier = cursor
        .require(ByteCursor::read_array::<4>)
        .during("reading file identifier")?;
    if identifier != IDENTIFIER_ZERO && identifier != IDENTIFIER_OTBM {
        return Err(Error::InvalidFormat { identifier });
    }
    Ok(())
}

/// Run the traversal over one byte source.
///
/// The store is returned whole; on error nothing accumulated so far is
/// handed back.
pub fn extract_houses<R: Read + Seek>(source: R) -> Result<RecordStore> {
    let mut cursor = ByteCursor::new(source);
    check_identifier(&mut cursor).during("validating file identifier")?;
    traverse(&mut cursor).during("reading map data")
}

/// Open `path` and extract from it. The file is closed when this returns.
pub fn extract_file(path: &Path) -> Result<RecordStore> {
    let file = File::open(path).during("opening input file")?;
    extract_houses(BufReader::new(file))
}

fn traverse<R: Read + Seek>(cursor: &mut ByteCursor<R>) -> Result<RecordStore> {
    let mut store = RecordStore::new();
    let mut state = State::Seeking(Seeking::Area);

    loop {
        state = match state {
            State::Seeking(seeking) => {
                let found = scan(cursor, seeking.marker(), seeking.terminator())
                    .during(seeking.operation())?;
                seeking.after_scan(found)
            }
            State::ReadingArea => {
                let area = TileArea::read(cursor).during("reading tile area")?;
                debug!(offset = cursor.position(), ?area, "tile area");
                State::Seeking(Seeking::TileOrEnd(area))
            }
            State::ReadingTile(area) => {
                let tile = HouseTile::read(cursor, &area).during("reading house tile")?;
                debug!(offset = cursor.position(), house_id = tile.house_id, "house tile");
                store.insert(tile);
                State::Seeking(Seeking::TileOrEnd(area))
            }
            State::Done => break,
        };
    }

    info!(
        houses = store.house_count(),
        tiles = store.tile_count(),
        "house extraction finished"
    );
    Ok(store)
}
