//! OTBM byte-level format: constants, cursor, marker scanner and the two
//! fixed-layout records the extractor cares about.

pub mod reader;
pub mod scanner;
pub mod types;

pub use reader::ByteCursor;
pub use scanner::{scan_for_marker, ScanOutcome};
pub use types::{HouseTile, TileArea, TilePosition};

pub const NODE_START: u8 = 0xFE;
pub const NODE_END: u8 = 0xFF;
/// Reserved; payload bytes are not unescaped.
pub const ESCAPE_CHAR: u8 = 0xFD;

pub const TILE_AREA: u8 = 0x04;
pub const HOUSE_TILE: u8 = 0x0E;

pub const TILE_AREA_MARKER: [u8; 2] = [NODE_START, TILE_AREA];
pub const HOUSE_TILE_MARKER: [u8; 2] = [NODE_START, HOUSE_TILE];

/// Accepted file identifiers.
pub const IDENTIFIER_OTBM: [u8; 4] = *b"OTBM";
pub const IDENTIFIER_ZERO: [u8; 4] = [0; 4];
