//! OTBM house extractor
//!
//! Scans an OTBM map file for tile area and house tile nodes and collects
//! the absolute coordinates of every house tile, grouped by house id.

pub mod codec;
pub mod error;
pub mod extract;
pub mod output;

pub use codec::{scan_for_marker, ByteCursor, HouseTile, ScanOutcome, TileArea, TilePosition};
pub use error::{Error, Result};
pub use extract::{extract_file, extract_houses, RecordStore};
pub use output::{write_file, write_houses, OutputFormat};
