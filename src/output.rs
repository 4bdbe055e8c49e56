//! Text renderings of a finished `RecordStore`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use clap::ValueEnum;

use crate::error::{Context, Result};
use crate::extract::RecordStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// `houses = { [id] = { {x = .., y = .., z = ..}, ... }, ... }`
    #[default]
    Lua,
    /// `{"id": [{"x": .., "y": .., "z": ..}, ...], ...}`
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OutputFormat::Lua => "lua",
            OutputFormat::Json => "json",
        };
        f.write_str(s)
    }
}

pub fn write_houses<W: Write>(mut out: W, format: OutputFormat, store: &RecordStore) -> Result<()> {
    match format {
        OutputFormat::Lua => write_lua(&mut out, store)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, store).map_err(std::io::Error::from)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Create (or truncate) `path` and write the store into it.
pub fn write_file(path: &Path, format: OutputFormat, store: &RecordStore) -> Result<()> {
    let file = File::create(path).during("creating output file")?;
    write_houses(BufWriter::new(file), format, store).during("writing house data")
}

fn write_lua<W: Write>(out: &mut W, store: &RecordStore) -> std::io::Result<()> {
    writeln!(out, "houses = {{")?;
    for (id, tiles) in store.iter() {
        writeln!(out, "  [{id}] = {{")?;
        for tile in tiles {
            let p = tile.position;
            writeln!(out, "    {{x = {}, y = {}, z = {}}},", p.x, p.y, p.z)?;
        }
        writeln!(out, "  }},")?;
    }
    writeln!(out, "}}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{HouseTile, TilePosition};

    fn sample_store() -> RecordStore {
        let mut store = RecordStore::new();
        for (house_id, x, y, z) in [(5, 11, 22, 7), (5, 13, 24, 7), (9, 0, 0, 0)] {
            store.insert(HouseTile { house_id, position: TilePosition { x, y, z } });
        }
        store
    }

    #[test]
    fn test_write_lua() {
        let mut out = Vec::new();
        write_houses(&mut out, OutputFormat::Lua, &sample_store()).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "houses = {\n\
             \x20 [5] = {\n\
             \x20   {x = 11, y = 22, z = 7},\n\
             \x20   {x = 13, y = 24, z = 7},\n\
             \x20 },\n\
             \x20 [9] = {\n\
             \x20   {x = 0, y = 0, z = 0},\n\
             \x20 },\n\
             }\n"
        );
    }

    #[test]
    fn test_write_lua_empty() {
        let mut out = Vec::new();
        write_houses(&mut out, OutputFormat::Lua, &RecordStore::new()).unwrap();
        assert_eq!(out, b"houses = {\n}\n");
    }

    #[test]
    fn test_write_json() {
        let mut out = Vec::new();
        write_houses(&mut out, OutputFormat::Json, &sample_store()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "5": [{"x": 11, "y": 22, "z": 7}, {"x": 13, "y": 24, "z": 7}],
                "9": [{"x": 0, "y": 0, "z": 0}],
            })
        );
    }
}
