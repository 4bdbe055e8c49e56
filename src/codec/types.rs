use std::io::{Read, Seek};

use serde::Serialize;

use super::ByteCursor;
use crate::error::{Context, Result};

/// Base position of a tile area node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileArea {
    pub base_x: u16,
    pub base_y: u16,
    pub base_z: u8,
}

impl TileArea {
    /// Decode the 5-byte record that follows a tile area marker.
    pub fn read<R: Read + Seek>(cursor: &mut ByteCursor<R>) -> Result<Self> {
        Ok(Self {
            base_x: cursor
                .require(ByteCursor::read_u16_le)
                .during("reading tile area base x pos")?,
            base_y: cursor
                .require(ByteCursor::read_u16_le)
                .during("reading tile area base y pos")?,
            base_z: cursor
                .require(ByteCursor::read_u8)
                .during("reading tile area base z pos")?,
        })
    }
}

/// Absolute tile coordinates. x/y may exceed `u16::MAX` by up to one
/// offset byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TilePosition {
    pub x: u32,
    pub y: u32,
    pub z: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HouseTile {
    pub house_id: u32,
    pub position: TilePosition,
}

impl HouseTile {
    /// Decode the 6-byte record that follows a house tile marker, placing it
    /// relative to the area it was found in.
    pub fn read<R: Read + Seek>(cursor: &mut ByteCursor<R>, area: &TileArea) -> Result<Self> {
        let off_x = cursor
            .require(ByteCursor::read_u8)
            .during("reading house tile offset x pos")?;
        let off_y = cursor
            .require(ByteCursor::read_u8)
            .during("reading house tile offset y pos")?;
        let house_id = cursor
            .require(ByteCursor::read_u32_le)
            .during("reading house tile house id")?;

        Ok(Self {
            house_id,
            position: TilePosition {
                x: u32::from(area.base_x) + u32::from(off_x),
                y: u32::from(area.base_y) + u32::from(off_y),
                z: area.base_z,
            },
        })
    }
}
