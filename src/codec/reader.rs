use std::io::{self, Read, Seek};

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{Error, Result};

/// Forward-only reader over a seekable byte source.
///
/// Reads exactly what the caller asks for; the only way back is an explicit
/// `seek_relative` with a negative delta.
pub struct ByteCursor<R> {
    inner: R,
    pos: u64,
}

impl<R: Read + Seek> ByteCursor<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, pos: 0 }
    }

    /// Absolute offset from the start of the source.
    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Fill `buf` completely. `EndOfStream` if the source had nothing left,
    /// `ShortRead` if it ran dry partway.
    fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        self.pos += filled as u64;

        match filled {
            n if n == buf.len() => Ok(()),
            0 => Err(Error::EndOfStream),
            actual => Err(Error::ShortRead { expected: buf.len(), actual }),
        }
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; n];
        self.fill(&mut buf)?;
        Ok(buf)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.fill(&mut buf)?;
        Ok(buf)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let [b] = self.read_array::<1>()?;
        Ok(b)
    }

    pub fn read_u16_le(&mut self) -> Result<u16> {
        Ok(LittleEndian::read_u16(&self.read_array::<2>()?))
    }

    pub fn read_u32_le(&mut self) -> Result<u32> {
        Ok(LittleEndian::read_u32(&self.read_array::<4>()?))
    }

    pub fn read_u64_le(&mut self) -> Result<u64> {
        Ok(LittleEndian::read_u64(&self.read_array::<8>()?))
    }

    /// Read a field of a fixed-layout record. Running out before its first
    /// byte is a short read here, never the end of the stream.
    pub fn require<T>(&mut self, read: fn(&mut Self) -> Result<T>) -> Result<T> {
        read(self).map_err(|e| match e {
            Error::EndOfStream => Error::ShortRead {
                expected: std::mem::size_of::<T>(),
                actual: 0,
            },
            other => other,
        })
    }

    /// Move by `delta` bytes from the current position. Positions before the
    /// start of the source are rejected without touching the source.
    pub fn seek_relative(&mut self, delta: i64) -> Result<()> {
        let position = self.pos;
        let target = position
            .checked_add_signed(delta)
            .ok_or(Error::Seek { delta, position })?;
        self.inner
            .seek_relative(delta)
            .map_err(|_| Error::Seek { delta, position })?;
        self.pos = target;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn cursor(data: &[u8]) -> ByteCursor<Cursor<&[u8]>> {
        ByteCursor::new(Cursor::new(data))
    }

    #[test]
    fn test_read_primitives() {
        let data = [
            0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07,
            0x08, 0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x0E, 0x0F,
        ];
        let mut reader = cursor(&data);

        assert_eq!(reader.read_u8().unwrap(), 0x01);
        assert_eq!(reader.read_u16_le().unwrap(), 0x0302);
        assert_eq!(reader.read_u32_le().unwrap(), 0x07060504);
        assert_eq!(reader.read_u64_le().unwrap(), 0x0F0E0D0C0B0A0908);
        assert_eq!(reader.position(), 15);
        assert!(matches!(reader.read_u8(), Err(Error::EndOfStream)));
    }

    #[test]
    fn test_read_bytes() {
        let mut reader = cursor(b"OTBM\x00");
        assert_eq!(reader.read_bytes(4).unwrap(), b"OTBM");
        assert_eq!(reader.read_bytes(0).unwrap(), Vec::<u8>::new());
        assert_eq!(reader.position(), 4);
    }

    #[test]
    fn test_short_read_distinct_from_end() {
        let mut reader = cursor(&[0xAA, 0xBB]);
        assert!(matches!(
            reader.read_u32_le(),
            Err(Error::ShortRead { expected: 4, actual: 2 })
        ));

        let mut reader = cursor(&[]);
        assert!(matches!(reader.read_u32_le(), Err(Error::EndOfStream)));
    }

    #[test]
    fn test_require_turns_end_into_short_read() {
        let mut reader = cursor(&[0x01]);
        assert_eq!(reader.require(ByteCursor::read_u8).unwrap(), 0x01);
        assert!(matches!(
            reader.require(ByteCursor::read_u16_le),
            Err(Error::ShortRead { expected: 2, actual: 0 })
        ));
        assert!(matches!(
            reader.require(ByteCursor::read_array::<4>),
            Err(Error::ShortRead { expected: 4, actual: 0 })
        ));
        assert!(!reader.require(ByteCursor::read_u32_le).unwrap_err().is_end_of_stream());
    }

    #[test]
    fn test_seek_relative() {
        let mut reader = cursor(&[0x10, 0x20, 0x30]);
        reader.read_u16_le().unwrap();
        reader.seek_relative(-1).unwrap();
        assert_eq!(reader.position(), 1);
        assert_eq!(reader.read_u8().unwrap(), 0x20);

        reader.seek_relative(-2).unwrap();
        assert_eq!(reader.read_u8().unwrap(), 0x10);
    }

    #[test]
    fn test_seek_before_start_fails() {
        let mut reader = cursor(&[0x10, 0x20]);
        reader.read_u8().unwrap();
        assert!(matches!(
            reader.seek_relative(-2),
            Err(Error::Seek { delta: -2, position: 1 })
        ));
        // Position is untouched by a rejected seek.
        assert_eq!(reader.read_u8().unwrap(), 0x20);
    }
}
