use std::io::{self, Write};

use byteorder::{BigEndian, ByteOrder, LittleEndian, NativeEndian, WriteBytesExt};

/// Byte order of edge records and of the emitted binary graph.
///
/// Every stage that touches bytes takes the same value, so a file written
/// with one setting must be read back with that setting.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
    #[default]
    Native,
}

// binds `$order` to the byteorder type matching `$endian` and evaluates `$body`.
macro_rules! with_order {
    ($endian:expr, $order:ident => $body:expr) => {
        match $endian {
            Endian::Little => { type $order = LittleEndian; $body }
            Endian::Big => { type $order = BigEndian; $body }
            Endian::Native => { type $order = NativeEndian; $body }
        }
    };
}

impl Endian {
    pub fn parse(name: &str) -> Option<Endian> {
        match name {
            "little" | "le" => Some(Endian::Little),
            "big" | "be" => Some(Endian::Big),
            "native" => Some(Endian::Native),
            _ => None,
        }
    }

    #[inline]
    pub fn read_u32(self, buf: &[u8]) -> u32 { with_order!(self, B => B::read_u32(buf)) }
    #[inline]
    pub fn read_u64(self, buf: &[u8]) -> u64 { with_order!(self, B => B::read_u64(buf)) }
    #[inline]
    pub fn read_f32(self, buf: &[u8]) -> f32 { with_order!(self, B => B::read_f32(buf)) }
    #[inline]
    pub fn read_f64(self, buf: &[u8]) -> f64 { with_order!(self, B => B::read_f64(buf)) }

    #[inline]
    pub fn write_u32<W: Write>(self, writer: &mut W, value: u32) -> io::Result<()> {
        with_order!(self, B => writer.write_u32::<B>(value))
    }
    #[inline]
    pub fn write_u64<W: Write>(self, writer: &mut W, value: u64) -> io::Result<()> {
        with_order!(self, B => writer.write_u64::<B>(value))
    }
    #[inline]
    pub fn write_f32<W: Write>(self, writer: &mut W, value: f32) -> io::Result<()> {
        with_order!(self, B => writer.write_f32::<B>(value))
    }
    #[inline]
    pub fn write_f64<W: Write>(self, writer: &mut W, value: f64) -> io::Result<()> {
        with_order!(self, B => writer.write_f64::<B>(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_orders_differ() {
        let mut little = Vec::new();
        let mut big = Vec::new();
        Endian::Little.write_u32(&mut little, 0x0102_0304).unwrap();
        Endian::Big.write_u32(&mut big, 0x0102_0304).unwrap();
        assert_eq!(little, vec![4, 3, 2, 1]);
        assert_eq!(big, vec![1, 2, 3, 4]);
        assert_eq!(Endian::Big.read_u32(&big), 0x0102_0304);
    }

    #[test]
    fn native_matches_platform() {
        let mut bytes = Vec::new();
        Endian::Native.write_u64(&mut bytes, 77).unwrap();
        assert_eq!(bytes, 77u64.to_ne_bytes().to_vec());
    }

    #[test]
    fn parse_names() {
        assert_eq!(Endian::parse("little"), Some(Endian::Little));
        assert_eq!(Endian::parse("be"), Some(Endian::Big));
        assert_eq!(Endian::parse("native"), Some(Endian::Native));
        assert_eq!(Endian::parse("middle"), None);
    }
}
