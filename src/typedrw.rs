use std::fs::File;
use std::io;
use std::path::Path;

use memmap2::Mmap;

use crate::endian::Endian;

/// Read-only memory map of a file of fixed-width values in a known byte order.
pub struct TypedMemoryMap {
    map:    Option<Mmap>,   // None for empty files, which cannot be mapped everywhere
    endian: Endian,
}

impl TypedMemoryMap {
    pub fn open<P: AsRef<Path>>(path: P, endian: Endian) -> io::Result<TypedMemoryMap> {
        let file = File::open(path)?;
        let size = file.metadata()?.len();
        let map = if size == 0 {
            None
        } else {
            // the file is only read, and is not expected to change while mapped
            Some(unsafe { Mmap::map(&file)? })
        };
        Ok(TypedMemoryMap { map, endian })
    }

    #[inline]
    pub fn bytes(&self) -> &[u8] {
        match &self.map {
            Some(map) => &map[..],
            None => &[],
        }
    }

    pub fn len(&self) -> usize { self.bytes().len() }
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    #[inline]
    pub fn u32_at(&self, offset: usize) -> u32 {
        self.endian.read_u32(&self.bytes()[offset..offset + 4])
    }
    #[inline]
    pub fn u64_at(&self, offset: usize) -> u64 {
        self.endian.read_u64(&self.bytes()[offset..offset + 8])
    }
    #[inline]
    pub fn f32_at(&self, offset: usize) -> f32 {
        self.endian.read_f32(&self.bytes()[offset..offset + 4])
    }
}
