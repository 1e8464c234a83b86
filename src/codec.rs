//! Byte-order-aware element encoding and decoding

use crate::types::{DataType, MAX_ELEMENT_WIDTH};
use std::io::{self, Read};
use std::ops::Deref;

/// Whether the host stores multi-byte integers most-significant byte first.
///
/// Probes the in-memory layout of the unsigned integer 1: on a big-endian
/// host its first byte is zero.
pub fn host_is_big_endian() -> bool {
    1u32.to_ne_bytes()[0] != 1
}

/// Reverse the byte order of the first `width` bytes of `buffer` in place
pub fn reverse(buffer: &mut [u8], width: usize) {
    for i in 0..width / 2 {
        buffer.swap(i, width - 1 - i);
    }
}

/// Bytes of one element, stored inline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementBytes {
    bytes: [u8; MAX_ELEMENT_WIDTH],
    len: usize,
}

impl Deref for ElementBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

/// Reads and writes single elements of one data type, reversing byte order
/// when the file and host disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementCodec {
    width: usize,
    reverse_needed: bool,
}

impl ElementCodec {
    /// Codec for `data_type` elements stored with the given file byte order
    pub fn new(data_type: DataType, file_big_endian: bool) -> Self {
        Self::with_host(data_type, file_big_endian, host_is_big_endian())
    }

    /// Codec with an explicit host byte order
    pub fn with_host(data_type: DataType, file_big_endian: bool, host_big_endian: bool) -> Self {
        Self {
            width: data_type.size_in_bytes(),
            reverse_needed: file_big_endian != host_big_endian,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn reverse_needed(&self) -> bool {
        self.reverse_needed
    }

    /// Read exactly one element from the current position of `source`,
    /// returned in host byte order.
    pub fn read_element<R: Read>(&self, source: &mut R) -> io::Result<ElementBytes> {
        let mut element = ElementBytes {
            bytes: [0; MAX_ELEMENT_WIDTH],
            len: self.width,
        };
        source.read_exact(&mut element.bytes[..self.width])?;
        if self.reverse_needed {
            reverse(&mut element.bytes, self.width);
        }
        Ok(element)
    }

    /// Convert one host-order element back to file byte order.
    ///
    /// `element` must hold at least `width` bytes; extra bytes are ignored.
    pub(crate) fn write_element(&self, element: &[u8]) -> ElementBytes {
        let mut out = ElementBytes {
            bytes: [0; MAX_ELEMENT_WIDTH],
            len: self.width,
        };
        out.bytes[..self.width].copy_from_slice(&element[..self.width]);
        if self.reverse_needed {
            reverse(&mut out.bytes, self.width);
        }
        out
    }
}
