//! Reader for the ISLA binary format.
//!
//! Every value is a 4-byte little-endian header (4-bit type tag, 28-bit
//! count) followed by a tag-specific body. All reads are bounds-checked
//! before the bytes are touched, mirroring the checked-read helpers a
//! binary format reader normally carries for untrusted input.

use crate::error::{Error, Result};
use crate::value::{BinValue, ValueMap};

const MAGIC: &[u8; 5] = b"ISLAb";
const VERSION: [u8; 3] = [0x00, 0x00, 0x01];

/// Recursion ceiling for nested list/map values. Not a format rule — a
/// defensive limit against crafted input trying to blow the call stack.
const MAX_DECODE_DEPTH: usize = 256;

/// Cap on the capacity reserved up front for a claimed list/map count, so a
/// small file claiming a huge element count can't force a multi-gigabyte
/// allocation before the first bounds check fails.
const MAX_PREALLOC: usize = 4096;

struct Decoder<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    fn read_bytes(&mut self, what: &'static str, n: usize) -> Result<&'a [u8]> {
        let remaining = self.data.len() - self.pos;
        let end = self.pos.checked_add(n).filter(|&e| e <= self.data.len());
        match end {
            Some(end) => {
                let slice = &self.data[self.pos..end];
                self.pos = end;
                Ok(slice)
            }
            None => Err(Error::DecodeOutOfBounds {
                what,
                needed: n,
                remaining,
            }),
        }
    }

    fn read_u32_le(&mut self, what: &'static str) -> Result<u32> {
        let bytes = self.read_bytes(what, 4)?;
        Ok(u32::from_le_bytes(bytes.try_into().unwrap()))
    }

    fn decode_value(&mut self, depth: usize) -> Result<BinValue> {
        if depth > MAX_DECODE_DEPTH {
            return Err(Error::NestingDepthExceeded {
                max: MAX_DECODE_DEPTH,
            });
        }
        let header = self.read_u32_le("value header")?;
        let tag = (header >> 28) as u8;
        let count = (header & 0x0FFF_FFFF) as usize;
        match tag {
            0 => {
                let bytes = self.read_bytes("leaf payload", count)?;
                Ok(BinValue::Leaf(bytes.to_vec()))
            }
            1 => {
                let mut items = Vec::with_capacity(count.min(MAX_PREALLOC));
                for _ in 0..count {
                    items.push(self.decode_value(depth + 1)?);
                }
                Ok(BinValue::List(items))
            }
            2 => {
                let mut map = ValueMap::with_capacity(count.min(MAX_PREALLOC));
                for _ in 0..count {
                    let key_len = self.read_u32_le("map key length")? as usize;
                    let key = self.read_bytes("map key", key_len)?.to_vec();
                    let value = self.decode_value(depth + 1)?;
                    // Last write wins: IndexMap::insert updates the value
                    // in place for an existing key.
                    map.insert(key, value);
                }
                Ok(BinValue::Map(map))
            }
            other => Err(Error::InvalidType { tag: other }),
        }
    }
}

/// Decode a byte slice into a [`BinValue`]. Bytes after the top-level value
/// are ignored rather than rejected.
pub fn decode_binary(bytes: &[u8]) -> Result<BinValue> {
    if bytes.len() < MAGIC.len() + VERSION.len()
        || &bytes[..MAGIC.len()] != MAGIC
        || bytes[MAGIC.len()..MAGIC.len() + VERSION.len()] != VERSION
    {
        return Err(Error::BadHeader {
            expected: "ISLAb\\x00\\x00\\x01".to_string(),
            got: describe_header(bytes),
        });
    }
    let mut decoder = Decoder {
        data: bytes,
        pos: MAGIC.len() + VERSION.len(),
    };
    decoder.decode_value(0)
}

fn describe_header(bytes: &[u8]) -> String {
    let n = bytes.len().min(8);
    bytes[..n]
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
