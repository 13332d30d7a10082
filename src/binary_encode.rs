//! Writer for the ISLA binary format.

use crate::error::{Error, Result};
use crate::value::BinValue;

const MAGIC: &[u8; 5] = b"ISLAb";
const VERSION: [u8; 3] = [0x00, 0x00, 0x01];

/// Largest count a 28-bit header field can carry.
const MAX_COUNT: usize = 0x0FFF_FFFF;

/// Encode a [`BinValue`] tree to its binary representation.
pub fn encode_binary(value: &BinValue) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&VERSION);
    encode_value(value, &mut out)?;
    Ok(out)
}

fn write_header(out: &mut Vec<u8>, tag: u8, count: u32) {
    let word = ((tag as u32) << 28) | (count & 0x0FFF_FFFF);
    out.extend_from_slice(&word.to_le_bytes());
}

fn encode_value(value: &BinValue, out: &mut Vec<u8>) -> Result<()> {
    match value {
        BinValue::Leaf(bytes) => {
            if bytes.len() > MAX_COUNT {
                return Err(Error::EncodeTooLong {
                    what: "leaf",
                    len: bytes.len(),
                    max: MAX_COUNT as u64,
                });
            }
            write_header(out, 0, bytes.len() as u32);
            out.extend_from_slice(bytes);
        }
        BinValue::List(items) => {
            if items.len() > MAX_COUNT {
                return Err(Error::EncodeTooLong {
                    what: "list",
                    len: items.len(),
                    max: MAX_COUNT as u64,
                });
            }
            write_header(out, 1, items.len() as u32);
            for item in items {
                encode_value(item, out)?;
            }
        }
        BinValue::Map(map) => {
            if map.len() > MAX_COUNT {
                return Err(Error::EncodeTooLong {
                    what: "map",
                    len: map.len(),
                    max: MAX_COUNT as u64,
                });
            }
            write_header(out, 2, map.len() as u32);
            for (key, value) in map {
                if key.len() as u64 > u32::MAX as u64 {
                    return Err(Error::EncodeTooLong {
                        what: "map key",
                        len: key.len(),
                        max: u32::MAX as u64,
                    });
                }
                out.extend_from_slice(&(key.len() as u32).to_le_bytes());
                out.extend_from_slice(key);
                encode_value(value, out)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary_decode::decode_binary;

    #[test]
    fn round_trips_leaves_and_empties() {
        let value = BinValue::leaf_list([
            b";)".to_vec(),
            b":3".to_vec(),
            b"".to_vec(),
            b":".to_vec(),
        ]);
        let bytes = encode_binary(&value).unwrap();
        assert_eq!(decode_binary(&bytes).unwrap(), value);
    }

    #[test]
    fn round_trips_nested_grid() {
        let row = |vals: &[u8]| -> BinValue {
            BinValue::List(vals.iter().map(|b| BinValue::Leaf(vec![*b])).collect())
        };
        let grid = BinValue::List(vec![row(&[1, 2, 3]), row(&[4, 5, 6])]);
        let mut map = crate::value::ValueMap::new();
        map.insert(b"grid".to_vec(), grid);
        let value = BinValue::Map(map);

        let bytes = encode_binary(&value).unwrap();
        let decoded = decode_binary(&bytes).unwrap();
        assert_eq!(
            decoded
                .index_key(b"grid")
                .unwrap()
                .index(1)
                .unwrap()
                .index(2)
                .unwrap()
                .as_leaf()
                .unwrap(),
            &[6]
        );
        assert_eq!(decoded, value);
    }

    #[test]
    fn header_starts_with_magic_and_version() {
        let bytes = encode_binary(&BinValue::Leaf(vec![])).unwrap();
        assert_eq!(&bytes[..5], b"ISLAb");
        assert_eq!(&bytes[5..8], &[0x00, 0x00, 0x01]);
    }

    #[test]
    fn map_key_length_encoded_as_full_u32() {
        let mut map = crate::value::ValueMap::new();
        map.insert(b"k".to_vec(), BinValue::Leaf(b"v".to_vec()));
        let value = BinValue::Map(map);
        let bytes = encode_binary(&value).unwrap();
        // header(4) + magic/version(8) + key length word(4)
        let key_len_offset = 8 + 4;
        let key_len = u32::from_le_bytes(bytes[key_len_offset..key_len_offset + 4].try_into().unwrap());
        assert_eq!(key_len, 1);
    }
}
