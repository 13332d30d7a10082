//! ISLA — a human-readable text format and a compact binary format sharing
//! one value tree.
//!
//! ```
//! use isla::{decode_text_str, encode_text, TextValue};
//!
//! let value = TextValue::leaf_map([("greeting", "hello")]);
//! let text = encode_text(&value).unwrap();
//! assert_eq!(decode_text_str(&text).unwrap(), value);
//! ```
//!
//! The text and binary codecs are independent; they share only the error
//! type and the accessor vocabulary on their respective value types
//! ([`TextValue`] for text, [`BinValue`] for binary). Neither codec does
//! file I/O, schema validation, or typed (number/date) decoding — callers
//! build that on top of the string/byte leaves this crate hands back.

mod binary_decode;
mod binary_encode;
mod error;
mod text_decode;
mod text_encode;
mod value;

pub use binary_decode::decode_binary;
pub use binary_encode::encode_binary;
pub use error::{Error, Result};
pub use text_decode::{decode_text, decode_text_str};
pub use text_encode::encode_text;
pub use value::{BinValue, TextValue, ValueKind, ValueMap};

fn _assert_send_sync<T: Send + Sync>() {}
#[allow(dead_code)]
fn _value_types_are_send_sync() {
    _assert_send_sync::<TextValue>();
    _assert_send_sync::<BinValue>();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_map_scenario_decodes_to_none() {
        assert_eq!(decode_text_str("ISLA1").unwrap(), TextValue::None);
    }

    #[test]
    fn text_round_trip_through_public_api() {
        let value = TextValue::leaf_map([("a", "1"), ("b", "2")]);
        let encoded = encode_text(&value).unwrap();
        assert_eq!(decode_text_str(&encoded).unwrap(), value);
    }

    #[test]
    fn binary_round_trip_through_public_api() {
        let value = BinValue::leaf_list([b"x".to_vec(), b"y".to_vec()]);
        let encoded = encode_binary(&value).unwrap();
        assert_eq!(decode_binary(&encoded).unwrap(), value);
    }
}
