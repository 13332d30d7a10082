#![no_main]
use libfuzzer_sys::fuzz_target;

/// Recursively walk a decoded value tree to force traversal of every nested
/// list/map the reader produced.
fn walk(v: &isla::BinValue) {
    match v {
        isla::BinValue::List(items) => items.iter().for_each(walk),
        isla::BinValue::Map(map) => map.values().for_each(walk),
        isla::BinValue::Leaf(_) => {}
    }
}

fuzz_target!(|data: &[u8]| {
    // The binary decoder must never panic on arbitrary bytes, bounds-checked
    // or not.
    if let Ok(value) = isla::decode_binary(data) {
        walk(&value);
    }
});
