#![no_main]
use arbitrary::Unstructured;
use isla::BinValue;
use libfuzzer_sys::fuzz_target;

/// Generate an arbitrary [`BinValue`] tree, bounding depth so deeply nested
/// fuzzer input can't blow the generator's own call stack.
fn arbitrary_value(u: &mut Unstructured<'_>, depth: usize) -> arbitrary::Result<BinValue> {
    if depth == 0 {
        return arbitrary_leaf(u);
    }
    let variant: u8 = u.int_in_range(0..=2)?;
    match variant {
        0 => arbitrary_leaf(u),
        1 => {
            let len: usize = u.int_in_range(0..=6)?;
            let items = (0..len)
                .map(|_| arbitrary_value(u, depth - 1))
                .collect::<arbitrary::Result<_>>()?;
            Ok(BinValue::List(items))
        }
        _ => {
            let len: usize = u.int_in_range(0..=6)?;
            let mut map = isla::ValueMap::new();
            for _ in 0..len {
                let key = arbitrary_bytes(u, 0..=8)?;
                let value = arbitrary_value(u, depth - 1)?;
                map.insert(key, value);
            }
            Ok(BinValue::Map(map))
        }
    }
}

fn arbitrary_leaf(u: &mut Unstructured<'_>) -> arbitrary::Result<BinValue> {
    Ok(BinValue::Leaf(arbitrary_bytes(u, 0..=16)?))
}

fn arbitrary_bytes(
    u: &mut Unstructured<'_>,
    range: std::ops::RangeInclusive<usize>,
) -> arbitrary::Result<Vec<u8>> {
    let len: usize = u.int_in_range(range)?;
    (0..len).map(|_| u.arbitrary()).collect()
}

fuzz_target!(|bytes: &[u8]| {
    let mut u = Unstructured::new(bytes);
    let value = match arbitrary_value(&mut u, 5) {
        Ok(v) => v,
        Err(_) => return,
    };

    let encoded = match isla::encode_binary(&value) {
        Ok(e) => e,
        Err(_) => return, // a generated count over the 28-bit cap is not a bug
    };

    let decoded = match isla::decode_binary(&encoded) {
        Ok(d) => d,
        Err(e) => panic!("decode of freshly encoded value failed: {:?}", e),
    };

    assert_eq!(value, decoded, "binary roundtrip mismatch");

    // Idempotence: encoding the decoded value again must reproduce the same
    // bytes (map iteration order is preserved by IndexMap, so this holds).
    let reencoded = isla::encode_binary(&decoded).unwrap();
    assert_eq!(encoded, reencoded, "binary encode is not idempotent");
});
