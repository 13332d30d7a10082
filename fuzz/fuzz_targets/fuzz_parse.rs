#![no_main]
use libfuzzer_sys::fuzz_target;

// Fuzz the text decoder directly on arbitrary strings. It must never panic,
// and anything it accepts must survive an encode -> decode round trip.
fuzz_target!(|data: &str| {
    let value = match isla::decode_text_str(data) {
        Ok(v) => v,
        Err(_) => return,
    };

    // A bare leaf/none never comes out of decode_text (the grammar always
    // opens a top-level list or map scope), so encode_text should always
    // accept what decode_text produced.
    let text = match isla::encode_text(&value) {
        Ok(t) => t,
        Err(e) => panic!("decoded value failed to re-encode: {:?}", e),
    };

    let reparsed = match isla::decode_text_str(&text) {
        Ok(v) => v,
        Err(e) => panic!("re-parse of encode_text output failed: {:?}", e),
    };

    assert_eq!(
        value, reparsed,
        "text parse roundtrip mismatch for input {:?}",
        data
    );
});
