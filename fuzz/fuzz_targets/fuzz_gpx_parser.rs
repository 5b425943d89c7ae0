#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Der Parser darf auf beliebigen Eingaben nicht paniken
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = gpx_normalizer::parse_gpx(text);
    }
});
