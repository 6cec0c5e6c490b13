//! Fuzz target for the `points` attribute parser.

#![no_main]

use libfuzzer_sys::fuzz_target;
use page2osd::osd::parse_points;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    if let Ok(raw) = std::str::from_utf8(data) {
        let _ = parse_points(raw);
    }
});
