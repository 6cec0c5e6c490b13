//! Fuzz target for PAGE XML page assembly.
//!
//! This fuzzer feeds arbitrary byte sequences to the page assembler,
//! checking for panics, crashes, or hangs.

#![no_main]

use libfuzzer_sys::fuzz_target;
use page2osd::page_xml::from_page_xml_slice;

fuzz_target!(|data: &[u8]| {
    // Cap input size to avoid excessive memory usage.
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = from_page_xml_slice(data);
});
