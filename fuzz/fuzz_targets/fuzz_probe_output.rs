//! Fuzz target for parsing probe output.
//!
//! Build scripts parse whatever the probe wrote to stdout; the parser must
//! return an error for malformed input, never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use nbprobe_common::PlatformConstants;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(constants) = text.parse::<PlatformConstants>() {
            // Anything accepted must print back to the canonical line
            let line = constants.to_string();
            assert_eq!(line.parse::<PlatformConstants>(), Ok(constants));
        }
    }
});
