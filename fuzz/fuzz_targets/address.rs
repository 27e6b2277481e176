#![no_main]

use l2_154_frame::ShortAddress;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|text: &str| {
    if let Ok(address) = ShortAddress::parse(text) {
        let [lo, hi] = address.to_bytes();
        let canonical = format!("{lo:02x}:{hi:02x}");
        assert_eq!(ShortAddress::parse(&canonical), Ok(address));
        let _ = address.to_string();
    }
});
