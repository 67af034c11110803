#![no_main]

use libfuzzer_sys::fuzz_target;
use libpdo::reader::{decode_multi_byte, decode_single_byte};

fuzz_target!(|data: &[u8]| {
    let Some((&shift, rest)) = data.split_first() else {
        return;
    };
    let _ = decode_single_byte(rest, shift);

    let units: Vec<u16> = rest
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    let _ = decode_multi_byte(&units, shift);
});
