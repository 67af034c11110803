#![no_main]

use libfuzzer_sys::fuzz_target;
use libpdo::{Model, ParserConfig};
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    // Prepend the magic so the fuzzer spends its time past the first check
    let mut input = libpdo::parser::MAGIC.to_vec();
    input.extend_from_slice(data);

    let config = ParserConfig::new()
        .with_max_element_count(4096)
        .with_max_texture_bytes(1 << 20)
        .with_validation(true);

    if let Ok(model) = Model::from_reader_with_config(Cursor::new(input), config) {
        // Everything reachable from a validated model must be safe to walk
        for i in 0..model.parts.len() {
            let _ = model.part_segments(i);
        }
        let layout = model.page_layout();
        let _ = layout.pages(&model.parts);
        let _ = layout.canvas_extent(&model.parts);
        for material in &model.materials {
            if let Some(texture) = &material.texture {
                let _ = texture.decode_with_limit(1 << 20);
            }
        }
    }
});
