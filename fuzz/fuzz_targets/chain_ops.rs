#![no_main]

use libfuzzer_sys::fuzz_target;
use segbuf::{Access, Chain, Region, MAX_REGIONS};

// Drive chain operations from fuzz input and check every observable byte
// against a plain Vec<u8> model of the logical content.
fuzz_target!(|data: &[u8]| {
    let mut input = data.iter().copied();
    let mut chain = Chain::new();
    let mut model: Vec<u8> = Vec::new();

    // Bound the logical size so the model stays cheap.
    const MAX_BYTES: usize = 1 << 16;

    while let Some(op) = input.next() {
        match op % 7 {
            // append a small region with a fuzzed fill byte and size
            0 => {
                let fill = input.next().unwrap_or(0);
                let len = input.next().unwrap_or(1) as usize + 1;
                if model.len() + len > MAX_BYTES {
                    continue;
                }
                chain.append(Region::from(vec![fill; len])).unwrap();
                model.extend(std::iter::repeat(fill).take(len));
            }
            // fill at a fuzzed offset
            1 => {
                let offset = input.next().unwrap_or(0) as usize * 16;
                let byte = input.next().unwrap_or(0);
                let len = input.next().unwrap_or(0) as usize;
                let src = vec![byte; len];
                let written = chain.fill(offset, &src);
                let expected = len.min(model.len().saturating_sub(offset));
                assert_eq!(written, expected);
                if written > 0 {
                    model[offset..offset + written].fill(byte);
                }
            }
            // set_bytes at a fuzzed offset
            2 => {
                let offset = input.next().unwrap_or(0) as usize * 16;
                let byte = input.next().unwrap_or(0);
                let len = input.next().unwrap_or(0) as usize;
                let written = chain.set_bytes(offset, byte, len);
                let expected = len.min(model.len().saturating_sub(offset));
                assert_eq!(written, expected);
                if written > 0 {
                    model[offset..offset + written].fill(byte);
                }
            }
            // shrink to a fuzzed size
            3 => {
                let keep = input.next().unwrap_or(0) as usize * 64;
                if keep <= model.len() {
                    chain.shrink(keep).unwrap();
                    model.truncate(keep);
                } else {
                    assert!(chain.shrink(keep).is_err());
                }
            }
            // map a fuzzed byte range and check its content
            4 => {
                let offset = input.next().unwrap_or(0) as usize * 16;
                let len = input.next().unwrap_or(0) as usize;
                if offset < model.len() && len > 0 && offset + len <= model.len() {
                    let map = chain.map_bytes(offset..offset + len, Access::Read).unwrap();
                    let bytes = map.bytes().unwrap();
                    assert_eq!(&bytes[..], &model[offset..offset + len]);
                }
            }
            // remove a fuzzed region
            5 => {
                let index = input.next().unwrap_or(0) as usize % MAX_REGIONS;
                if let Some(region) = chain.peek(index) {
                    let start: usize = (0..index)
                        .map(|i| chain.peek(i).unwrap().len())
                        .sum();
                    chain.remove(index).unwrap();
                    model.drain(start..start + region.len());
                }
            }
            // extract everything
            _ => {
                let owned = chain.extract_owned(0, model.len());
                assert_eq!(&owned[..], &model[..]);
            }
        }

        // Core invariants after every operation.
        assert_eq!(chain.len(), model.len());
        assert!(chain.region_count() <= MAX_REGIONS);
        if !model.is_empty() {
            assert_eq!(chain.compare(0, &model), std::cmp::Ordering::Equal);
        }
    }
});
