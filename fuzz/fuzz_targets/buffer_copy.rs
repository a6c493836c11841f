#![no_main]

use libfuzzer_sys::fuzz_target;
use spanio::{buffer_copy, buffer_copy_max, buffer_size};

fuzz_target!(|input: (Vec<u8>, Vec<u8>, usize)| {
    let (data, layout, max) = input;

    // Cut the source at every layout byte, the destination at every other one
    let mut sources = Vec::new();
    let mut dests = Vec::new();
    let mut rest = data.as_slice();
    for (i, &cut) in layout.iter().enumerate() {
        let at = (cut as usize).min(rest.len());
        let (head, tail) = rest.split_at(at);
        sources.push(head.to_vec());
        rest = tail;
        if i % 2 == 0 {
            dests.push(vec![0u8; cut as usize / 2]);
        }
    }
    sources.push(rest.to_vec());

    let total_dest = buffer_size(&dests);
    let n = buffer_copy(&mut dests, &sources);

    // Verify: exactly min(source, dest) bytes move, in order
    assert_eq!(n, data.len().min(total_dest));
    assert_eq!(&dests.concat()[..n], &data[..n]);

    // Verify: the cap is honoured
    let mut capped = vec![vec![0u8; total_dest]];
    let m = buffer_copy_max(&mut capped, &sources, max);
    assert_eq!(m, n.min(max));
});
