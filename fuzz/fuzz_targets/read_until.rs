#![no_main]

use libfuzzer_sys::fuzz_target;
use spanio::{
    BufferedReadStream, DynamicBuffer, MemoryStream, OwnedBuffer, StreamError, read_until_outcome,
};

fuzz_target!(|input: (Vec<u8>, Vec<u8>, u8, u8)| {
    let (data, delimiter, capacity, max) = input;
    let capacity = capacity as usize + 1;
    let max = max as usize + delimiter.len();

    let mut stream = BufferedReadStream::with_capacity(capacity, MemoryStream::new(&data));
    let mut buf = OwnedBuffer::with_max_size(max);

    let outcome = read_until_outcome(&mut stream, &mut buf, delimiter.as_slice());

    // Verify: the buffer is never grown past its bound
    assert!(buf.size() <= max);

    // Verify: buffered bytes are a prefix of the input
    assert_eq!(buf.data().as_slice(), &data[..buf.size()]);

    match outcome.error {
        None => {
            // The value is one past the first byte of the first occurrence
            if delimiter.is_empty() {
                assert_eq!(outcome.value, 0);
            } else {
                let start = outcome.value - 1;
                let end = start + delimiter.len();
                assert!(buf.size() >= end);
                assert_eq!(&data[start..end], delimiter.as_slice());
                let first = data
                    .windows(delimiter.len())
                    .position(|w| w == delimiter.as_slice());
                assert_eq!(first, Some(start));
            }
        }
        Some(StreamError::Eof) => assert_eq!(buf.size(), data.len()),
        Some(StreamError::NotFound) => assert_eq!(buf.size(), max),
        Some(e) => panic!("unexpected error: {}", e),
    }
});
