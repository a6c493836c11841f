//! Property tests for buffer arithmetic, copying, dynamic buffer bounds,
//! round trips and delimiter search.

use proptest::prelude::*;

use spanio::{
    DynamicBuffer, MemoryStream, MutableBufferSequence, Outcome, OwnedBuffer, ReadStream,
    SeekMode, Seekable, StreamError, VecStream, buffer, buffer_copy, buffer_copy_max, buffer_mut,
    buffer_size, read, read_until_outcome, write,
};

// ============================================================================
// Helpers
// ============================================================================

/// Splits `data` into consecutive spans at the given cut points.
fn partition(data: &[u8], cuts: &[usize]) -> Vec<Vec<u8>> {
    let mut points: Vec<usize> = cuts.iter().map(|c| c % (data.len() + 1)).collect();
    points.sort_unstable();
    points.push(data.len());

    let mut start = 0;
    points
        .into_iter()
        .map(|end| {
            let span = data[start..end].to_vec();
            start = end;
            span
        })
        .collect()
}

/// Serves its content `step` bytes per short read.
struct Stepped {
    content: Vec<u8>,
    pos: usize,
    step: usize,
}

impl ReadStream for Stepped {
    fn read_some_outcome<B>(&mut self, buffers: &mut B) -> Outcome<usize>
    where
        B: MutableBufferSequence + ?Sized,
    {
        if self.pos == self.content.len() {
            return Outcome::err(StreamError::Eof);
        }
        let end = (self.pos + self.step).min(self.content.len());
        let n = buffer_copy(buffers, &buffer(&self.content[self.pos..end]));
        self.pos += n;
        Outcome::ok(n)
    }
}

fn arb_bytes(max: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..max)
}

/// Bytes over a small alphabet so delimiters actually occur.
fn arb_text(max: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop::sample::select(b"abc\n".to_vec()), 0..max)
}

// ============================================================================
// Span Arithmetic
// ============================================================================

proptest! {
    #[test]
    fn prop_advance_clamps(data in arb_bytes(64), n in 0usize..128) {
        let span = buffer(&data) + n;
        prop_assert_eq!(span.len(), data.len().saturating_sub(n));
        prop_assert_eq!(span.as_slice(), &data[n.min(data.len())..]);
    }

    #[test]
    fn prop_prefix_clamps(data in arb_bytes(64), n in 0usize..128) {
        let span = buffer(&data).prefix(n);
        prop_assert_eq!(span.as_slice(), &data[..n.min(data.len())]);
    }

    #[test]
    fn prop_advance_composes(data in arb_bytes(64), a in 0usize..64, b in 0usize..64) {
        let stepwise = (buffer(&data) + a) + b;
        let combined = buffer(&data) + (a + b);
        prop_assert_eq!(stepwise.as_slice(), combined.as_slice());
    }
}

// ============================================================================
// Copying
// ============================================================================

proptest! {
    #[test]
    fn prop_copy_moves_min_size(
        source in arb_bytes(256),
        dest_len in 0usize..256,
        source_cuts in prop::collection::vec(any::<usize>(), 0..6),
        dest_cuts in prop::collection::vec(any::<usize>(), 0..6),
    ) {
        let sources = partition(&source, &source_cuts);
        let mut dests = partition(&vec![0u8; dest_len], &dest_cuts);

        let n = buffer_copy(&mut dests, &sources);

        prop_assert_eq!(n, source.len().min(dest_len));
        prop_assert_eq!(buffer_size(&dests), dest_len);
        let flat: Vec<u8> = dests.concat();
        prop_assert_eq!(&flat[..n], &source[..n]);
    }

    #[test]
    fn prop_copy_max_bounds(
        source in arb_bytes(128),
        dest_len in 0usize..128,
        max in 0usize..160,
    ) {
        let mut dest = vec![0u8; dest_len];
        let n = buffer_copy_max(&mut buffer_mut(&mut dest), &buffer(&source), max);
        prop_assert_eq!(n, source.len().min(dest_len).min(max));
    }
}

// ============================================================================
// Dynamic Buffers
// ============================================================================

proptest! {
    #[test]
    fn prop_prepare_respects_max_size(
        max in 1usize..64,
        ops in prop::collection::vec((0usize..48, 0usize..48, 0usize..48), 1..20),
    ) {
        let mut buf = OwnedBuffer::with_max_size(max);

        for (prepare, commit, consume) in ops {
            let before = buf.size();
            match buf.prepare(prepare) {
                Ok(span) => {
                    prop_assert_eq!(span.len(), prepare);
                    prop_assert!(before + prepare <= max);
                }
                Err(e) => {
                    prop_assert!(matches!(e, StreamError::LengthExceeded { .. }), "{}", e);
                    prop_assert!(before + prepare > max);
                    prop_assert_eq!(buf.size(), before, "Failed prepare must not change size");
                    continue;
                }
            }
            buf.commit(commit);
            prop_assert_eq!(buf.size(), before + commit.min(prepare));
            buf.consume(consume);
            prop_assert!(buf.size() <= max);
        }
    }
}

// ============================================================================
// Round Trip
// ============================================================================

proptest! {
    #[test]
    fn prop_write_then_read_back(
        payload in arb_bytes(4096),
        cuts in prop::collection::vec(any::<usize>(), 0..8),
    ) {
        let spans = partition(&payload, &cuts);
        let mut stream = VecStream::new();

        prop_assert_eq!(write(&mut stream, &spans).unwrap(), payload.len());
        stream.seek(0, SeekMode::Start).unwrap();

        let mut back = vec![0u8; payload.len()];
        prop_assert_eq!(read(&mut stream, &mut buffer_mut(&mut back)).unwrap(), payload.len());
        prop_assert_eq!(back, payload);
    }
}

// ============================================================================
// Delimiter Search
// ============================================================================

proptest! {
    #[test]
    fn prop_read_until_matches_naive_search(
        content in arb_text(300),
        delimiter in prop::collection::vec(prop::sample::select(b"abc\n".to_vec()), 1..4),
        step in 1usize..16,
    ) {
        let expected = content
            .windows(delimiter.len())
            .position(|w| w == delimiter.as_slice());

        let mut stream = Stepped { content: content.clone(), pos: 0, step };
        let mut buf = OwnedBuffer::new();
        let outcome = read_until_outcome(&mut stream, &mut buf, delimiter.as_slice());

        match expected {
            Some(start) => {
                let end = start + delimiter.len();
                prop_assert!(outcome.is_ok());
                prop_assert_eq!(outcome.value, start + 1);
                prop_assert_eq!(&buf.data().as_slice()[..end], &content[..end]);
            }
            None => {
                prop_assert!(outcome.is_eof());
                prop_assert_eq!(buf.data().as_slice(), content.as_slice());
            }
        }
    }

    #[test]
    fn prop_read_until_independent_of_chunking(
        content in arb_text(200),
        step in 1usize..32,
    ) {
        let mut whole = MemoryStream::new(&content);
        let mut stepped = Stepped { content: content.clone(), pos: 0, step };
        let mut a = OwnedBuffer::new();
        let mut b = OwnedBuffer::new();

        let first = read_until_outcome(&mut whole, &mut a, b'\n');
        let second = read_until_outcome(&mut stepped, &mut b, b'\n');

        prop_assert_eq!(first.value, second.value);
        prop_assert_eq!(first.is_ok(), second.is_ok());
    }
}
