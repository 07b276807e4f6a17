//! Fuzzer for the frame reader.
//!
//! Feeds arbitrary byte streams through `read_frame` under every live
//! protocol bound and checks the reader's safety invariants. EOF at the end
//! of the input surfaces as a disconnect error, so every run terminates.

#![no_main]

use std::time::Duration;

use drover_core::framing::{FrameReader, FrameWriter};
use drover_proto::TERMINATOR;
use libfuzzer_sys::fuzz_target;

// The read bounds the protocol actually uses (key id, access code digits,
// confirmation/power, username, secret).
const BOUNDS: &[usize] = &[3, 5, 10, 18, 98];

const TICK: Duration = Duration::from_secs(1);

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    let max_payload = BOUNDS[data[0] as usize % BOUNDS.len()];
    let stream = &data[1..];

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .expect("runtime");

    rt.block_on(async {
        // INVARIANT 1: arbitrary input never panics, and a successful read
        // never exceeds the bound or contains the terminator sequence.
        let mut reader = FrameReader::new(stream);
        if let Ok(payload) = reader.read_frame(max_payload, TICK).await {
            assert!(
                payload.len() <= max_payload,
                "payload {} over bound {}",
                payload.len(),
                max_payload
            );
            assert!(
                !payload.windows(2).any(|pair| pair == TERMINATOR),
                "decoded payload contains the terminator sequence"
            );
        }

        // INVARIANT 2: anything the writer can send, the reader gives back
        // verbatim.
        let representable =
            stream.len() <= 98 && !stream.windows(2).any(|pair| pair == TERMINATOR);
        if representable {
            let (tx, rx) = tokio::io::duplex(256);
            FrameWriter::new(tx)
                .write_frame(stream)
                .await
                .expect("write within duplex capacity");
            let echoed = FrameReader::new(rx)
                .read_frame(stream.len().max(1), TICK)
                .await
                .expect("reader must accept writer output");
            assert_eq!(echoed, stream, "round trip changed the payload");
        }
    });
});
