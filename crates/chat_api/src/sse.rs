use std::collections::VecDeque;

use futures_util::stream::{self, Stream, StreamExt};
use serde_json::Value;
use tracing::{debug, warn};

use crate::events::ChatStreamEvent;

/// Separator between frames.
pub const FRAME_DELIMITER: &[u8] = b"\n\n";
/// Prefix every meaningful frame starts with.
pub const DATA_PREFIX: &str = "data: ";

/// Incremental parser for the chat SSE feed.
///
/// Bytes are buffered raw and only decoded as UTF-8 once a whole frame has
/// arrived, so a multi-byte character split across reads is reassembled intact.
#[derive(Debug, Default)]
pub struct SseFrameDecoder {
    buffer: Vec<u8>,
    // Prefix of `buffer` already known to hold no delimiter.
    scanned: usize,
}

impl SseFrameDecoder {
    /// Feed arbitrary bytes into the decoder and drain complete events.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<ChatStreamEvent> {
        self.buffer.extend_from_slice(bytes);
        let mut events = Vec::new();
        let mut consumed = 0;
        let mut search_from = self.scanned;

        while let Some(split) = find_delimiter(&self.buffer[search_from..]) {
            let end = search_from + split;
            if let Some(event) = decode_frame(&self.buffer[consumed..end]) {
                events.push(event);
            }
            consumed = end + FRAME_DELIMITER.len();
            search_from = consumed;
        }

        self.buffer.drain(..consumed);
        self.scanned = self
            .buffer
            .len()
            .saturating_sub(FRAME_DELIMITER.len() - 1);
        events
    }

    /// Parse a complete SSE payload string in one shot.
    pub fn parse_frames(input: &str) -> Vec<ChatStreamEvent> {
        let mut decoder = Self::default();
        decoder.feed(input.as_bytes())
    }

    /// Bytes held back waiting for a frame delimiter.
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }

    pub fn is_empty_buffer(&self) -> bool {
        self.buffer.iter().all(u8::is_ascii_whitespace)
    }
}

fn find_delimiter(haystack: &[u8]) -> Option<usize> {
    haystack
        .windows(FRAME_DELIMITER.len())
        .position(|window| window == FRAME_DELIMITER)
}

fn decode_frame(frame: &[u8]) -> Option<ChatStreamEvent> {
    let text = match std::str::from_utf8(frame) {
        Ok(text) => text,
        Err(error) => {
            warn!(%error, "skipping SSE frame that is not valid UTF-8");
            return None;
        }
    };

    let Some(payload) = text.strip_prefix(DATA_PREFIX) else {
        if !text.trim().is_empty() {
            debug!(frame = text, "ignoring SSE frame without data prefix");
        }
        return None;
    };

    match serde_json::from_str::<Value>(payload) {
        Ok(value) => ChatStreamEvent::from_payload(&value),
        Err(error) => {
            warn!(%error, frame = text, "failed to parse SSE frame");
            None
        }
    }
}

/// Adapts a stream of byte chunks into a lazy stream of decoded events.
///
/// The adapter is finite: it ends when `chunks` ends, and it yields a chunk
/// error once and then stops. Incomplete trailing bytes are dropped.
pub fn decode_stream<S, B, E>(chunks: S) -> impl Stream<Item = Result<ChatStreamEvent, E>>
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
{
    let state = DecodeState {
        chunks,
        decoder: SseFrameDecoder::default(),
        ready: VecDeque::new(),
        finished: false,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            if let Some(event) = state.ready.pop_front() {
                return Some((Ok(event), state));
            }
            if state.finished {
                return None;
            }

            match state.chunks.next().await {
                Some(Ok(bytes)) => {
                    let events = state.decoder.feed(bytes.as_ref());
                    state.ready.extend(events);
                }
                Some(Err(error)) => {
                    state.finished = true;
                    return Some((Err(error), state));
                }
                None => {
                    if !state.decoder.is_empty_buffer() {
                        debug!(
                            pending = state.decoder.pending().len(),
                            "chat stream ended with an incomplete frame"
                        );
                    }
                    return None;
                }
            }
        }
    })
}

struct DecodeState<S> {
    chunks: S,
    decoder: SseFrameDecoder,
    ready: VecDeque<ChatStreamEvent>,
    finished: bool,
}
