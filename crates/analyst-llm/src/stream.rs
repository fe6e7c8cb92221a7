//! Incremental decoding of streaming chat responses
//!
//! The streaming path delivers newline-delimited `data: <json-or-[DONE]>`
//! lines. Decoding is best-effort on purpose: a malformed fragment is skipped
//! rather than aborting the whole stream, so partial output keeps flowing to
//! the user.

use crate::error::Result;
use serde::Deserialize;
use tracing::debug;

/// One parsed fragment of a streaming completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatDelta {
    /// Incremental content (may be a single token)
    pub content: String,
}

/// Wire shape of one streamed chunk
#[derive(Debug, Deserialize)]
struct StreamChunk {
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    delta: StreamDelta,
}

#[derive(Debug, Deserialize)]
struct StreamDelta {
    content: Option<String>,
}

/// What a single protocol line decoded to
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LineEvent {
    /// Not a data line, a heartbeat, or a fragment we could not parse
    Ignored,
    /// The `[DONE]` sentinel
    Done,
    /// A well-formed content fragment
    Delta(ChatDelta),
}

/// Decode one protocol line
///
/// Lines that do not carry the `data: ` prefix are filtered out. Malformed
/// JSON is skipped with a debug log, never an error.
pub(crate) fn decode_line(line: &str) -> LineEvent {
    let line = line.trim_end_matches('\r');

    let Some(data) = line.strip_prefix("data: ") else {
        return LineEvent::Ignored;
    };

    if data == "[DONE]" {
        return LineEvent::Done;
    }

    match serde_json::from_str::<StreamChunk>(data) {
        Ok(chunk) => {
            let content = chunk
                .choices
                .into_iter()
                .next()
                .and_then(|c| c.delta.content);
            match content {
                Some(content) => LineEvent::Delta(ChatDelta { content }),
                // Role-only or finish-reason-only chunks carry no text
                None => LineEvent::Ignored,
            }
        }
        Err(e) => {
            debug!("skipping malformed stream fragment: {e}");
            LineEvent::Ignored
        }
    }
}

/// Incremental byte-to-delta decoder
///
/// Feed raw body chunks in arrival order; complete lines are decoded as they
/// become available. Once the `[DONE]` sentinel is seen the decoder stops
/// producing deltas.
#[derive(Debug, Default)]
pub struct StreamDecoder {
    buf: String,
    done: bool,
}

impl StreamDecoder {
    /// Create a new decoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the end-of-stream sentinel has been seen
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Feed a chunk of bytes and collect any fragments it completed
    pub fn push(&mut self, bytes: &[u8]) -> Vec<ChatDelta> {
        let mut deltas = Vec::new();
        if self.done {
            return deltas;
        }

        self.buf.push_str(&String::from_utf8_lossy(bytes));

        while let Some(pos) = self.buf.find('\n') {
            let line: String = self.buf.drain(..=pos).collect();
            match decode_line(line.trim_end_matches('\n')) {
                LineEvent::Ignored => {}
                LineEvent::Done => {
                    self.done = true;
                    return deltas;
                }
                LineEvent::Delta(delta) => deltas.push(delta),
            }
        }

        deltas
    }
}

/// A lazy, finite sequence of streaming fragments
///
/// Produced by [`DeepSeekClient::chat_stream`](crate::DeepSeekClient::chat_stream).
/// The sequence terminates when the endpoint sends its `[DONE]` sentinel or
/// closes the connection; it is not restartable.
pub struct ChatStream {
    response: reqwest::Response,
    decoder: StreamDecoder,
    pending: std::collections::VecDeque<ChatDelta>,
}

impl ChatStream {
    pub(crate) fn new(response: reqwest::Response) -> Self {
        Self {
            response,
            decoder: StreamDecoder::new(),
            pending: std::collections::VecDeque::new(),
        }
    }

    /// Get the next fragment, or `None` once the stream has terminated
    pub async fn next(&mut self) -> Result<Option<ChatDelta>> {
        loop {
            if let Some(delta) = self.pending.pop_front() {
                return Ok(Some(delta));
            }
            if self.decoder.is_done() {
                return Ok(None);
            }
            match self.response.chunk().await? {
                Some(bytes) => {
                    self.pending.extend(self.decoder.push(&bytes));
                }
                None => return Ok(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_content_line() {
        let event = decode_line(r#"data: {"choices":[{"delta":{"content":"ok"}}]}"#);
        assert_eq!(
            event,
            LineEvent::Delta(ChatDelta {
                content: "ok".to_string()
            })
        );
    }

    #[test]
    fn test_decode_done_sentinel() {
        assert_eq!(decode_line("data: [DONE]"), LineEvent::Done);
    }

    #[test]
    fn test_non_data_lines_filtered() {
        assert_eq!(decode_line(""), LineEvent::Ignored);
        assert_eq!(decode_line(": keep-alive"), LineEvent::Ignored);
        assert_eq!(decode_line("event: message"), LineEvent::Ignored);
    }

    #[test]
    fn test_malformed_fragment_does_not_terminate_stream() {
        let mut decoder = StreamDecoder::new();

        // A bad fragment followed by a good one and the sentinel: exactly one
        // delta comes out and the stream terminates cleanly.
        let deltas = decoder.push(b"data: {bad json\n");
        assert!(deltas.is_empty());
        assert!(!decoder.is_done());

        let deltas = decoder.push(b"data: {\"choices\":[{\"delta\":{\"content\":\"ok\"}}]}\n");
        assert_eq!(deltas.len(), 1);
        assert_eq!(deltas[0].content, "ok");

        let deltas = decoder.push(b"data: [DONE]\n");
        assert!(deltas.is_empty());
        assert!(decoder.is_done());
    }

    #[test]
    fn test_partial_lines_across_chunks() {
        let mut decoder = StreamDecoder::new();

        let deltas = decoder.push(b"data: {\"choices\":[{\"delta\":{\"con");
        assert!(deltas.is_empty());

        let deltas = decoder.push(b"tent\":\"hello\"}}]}\n");
        assert_eq!(deltas.len(), 1);
        assert_eq!(deltas[0].content, "hello");
    }

    #[test]
    fn test_role_only_chunk_is_skipped() {
        let event = decode_line(r#"data: {"choices":[{"delta":{"role":"assistant"}}]}"#);
        assert_eq!(event, LineEvent::Ignored);
    }

    #[test]
    fn test_no_deltas_after_done() {
        let mut decoder = StreamDecoder::new();
        decoder.push(b"data: [DONE]\n");
        let deltas = decoder.push(b"data: {\"choices\":[{\"delta\":{\"content\":\"late\"}}]}\n");
        assert!(deltas.is_empty());
    }

    #[test]
    fn test_crlf_line_endings() {
        let mut decoder = StreamDecoder::new();
        let deltas = decoder.push(b"data: {\"choices\":[{\"delta\":{\"content\":\"ok\"}}]}\r\n");
        assert_eq!(deltas.len(), 1);
    }
}
