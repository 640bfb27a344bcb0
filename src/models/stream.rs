use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::error::{GoogleGenAIError, Result};

use super::GenerateContentResponse;

/// A stream of generated response chunks.
///
/// The stream is lazy and finite. It ends once the producer is exhausted and
/// cannot be restarted; dropping it cancels the underlying request.
pub struct ResponseStream {
    inner: Pin<Box<dyn Stream<Item = Result<GenerateContentResponse>> + Send>>,
}

impl ResponseStream {
    /// Wraps any stream of response chunks.
    pub fn new<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<GenerateContentResponse>> + Send + 'static,
    {
        Self {
            inner: Box::pin(stream),
        }
    }

    /// Creates a stream fed by a channel.
    pub fn from_receiver(receiver: mpsc::Receiver<Result<GenerateContentResponse>>) -> Self {
        Self::new(ReceiverStream::new(receiver))
    }
}

impl Stream for ResponseStream {
    type Item = Result<GenerateContentResponse>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

impl fmt::Debug for ResponseStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseStream").finish_non_exhaustive()
    }
}

/// Splits a streamed JSON array into its top-level objects.
///
/// Bytes may arrive in arbitrary chunks; objects, string literals and
/// multi-byte characters may all straddle chunk boundaries.
#[derive(Debug, Default)]
pub struct JsonStreamDecoder {
    pending: Vec<u8>,
    buffer: String,
    depth: usize,
    in_string: bool,
    escaped: bool,
}

impl JsonStreamDecoder {
    /// Creates an empty decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds a chunk and returns the source text of every object it completed,
    /// in order.
    ///
    /// An invalid UTF-8 byte ends the returned items with an error. Objects
    /// completed before that byte are still returned; the partial object and
    /// the rest of the chunk are dropped and decoding restarts clean.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<Result<String>> {
        self.pending.extend_from_slice(chunk);

        let (valid, invalid) = match std::str::from_utf8(&self.pending) {
            Ok(text) => (text.len(), None),
            // an incomplete sequence at the end waits for the next chunk
            Err(e) => (e.valid_up_to(), e.error_len().map(|_| e)),
        };

        let rest = self.pending.split_off(valid);
        let ready = std::mem::replace(&mut self.pending, rest);
        let mut items: Vec<Result<String>> = self
            .scan(&String::from_utf8_lossy(&ready))
            .into_iter()
            .map(Ok)
            .collect();

        if let Some(e) = invalid {
            *self = Self::default();
            items.push(Err(GoogleGenAIError::new(format!(
                "UTF-8 decode error: {e}"
            ))));
        }

        items
    }

    fn scan(&mut self, text: &str) -> Vec<String> {
        let mut objects = Vec::new();
        for c in text.chars() {
            if self.depth == 0 {
                // array brackets, separators and whitespace between objects
                if c == '{' {
                    self.depth = 1;
                    self.buffer.clear();
                    self.buffer.push(c);
                }
                continue;
            }

            self.buffer.push(c);

            if self.in_string {
                if self.escaped {
                    self.escaped = false;
                } else if c == '\\' {
                    self.escaped = true;
                } else if c == '"' {
                    self.in_string = false;
                }
                continue;
            }

            match c {
                '"' => self.in_string = true,
                '{' => self.depth += 1,
                '}' => {
                    self.depth -= 1;
                    if self.depth == 0 {
                        objects.push(std::mem::take(&mut self.buffer));
                    }
                }
                _ => {}
            }
        }
        objects
    }

    /// Whether no partial object or character is buffered.
    pub fn is_idle(&self) -> bool {
        self.depth == 0 && self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    fn ok(items: Vec<Result<String>>) -> Vec<String> {
        items.into_iter().map(|item| item.unwrap()).collect()
    }

    #[test]
    fn splits_array_into_objects() {
        let mut decoder = JsonStreamDecoder::new();
        let objects = ok(decoder.push(br#"[{"a":1},{"b":{"c":2}}]"#));
        assert_eq!(objects, vec![r#"{"a":1}"#, r#"{"b":{"c":2}}"#]);
        assert!(decoder.is_idle());
    }

    #[test]
    fn objects_may_straddle_chunks() {
        let mut decoder = JsonStreamDecoder::new();
        assert!(decoder.push(b"[{\"text\":\"hel").is_empty());
        assert!(!decoder.is_idle());
        let objects = ok(decoder.push(b"lo\"}\n,\r\n{\"x\":0}]"));
        assert_eq!(objects, vec![r#"{"text":"hello"}"#, r#"{"x":0}"#]);
    }

    #[test]
    fn braces_and_escaped_quotes_inside_strings_are_ignored() {
        let mut decoder = JsonStreamDecoder::new();
        let input = r#"[{"text":"a } \" { \\"}]"#;
        let objects = ok(decoder.push(input.as_bytes()));
        assert_eq!(objects, vec![r#"{"text":"a } \" { \\"}"#]);
        let value: serde_json::Value = serde_json::from_str(&objects[0]).unwrap();
        assert_eq!(value["text"], "a } \" { \\");
    }

    #[test]
    fn multibyte_characters_may_straddle_chunks() {
        let bytes = r#"[{"text":"héllo"}]"#.as_bytes();
        let split = bytes.iter().position(|&b| b == 0xC3).unwrap() + 1;

        let mut decoder = JsonStreamDecoder::new();
        assert!(decoder.push(&bytes[..split]).is_empty());
        let objects = ok(decoder.push(&bytes[split..]));
        assert_eq!(objects, vec![r#"{"text":"héllo"}"#]);
    }

    #[test]
    fn invalid_utf8_is_an_error() {
        let mut decoder = JsonStreamDecoder::new();
        let items = decoder.push(&[b'[', 0xFF, b'{']);
        assert_eq!(items.len(), 1);
        assert!(items[0].is_err());
    }

    #[test]
    fn objects_before_invalid_utf8_are_kept() {
        let mut decoder = JsonStreamDecoder::new();
        let items = decoder.push(b"[{\"a\":1},{\"b\":\"x\xFF");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].as_ref().unwrap(), r#"{"a":1}"#);
        assert!(items[1].is_err());
        // the partial object is dropped and scanning starts over
        assert!(decoder.is_idle());

        let objects = ok(decoder.push(b"{\"c\":2}]"));
        assert_eq!(objects, vec![r#"{"c":2}"#]);
    }

    #[tokio::test]
    async fn receiver_stream_yields_in_order_then_ends() {
        let (tx, rx) = mpsc::channel(4);
        for id in ["a", "b"] {
            let response = GenerateContentResponse {
                response_id: Some(id.to_string()),
                ..Default::default()
            };
            tx.send(Ok(response)).await.unwrap();
        }
        drop(tx);

        let ids: Vec<_> = ResponseStream::from_receiver(rx)
            .map(|item| item.unwrap().response_id.unwrap())
            .collect()
            .await;
        assert_eq!(ids, vec!["a", "b"]);
    }
}
