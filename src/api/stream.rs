//! Line-oriented reader for `data: ` event streams.
//!
//! Completion and chat endpoints stream with a restricted server-sent-events
//! framing: every event is a single line `data: <json>\n` and the stream ends
//! with `data: [DONE]\n`. Any other line (blank keep-alives, `event:`, `id:`,
//! comments) is ignored.
//!
//! A stream that closes before `[DONE]` is an error, not a silent success.
//! Frames are decoded one at a time and the next line is not read until the
//! caller is done with the current event, so memory stays bounded to one line
//! and a slow consumer stalls the read loop.

use crate::error::ClientError;
use bytes::Bytes;
use futures::{Stream, TryStreamExt};
use serde::de::DeserializeOwned;
use std::io;
use std::marker::PhantomData;
use std::pin::Pin;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::io::StreamReader;

/// Prefix marking a data frame.
pub const DATA_PREFIX: &[u8] = b"data: ";
/// Payload that terminates the stream.
pub const DONE_SENTINEL: &[u8] = b"[DONE]";

/// Buffered reader over an HTTP response body.
pub type BodyReader = StreamReader<Pin<Box<dyn Stream<Item = io::Result<Bytes>> + Send>>, Bytes>;

/// Event stream reading directly from an HTTP response body.
pub type ResponseEventStream<T> = EventStream<BodyReader, T>;

/// Adapt a response body into an `AsyncBufRead`.
pub(crate) fn body_reader(response: reqwest::Response) -> BodyReader {
    let body: Pin<Box<dyn Stream<Item = io::Result<Bytes>> + Send>> =
        Box::pin(response.bytes_stream().map_err(io::Error::other));
    StreamReader::new(body)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Reading,
    Done,
    Failed,
}

/// Lazy, finite, non-restartable sequence of decoded stream events.
///
/// Once the sentinel is seen or an error is returned, every later call to
/// [`EventStream::next_event`] yields `Ok(None)`.
#[derive(Debug)]
pub struct EventStream<R, T> {
    reader: R,
    line: Vec<u8>,
    state: State,
    _event: PhantomData<fn() -> T>,
}

impl<R, T> EventStream<R, T>
where
    R: AsyncBufRead + Unpin,
    T: DeserializeOwned,
{
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: Vec::new(),
            state: State::Reading,
            _event: PhantomData,
        }
    }

    /// True once the `[DONE]` sentinel has been read.
    pub fn is_done(&self) -> bool {
        self.state == State::Done
    }

    /// Read frames until the next decoded event, the sentinel, or an error.
    ///
    /// Returns `Ok(None)` when the stream completed with `[DONE]`.
    pub async fn next_event(&mut self) -> Result<Option<T>, ClientError> {
        if self.state != State::Reading {
            return Ok(None);
        }
        loop {
            self.line.clear();
            let read = match self.reader.read_until(b'\n', &mut self.line).await {
                Ok(read) => read,
                Err(err) => {
                    self.state = State::Failed;
                    return Err(ClientError::StreamRead(err));
                }
            };
            // A conforming server always sends the sentinel before closing.
            if read == 0 || self.line.last() != Some(&b'\n') {
                self.state = State::Failed;
                return Err(ClientError::StreamRead(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "event stream closed before [DONE]",
                )));
            }

            let frame = self.line.trim_ascii();
            let Some(payload) = frame.strip_prefix(DATA_PREFIX) else {
                tracing::trace!(len = frame.len(), "skipping non-data frame");
                continue;
            };
            if payload == DONE_SENTINEL {
                tracing::debug!("event stream completed");
                self.state = State::Done;
                return Ok(None);
            }

            return match serde_json::from_slice::<T>(payload) {
                Ok(event) => {
                    tracing::trace!(len = payload.len(), "decoded stream event");
                    Ok(Some(event))
                }
                Err(source) => {
                    self.state = State::Failed;
                    Err(ClientError::StreamDecode {
                        payload: String::from_utf8_lossy(payload).into_owned(),
                        source,
                    })
                }
            };
        }
    }

    /// Drive the stream to completion, handing each event to `on_event`.
    ///
    /// `on_event` runs inline: event *n* is fully handled before line *n+1*
    /// is read.
    pub async fn for_each<F>(mut self, mut on_event: F) -> Result<(), ClientError>
    where
        F: FnMut(T),
    {
        while let Some(event) = self.next_event().await? {
            on_event(event);
        }
        Ok(())
    }
}

/// Read a whole event stream from `reader`, calling `on_event` once per event.
pub async fn read_event_stream<R, T, F>(reader: R, on_event: F) -> Result<(), ClientError>
where
    R: AsyncBufRead + Unpin,
    T: DeserializeOwned,
    F: FnMut(T),
{
    EventStream::new(reader).for_each(on_event).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CompletionResponse;
    use serde::Deserialize;
    use tokio::io::{AsyncWriteExt, BufReader};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Tick {
        n: u32,
    }

    async fn collect(body: &str) -> (Vec<Tick>, Result<(), ClientError>) {
        let mut seen = Vec::new();
        let result = read_event_stream(body.as_bytes(), |tick: Tick| seen.push(tick)).await;
        (seen, result)
    }

    #[tokio::test]
    async fn delivers_each_frame_in_order() {
        let (seen, result) =
            collect("data: {\"n\":1}\ndata: {\"n\":2}\ndata: {\"n\":3}\ndata: [DONE]\n").await;
        result.expect("stream should complete");
        assert_eq!(seen, vec![Tick { n: 1 }, Tick { n: 2 }, Tick { n: 3 }]);
    }

    #[tokio::test]
    async fn ignores_control_lines_and_keep_alives() {
        let body = concat!(
            ": keep-alive\n",
            "\n",
            "event: completion\n",
            "id: 7\n",
            "data: {\"n\":1}\r\n",
            "\r\n",
            "retry: 1000\n",
            "   data: {\"n\":2}   \n",
            "data: [DONE]\n",
        );
        let (seen, result) = collect(body).await;
        result.expect("stream should complete");
        assert_eq!(seen, vec![Tick { n: 1 }, Tick { n: 2 }]);
    }

    #[tokio::test]
    async fn terminator_alone_completes_without_events() {
        let (seen, result) = collect("\n\n: ping\ndata: [DONE]\n").await;
        result.expect("stream should complete");
        assert!(seen.is_empty());
    }

    #[tokio::test]
    async fn lines_after_terminator_are_not_read() {
        let (seen, result) = collect("data: {\"n\":1}\ndata: [DONE]\ndata: {not json\n").await;
        result.expect("stream should complete");
        assert_eq!(seen, vec![Tick { n: 1 }]);
    }

    #[tokio::test]
    async fn close_without_terminator_is_an_error() {
        let (seen, result) = collect("data: {\"n\":1}\n").await;
        assert_eq!(seen, vec![Tick { n: 1 }]);
        match result {
            Err(ClientError::StreamRead(err)) => {
                assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof)
            }
            other => panic!("expected unexpected-eof, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_body_is_an_error() {
        let (_, result) = collect("").await;
        assert!(matches!(result, Err(ClientError::StreamRead(_))));
    }

    #[tokio::test]
    async fn unterminated_final_line_is_an_error() {
        let (_, result) = collect("data: [DONE]").await;
        assert!(matches!(result, Err(ClientError::StreamRead(_))));
    }

    #[tokio::test]
    async fn malformed_frame_stops_before_handler() {
        let (seen, result) =
            collect("data: {\"n\":1}\ndata: {\"n\":\ndata: {\"n\":3}\ndata: [DONE]\n").await;
        assert_eq!(seen, vec![Tick { n: 1 }]);
        match result {
            Err(ClientError::StreamDecode { payload, .. }) => assert_eq!(payload, "{\"n\":"),
            other => panic!("expected stream decode error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn shape_mismatch_is_a_decode_error() {
        let (seen, result) = collect("data: {\"n\":\"one\"}\ndata: [DONE]\n").await;
        assert!(seen.is_empty());
        assert!(matches!(result, Err(ClientError::StreamDecode { .. })));
    }

    #[tokio::test]
    async fn next_event_is_not_restartable() {
        let mut stream: EventStream<_, Tick> =
            EventStream::new("data: {\"n\":1}\ndata: [DONE]\n".as_bytes());
        assert_eq!(stream.next_event().await.unwrap(), Some(Tick { n: 1 }));
        assert!(!stream.is_done());
        assert_eq!(stream.next_event().await.unwrap(), None);
        assert!(stream.is_done());
        assert_eq!(stream.next_event().await.unwrap(), None);

        let mut failed: EventStream<_, Tick> =
            EventStream::new("data: nope\ndata: {\"n\":1}\n".as_bytes());
        assert!(failed.next_event().await.is_err());
        assert_eq!(failed.next_event().await.unwrap(), None);
        assert!(!failed.is_done());
    }

    #[tokio::test]
    async fn events_are_yielded_as_lines_arrive() {
        let (client, mut server) = tokio::io::duplex(64);
        let mut stream: EventStream<_, Tick> = EventStream::new(BufReader::new(client));

        server.write_all(b"data: {\"n\":1}\n").await.unwrap();
        assert_eq!(stream.next_event().await.unwrap(), Some(Tick { n: 1 }));

        server.write_all(b": ping\ndata: {\"n\":2}\n").await.unwrap();
        assert_eq!(stream.next_event().await.unwrap(), Some(Tick { n: 2 }));

        server.write_all(b"data: [DONE]\n").await.unwrap();
        assert_eq!(stream.next_event().await.unwrap(), None);
    }

    #[tokio::test]
    async fn decodes_completion_events() {
        let body = concat!(
            "data: {\"id\":\"cmpl-1\",\"object\":\"text_completion\",\"created\":1,\"model\":\"davinci\",\"choices\":[{\"text\":\" Go\",\"index\":0,\"logprobs\":null,\"finish_reason\":null}]}\n\n",
            "data: {\"id\":\"cmpl-1\",\"object\":\"text_completion\",\"created\":1,\"model\":\"davinci\",\"choices\":[{\"text\":\" is\",\"index\":0,\"logprobs\":null,\"finish_reason\":\"length\"}]}\n\n",
            "data: [DONE]\n\n",
        );
        let mut text = String::new();
        read_event_stream(body.as_bytes(), |event: CompletionResponse| {
            text.push_str(&event.choices[0].text)
        })
        .await
        .expect("stream should complete");
        assert_eq!(text, " Go is");
    }

    #[cfg(feature = "fuzz-tests")]
    mod prop_tests {
        use super::*;
        use proptest::prelude::*;

        fn filler() -> impl Strategy<Value = String> {
            prop_oneof![
                Just(String::new()),
                Just(": keep-alive".to_string()),
                Just("event: tick".to_string()),
                proptest::string::string_regex("id: [0-9]{1,4}").expect("regex"),
            ]
        }

        proptest! {
            #[test]
            fn every_frame_is_delivered_once_in_order(
                frames in proptest::collection::vec((any::<u32>(), filler()), 0..32)
            ) {
                let mut body = String::new();
                for (n, noise) in &frames {
                    body.push_str(noise);
                    body.push('\n');
                    body.push_str(&format!("data: {{\"n\":{n}}}\n"));
                }
                body.push_str("data: [DONE]\n");

                let runtime = tokio::runtime::Builder::new_current_thread()
                    .build()
                    .expect("runtime");
                let (seen, result) = runtime.block_on(collect(&body));
                prop_assert!(result.is_ok());
                let expected: Vec<u32> = frames.iter().map(|(n, _)| *n).collect();
                let got: Vec<u32> = seen.iter().map(|t| t.n).collect();
                prop_assert_eq!(got, expected);
            }

            #[test]
            fn missing_terminator_always_fails(
                frames in proptest::collection::vec(any::<u32>(), 0..16)
            ) {
                let body: String = frames.iter().map(|n| format!("data: {{\"n\":{n}}}\n")).collect();
                let runtime = tokio::runtime::Builder::new_current_thread()
                    .build()
                    .expect("runtime");
                let (seen, result) = runtime.block_on(collect(&body));
                prop_assert!(result.is_err());
                prop_assert_eq!(seen.len(), frames.len());
            }
        }
    }
}
