//! `/chat/completions`, sync and streaming.

use crate::api::client::Transport;
use crate::api::stream::ResponseEventStream;
use crate::error::ClientError;
use crate::types::{ChatCompletionRequest, ChatCompletionResponse, ChatCompletionStreamResponse};

const PATH: &str = "/chat/completions";

pub(crate) async fn create(
    transport: &Transport,
    mut request: ChatCompletionRequest,
) -> Result<ChatCompletionResponse, ClientError> {
    request.stream = false;
    transport.post(PATH, &request).await
}

pub(crate) async fn stream(
    transport: &Transport,
    mut request: ChatCompletionRequest,
) -> Result<ResponseEventStream<ChatCompletionStreamResponse>, ClientError> {
    request.stream = true;
    transport.post_stream(PATH, &request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::testsupport::{sse_data_line, sse_done_line, MockServer};
    use crate::types::{ChatMessage, Role, GPT3_DOT5_TURBO};

    fn request() -> ChatCompletionRequest {
        ChatCompletionRequest::new(
            GPT3_DOT5_TURBO,
            vec![
                ChatMessage::system("You are a poetry writing assistant"),
                ChatMessage::user("Roses are red.\nViolets are"),
            ],
        )
    }

    #[tokio::test]
    async fn create_decodes_message() {
        let server = MockServer::json(
            200,
            r#"{"id":"chatcmpl-1","object":"chat.completion","created":1,"model":"gpt-3.5-turbo","choices":[{"index":0,"message":{"role":"assistant","content":"blue."},"finish_reason":"stop"}],"usage":{"prompt_tokens":9,"completion_tokens":2,"total_tokens":11}}"#,
        )
        .await;
        let transport = Transport::new(&ClientConfig::new("sk").with_base_url(&server.base_url));
        let response = create(&transport, request()).await.unwrap();
        assert_eq!(response.choices[0].message.role, Role::Assistant);
        assert_eq!(response.choices[0].message.content, "blue.");

        let req = server.captured().await;
        assert_eq!(req.path, "/v1/chat/completions");
        assert!(req.json_body().get("stream").is_none());
    }

    #[tokio::test]
    async fn stream_collects_deltas() {
        let body = format!(
            "{}{}{}{}",
            sse_data_line(r#"{"id":"c","object":"chat.completion.chunk","created":1,"model":"gpt-3.5-turbo","choices":[{"index":0,"delta":{"role":"assistant"},"finish_reason":null}]}"#),
            sse_data_line(r#"{"id":"c","object":"chat.completion.chunk","created":1,"model":"gpt-3.5-turbo","choices":[{"index":0,"delta":{"content":"blue"},"finish_reason":null}]}"#),
            sse_data_line(r#"{"id":"c","object":"chat.completion.chunk","created":1,"model":"gpt-3.5-turbo","choices":[{"index":0,"delta":{},"finish_reason":"stop"}]}"#),
            sse_done_line(),
        );
        let server = MockServer::event_stream(&body).await;
        let transport = Transport::new(&ClientConfig::new("sk").with_base_url(&server.base_url));

        let mut text = String::new();
        let mut finish = None;
        stream(&transport, request())
            .await
            .unwrap()
            .for_each(|event| {
                let choice = &event.choices[0];
                if let Some(content) = &choice.delta.content {
                    text.push_str(content);
                }
                if choice.finish_reason.is_some() {
                    finish = choice.finish_reason.clone();
                }
            })
            .await
            .unwrap();
        assert_eq!(text, "blue");
        assert_eq!(finish.as_deref(), Some("stop"));
        assert_eq!(server.captured().await.json_body()["stream"], true);
    }
}
