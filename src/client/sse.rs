//! Parsing of `message/stream` SSE responses
//!
//! The server frames each update event as a JSON-RPC 2.0 success envelope in
//! one SSE data line; keep-alive comments are dropped by the eventsource
//! parser.

use eventsource_stream::Eventsource;
use futures::stream::{Stream, StreamExt};

use crate::protocol::{A2AError, JsonRpcResponse, UpdateEvent};

/// Parse an SSE byte stream into a stream of task update events
pub fn parse_update_stream<S>(
    byte_stream: S,
) -> impl Stream<Item = Result<UpdateEvent, A2AError>>
where
    S: Stream<Item = Result<bytes::Bytes, reqwest::Error>> + Send + 'static,
{
    byte_stream.eventsource().map(|result| match result {
        Ok(event) => {
            let envelope: JsonRpcResponse = serde_json::from_str(&event.data).map_err(|e| {
                A2AError::Protocol(format!("Failed to parse SSE event data: {}", e))
            })?;

            if let Some(error) = envelope.error {
                return Err(A2AError::Protocol(format!(
                    "JSON-RPC error {}: {}",
                    error.code, error.message
                )));
            }

            let result = envelope.result.ok_or_else(|| {
                A2AError::Protocol("SSE event missing 'result' field".to_string())
            })?;

            serde_json::from_value(result)
                .map_err(|e| A2AError::Protocol(format!("Unrecognized update event: {}", e)))
        }
        Err(e) => Err(A2AError::Transport(format!("SSE stream error: {}", e))),
    })
}

#[cfg(test)]
mod tests {
    use futures::{pin_mut, StreamExt};

    use crate::protocol::TaskState;

    use super::*;

    fn byte_stream(
        data: &'static str,
    ) -> impl Stream<Item = Result<bytes::Bytes, reqwest::Error>> {
        futures::stream::once(async move {
            Ok::<bytes::Bytes, reqwest::Error>(bytes::Bytes::from(data))
        })
    }

    #[tokio::test]
    async fn test_parse_status_and_artifact_events() {
        let sse_data = "data: {\"jsonrpc\":\"2.0\",\"result\":{\"kind\":\"status-update\",\"taskId\":\"t1\",\"status\":{\"state\":\"working\"},\"final\":false},\"id\":\"1\"}\n\n\
                        data: {\"jsonrpc\":\"2.0\",\"result\":{\"kind\":\"artifact-update\",\"taskId\":\"t1\",\"artifact\":{\"artifactId\":\"a1\",\"name\":\"Response\",\"parts\":[{\"text\":\"hi\"}]},\"lastChunk\":true},\"id\":\"1\"}\n\n";

        let event_stream = parse_update_stream(byte_stream(sse_data));
        pin_mut!(event_stream);

        match event_stream.next().await.unwrap().unwrap() {
            UpdateEvent::StatusUpdate(event) => {
                assert_eq!(event.task_id, "t1");
                assert_eq!(event.status.state, TaskState::Working);
                assert!(!event.is_final);
            }
            other => panic!("Expected status update, got {:?}", other),
        }

        match event_stream.next().await.unwrap().unwrap() {
            UpdateEvent::ArtifactUpdate(event) => {
                assert_eq!(event.artifact.name.as_deref(), Some("Response"));
                assert_eq!(event.artifact.text_content(), "hi");
            }
            other => panic!("Expected artifact update, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_parse_error_envelope() {
        let sse_data =
            "data: {\"jsonrpc\":\"2.0\",\"error\":{\"code\":-32600,\"message\":\"Invalid Request\"},\"id\":\"1\"}\n\n";

        let event_stream = parse_update_stream(byte_stream(sse_data));
        pin_mut!(event_stream);

        let result = event_stream.next().await.unwrap();
        match result {
            Err(A2AError::Protocol(msg)) => {
                assert!(msg.contains("-32600"));
                assert!(msg.contains("Invalid Request"));
            }
            other => panic!("Expected protocol error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_keepalive_comments_are_skipped() {
        let sse_data = ": ping\n\n\
                        data: {\"jsonrpc\":\"2.0\",\"result\":{\"kind\":\"status-update\",\"taskId\":\"t1\",\"status\":{\"state\":\"completed\"},\"final\":true},\"id\":\"1\"}\n\n";

        let event_stream = parse_update_stream(byte_stream(sse_data));
        pin_mut!(event_stream);

        let event = event_stream.next().await.unwrap().unwrap();
        assert!(event.is_final());
        assert!(event_stream.next().await.is_none());
    }
}
