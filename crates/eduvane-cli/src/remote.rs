use anyhow::Result;
use async_trait::async_trait;
use eduvane::gateway::Gateway;
use eduvane::models::event::GatewayEvent;
use eduvane::models::input::UnifiedInput;
use futures::stream::{BoxStream, StreamExt};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplyRequest<'a> {
    #[serde(flatten)]
    input: &'a UnifiedInput,
    is_guest: bool,
}

/// Gateway that relays through an `eduvaned` server over HTTP
pub struct RemoteGateway {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteGateway {
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl Gateway for RemoteGateway {
    async fn process_input(
        &self,
        input: UnifiedInput,
        is_guest: bool,
    ) -> Result<BoxStream<'_, Result<GatewayEvent>>> {
        let response = self
            .client
            .post(self.url("/reply"))
            .json(&ReplyRequest {
                input: &input,
                is_guest,
            })
            .send()
            .await?
            .error_for_status()?;

        let mut body = Box::pin(response.bytes_stream());
        Ok(Box::pin(async_stream::stream! {
            let mut decoder = FrameDecoder::default();

            while let Some(chunk) = body.next().await {
                let chunk = match chunk {
                    Ok(chunk) => chunk,
                    Err(e) => {
                        yield Err(anyhow::Error::from(e));
                        return;
                    }
                };
                match decoder.push(&chunk) {
                    Ok(events) => {
                        for event in events {
                            yield Ok(event);
                        }
                    }
                    Err(e) => {
                        yield Err(e);
                        return;
                    }
                }
            }

            if let Err(e) = decoder.finish() {
                yield Err(e);
            }
        }))
    }

    async fn reset_session(&self) -> Result<()> {
        self.client
            .post(self.url("/session/reset"))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

/// Splits a server-sent event body into gateway events. Frames may arrive split
/// across any number of network chunks.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    buffer: Vec<u8>,
}

impl FrameDecoder {
    pub fn push(&mut self, chunk: &[u8]) -> Result<Vec<GatewayEvent>> {
        self.buffer.extend_from_slice(chunk);

        let mut events = Vec::new();
        while let Some(end) = find_frame_end(&self.buffer) {
            let frame: Vec<u8> = self.buffer.drain(..end + 2).collect();
            if let Some(event) = parse_frame(&frame[..end])? {
                events.push(event);
            }
        }
        Ok(events)
    }

    /// Fails if the body ended inside a frame
    pub fn finish(&self) -> Result<()> {
        if self.buffer.iter().all(u8::is_ascii_whitespace) {
            Ok(())
        } else {
            Err(anyhow::anyhow!("Event stream ended mid-frame"))
        }
    }
}

fn find_frame_end(buffer: &[u8]) -> Option<usize> {
    buffer.windows(2).position(|window| window == b"\n\n")
}

fn parse_frame(frame: &[u8]) -> Result<Option<GatewayEvent>> {
    let text = std::str::from_utf8(frame)?;
    let data: Vec<&str> = text
        .lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .map(str::trim_start)
        .collect();

    if data.is_empty() {
        // Comments and keep-alives carry no data
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(&data.join("\n"))?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use eduvane::models::event::AnalysisPhase;
    use serde_json::json;

    #[test]
    fn test_decodes_frames_split_across_chunks() {
        let mut decoder = FrameDecoder::default();
        let body = "data: {\"type\":\"PHASE_UPDATE\",\"phase\":\"PROCESSING\"}\n\ndata: {\"type\":\"STREAM_CHUNK\",\"text\":\"½ + ¼\"}\n\n";
        let bytes = body.as_bytes();

        let mut events = Vec::new();
        // Byte-at-a-time also splits the multi-byte characters
        for byte in bytes {
            events.extend(decoder.push(std::slice::from_ref(byte)).unwrap());
        }

        assert_eq!(
            events,
            vec![
                GatewayEvent::phase(AnalysisPhase::Processing),
                GatewayEvent::chunk("½ + ¼"),
            ]
        );
        assert!(decoder.finish().is_ok());
    }

    #[test]
    fn test_skips_comment_frames() {
        let mut decoder = FrameDecoder::default();
        let events = decoder
            .push(b": keep-alive\n\ndata: {\"type\":\"TASK_COMPLETE\"}\n\n")
            .unwrap();
        assert_eq!(events, vec![GatewayEvent::TaskComplete]);
    }

    #[test]
    fn test_rejects_unknown_event() {
        let mut decoder = FrameDecoder::default();
        let result = decoder.push(b"data: {\"type\":\"RESULT\"}\n\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_truncated_body_is_an_error() {
        let mut decoder = FrameDecoder::default();
        let events = decoder.push(b"data: {\"type\":\"TASK_COM").unwrap();
        assert!(events.is_empty());
        assert!(decoder.finish().is_err());
    }

    #[tokio::test]
    async fn test_relays_server_events() -> Result<()> {
        let mut server = mockito::Server::new_async().await;
        let body = [
            json!({"type": "PHASE_UPDATE", "phase": "PROCESSING"}),
            json!({"type": "ERROR", "message": "engine unavailable"}),
            json!({"type": "PHASE_UPDATE", "phase": "ERROR"}),
        ]
        .iter()
        .map(|event| format!("data: {}\n\n", event))
        .collect::<String>();

        let mock = server
            .mock("POST", "/reply")
            .match_body(mockito::Matcher::Json(
                json!({"text": "Linear equations for Grade 10", "isGuest": false}),
            ))
            .with_status(200)
            .with_header("content-type", "text/event-stream")
            .with_body(body)
            .create_async()
            .await;

        let gateway = RemoteGateway::new(format!("{}/", server.url()));
        let events: Vec<GatewayEvent> = gateway
            .process_input(UnifiedInput::text("Linear equations for Grade 10"), false)
            .await?
            .map(|event| event.unwrap())
            .collect()
            .await;

        assert_eq!(
            events,
            vec![
                GatewayEvent::phase(AnalysisPhase::Processing),
                GatewayEvent::error("engine unavailable"),
                GatewayEvent::phase(AnalysisPhase::Error),
            ]
        );
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn test_server_error_status_fails_the_call() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/reply")
            .with_status(502)
            .create_async()
            .await;

        let gateway = RemoteGateway::new(server.url());
        let result = gateway
            .process_input(UnifiedInput::text("hi"), false)
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_reset_posts_to_server() -> Result<()> {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/session/reset")
            .with_status(200)
            .with_body("{\"status\":\"ok\"}")
            .create_async()
            .await;

        RemoteGateway::new(server.url()).reset_session().await?;
        mock.assert_async().await;
        Ok(())
    }
}
