use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnalysisPhase {
    Idle,
    Processing,
    Complete,
    Error,
}

/// A completed submission as reported by the engine. The gateway does not look inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Submission(pub Value);

/// Lifecycle and content events produced by an [`crate::engine::Engine`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EngineEvent {
    PhaseUpdate { phase: AnalysisPhase },
    StreamChunk { text: String },
    SubmissionComplete { submission: Submission },
    Error { message: String },
    FollowUp { text: String },
    TaskComplete,
}

/// Events relayed by the gateway to the workspace, and streamed to browser clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GatewayEvent {
    PhaseUpdate { phase: AnalysisPhase },
    StreamChunk { text: String },
    SubmissionComplete { submission: Submission },
    Error { message: String },
    FollowUp { text: String },
    TaskComplete,
}

impl GatewayEvent {
    pub fn phase(phase: AnalysisPhase) -> Self {
        GatewayEvent::PhaseUpdate { phase }
    }

    pub fn chunk<S: Into<String>>(text: S) -> Self {
        GatewayEvent::StreamChunk { text: text.into() }
    }

    pub fn error<S: Into<String>>(message: S) -> Self {
        GatewayEvent::Error {
            message: message.into(),
        }
    }

    /// The wire tag of this event, for logging
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayEvent::PhaseUpdate { .. } => "PHASE_UPDATE",
            GatewayEvent::StreamChunk { .. } => "STREAM_CHUNK",
            GatewayEvent::SubmissionComplete { .. } => "SUBMISSION_COMPLETE",
            GatewayEvent::Error { .. } => "ERROR",
            GatewayEvent::FollowUp { .. } => "FOLLOW_UP",
            GatewayEvent::TaskComplete => "TASK_COMPLETE",
        }
    }
}

impl From<EngineEvent> for GatewayEvent {
    fn from(event: EngineEvent) -> Self {
        match event {
            EngineEvent::PhaseUpdate { phase } => GatewayEvent::PhaseUpdate { phase },
            EngineEvent::StreamChunk { text } => GatewayEvent::StreamChunk { text },
            EngineEvent::SubmissionComplete { submission } => {
                GatewayEvent::SubmissionComplete { submission }
            }
            EngineEvent::Error { message } => GatewayEvent::Error { message },
            EngineEvent::FollowUp { text } => GatewayEvent::FollowUp { text },
            EngineEvent::TaskComplete => GatewayEvent::TaskComplete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_tags_match_browser_contract() {
        let cases = vec![
            (
                GatewayEvent::phase(AnalysisPhase::Processing),
                json!({"type": "PHASE_UPDATE", "phase": "PROCESSING"}),
            ),
            (
                GatewayEvent::chunk("x = 4"),
                json!({"type": "STREAM_CHUNK", "text": "x = 4"}),
            ),
            (
                GatewayEvent::error("boom"),
                json!({"type": "ERROR", "message": "boom"}),
            ),
            (GatewayEvent::TaskComplete, json!({"type": "TASK_COMPLETE"})),
        ];

        for (event, expected) in cases {
            assert_eq!(serde_json::to_value(&event).unwrap(), expected);
            assert_eq!(event.kind(), expected["type"].as_str().unwrap());
        }
    }

    #[test]
    fn test_submission_is_opaque() {
        let event: GatewayEvent = serde_json::from_value(json!({
            "type": "SUBMISSION_COMPLETE",
            "submission": {"score": 7, "outOf": 10}
        }))
        .unwrap();

        match event {
            GatewayEvent::SubmissionComplete { submission } => {
                assert_eq!(submission.0["outOf"], json!(10));
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_engine_events_map_one_to_one() {
        let engine_events = vec![
            EngineEvent::PhaseUpdate {
                phase: AnalysisPhase::Complete,
            },
            EngineEvent::StreamChunk {
                text: "step 1".into(),
            },
            EngineEvent::SubmissionComplete {
                submission: Submission(json!({"id": "s-1"})),
            },
            EngineEvent::Error {
                message: "bad".into(),
            },
            EngineEvent::FollowUp {
                text: "Try another?".into(),
            },
            EngineEvent::TaskComplete,
        ];

        for event in engine_events {
            // Both unions share a wire format, so a faithful mapping serializes identically
            let engine_json = serde_json::to_value(&event).unwrap();
            let gateway_json = serde_json::to_value(GatewayEvent::from(event)).unwrap();
            assert_eq!(engine_json, gateway_json);
        }
    }
}
