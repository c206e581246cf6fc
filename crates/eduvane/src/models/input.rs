use serde::{Deserialize, Serialize};

/// File metadata sent alongside the text of a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub name: String,
    pub mime_type: String,
    /// Base64 encoded file body
    pub data: String,
}

impl Attachment {
    pub fn new<N, M, D>(name: N, mime_type: M, data: D) -> Self
    where
        N: Into<String>,
        M: Into<String>,
        D: Into<String>,
    {
        Attachment {
            name: name.into(),
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// The outbound request envelope sent from the workspace to the gateway
pub struct UnifiedInput {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
}

impl UnifiedInput {
    pub fn text<S: Into<String>>(text: S) -> Self {
        UnifiedInput {
            text: text.into(),
            attachment: None,
        }
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }
}
