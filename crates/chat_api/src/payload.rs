use std::path::Path;

use reqwest::multipart::{Form, Part};
use serde::Serialize;

use crate::error::ChatApiError;

/// File uploaded alongside a chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Reads a file from disk, naming the attachment after the file.
    pub fn from_path(path: &Path) -> Result<Self, ChatApiError> {
        let bytes = std::fs::read(path).map_err(|source| ChatApiError::Attachment {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "attachment".to_string());
        Ok(Self::new(file_name, bytes))
    }
}

/// Body of a send-message request.
///
/// The two encodings are mutually exclusive: a message with an attachment is
/// sent as multipart form data, anything else as JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageBody {
    Json { content: String },
    Multipart { content: String, attachment: Attachment },
}

#[derive(Serialize)]
struct JsonMessage<'a> {
    content: &'a str,
}

#[derive(Serialize)]
pub(crate) struct CreateConversation<'a> {
    pub title: &'a str,
}

impl MessageBody {
    pub fn new(content: impl Into<String>, attachment: Option<Attachment>) -> Self {
        let content = content.into();
        match attachment {
            Some(attachment) => Self::Multipart {
                content,
                attachment,
            },
            None => Self::Json { content },
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Self::Json { content } | Self::Multipart { content, .. } => content,
        }
    }

    pub fn is_multipart(&self) -> bool {
        matches!(self, Self::Multipart { .. })
    }

    pub(crate) fn apply(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, ChatApiError> {
        match self {
            Self::Json { content } => Ok(request.json(&JsonMessage { content })),
            Self::Multipart {
                content,
                attachment,
            } => Ok(request.multipart(multipart_form(content, attachment)?)),
        }
    }
}

fn multipart_form(content: &str, attachment: &Attachment) -> Result<Form, ChatApiError> {
    let mut file = Part::bytes(attachment.bytes.clone()).file_name(attachment.file_name.clone());
    if let Some(mime_type) = &attachment.mime_type {
        file = file.mime_str(mime_type)?;
    }
    Ok(Form::new()
        .text("content", content.to_owned())
        .part("file", file))
}
