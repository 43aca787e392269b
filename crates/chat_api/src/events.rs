use serde_json::{json, Value};

/// Decoded chat stream event, one per `data: ` frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatStreamEvent {
    /// Incremental token text to append.
    Content { text: String },
    /// Terminal success.
    Done,
    /// Terminal failure signaled by the server.
    Error { message: String },
}

impl ChatStreamEvent {
    /// Maps a frame payload to an event.
    ///
    /// Shapes are tested in priority order `error`, `done`, `content`; a payload
    /// matching none of them (or carrying an empty `content`) yields `None`.
    pub fn from_payload(value: &Value) -> Option<Self> {
        let object = value.as_object()?;

        if let Some(message) = object
            .get("error")
            .and_then(Value::as_str)
            .filter(|message| !message.is_empty())
        {
            return Some(Self::Error {
                message: message.to_owned(),
            });
        }

        if object.get("done").and_then(Value::as_bool) == Some(true) {
            return Some(Self::Done);
        }

        object
            .get("content")
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
            .map(|text| Self::Content {
                text: text.to_owned(),
            })
    }

    /// Wire form of this event, delimiter included.
    pub fn to_sse_frame(&self) -> String {
        let payload = match self {
            Self::Content { text } => json!({ "content": text }),
            Self::Done => json!({ "done": true }),
            Self::Error { message } => json!({ "error": message }),
        };
        format!("data: {payload}\n\n")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::ChatStreamEvent;

    #[test]
    fn error_takes_priority_over_done_and_content() {
        let value = json!({"error": "boom", "done": true, "content": "x"});
        assert_eq!(
            ChatStreamEvent::from_payload(&value),
            Some(ChatStreamEvent::Error {
                message: "boom".to_owned()
            })
        );
    }

    #[test]
    fn done_takes_priority_over_content() {
        let value = json!({"done": true, "content": "tail"});
        assert_eq!(ChatStreamEvent::from_payload(&value), Some(ChatStreamEvent::Done));
    }

    #[test]
    fn falsy_fields_are_ignored() {
        assert_eq!(ChatStreamEvent::from_payload(&json!({"done": false})), None);
        assert_eq!(ChatStreamEvent::from_payload(&json!({"content": ""})), None);
        assert_eq!(ChatStreamEvent::from_payload(&json!({"error": ""})), None);
        assert_eq!(ChatStreamEvent::from_payload(&json!(["content"])), None);
    }

    #[test]
    fn frame_encoding_matches_server_format() {
        assert_eq!(
            ChatStreamEvent::Content {
                text: "hi".to_owned()
            }
            .to_sse_frame(),
            "data: {\"content\":\"hi\"}\n\n"
        );
        assert_eq!(ChatStreamEvent::Done.to_sse_frame(), "data: {\"done\":true}\n\n");
    }
}
