//! Endpoint resolution against the configured base URL.

use url::Url;

use crate::conversation::ConversationId;
use crate::error::ChatApiError;

/// Parses the base URL, accepting it with or without a trailing slash.
///
/// The result always ends in `/` so relative API paths are appended to,
/// rather than replacing, any path prefix the server is mounted under.
pub fn parse_base_url(input: &str) -> Result<Url, ChatApiError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ChatApiError::InvalidBaseUrl("base URL is empty".to_string()));
    }

    let mut url =
        Url::parse(trimmed).map_err(|error| ChatApiError::InvalidBaseUrl(format!("{trimmed}: {error}")))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ChatApiError::InvalidBaseUrl(format!(
            "{trimmed}: expected an http(s) origin"
        )));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

fn resolve(base: &Url, path: &str) -> Result<Url, ChatApiError> {
    base.join(path)
        .map_err(|error| ChatApiError::InvalidBaseUrl(format!("{base}{path}: {error}")))
}

/// `GET`/`POST` target for the conversation collection.
pub fn conversations_url(base: &Url) -> Result<Url, ChatApiError> {
    resolve(base, "api/conversations")
}

/// `GET`/`DELETE` target for one conversation.
pub fn conversation_url(base: &Url, id: ConversationId) -> Result<Url, ChatApiError> {
    resolve(base, &format!("api/conversations/{id}"))
}

/// Streaming `POST` target for a conversation's messages.
pub fn messages_url(base: &Url, id: ConversationId) -> Result<Url, ChatApiError> {
    resolve(base, &format!("api/conversations/{id}/messages"))
}
