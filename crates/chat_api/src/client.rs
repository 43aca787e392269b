use futures_util::stream::{BoxStream, StreamExt};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, RequestBuilder, Response};
use tracing::debug;
use url::Url;

use crate::cancel::{await_or_cancel, CancelSignal};
use crate::config::ChatApiConfig;
use crate::conversation::{Conversation, ConversationId, DEFAULT_CONVERSATION_TITLE};
use crate::endpoints::{conversation_url, conversations_url, messages_url, parse_base_url};
use crate::error::{parse_error_message, ChatApiError};
use crate::payload::{CreateConversation, MessageBody};

/// Raw response body of a streaming send, one item per transport read.
pub type ChunkStream = BoxStream<'static, Result<Vec<u8>, ChatApiError>>;

#[derive(Debug)]
pub struct ChatApiClient {
    http: Client,
    config: ChatApiConfig,
    base_url: Url,
}

impl ChatApiClient {
    pub fn new(config: ChatApiConfig) -> Result<Self, ChatApiError> {
        let base_url = parse_base_url(&config.base_url)?;
        let mut builder = Client::builder().default_headers(build_headers(&config)?);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self {
            http,
            config,
            base_url,
        })
    }

    pub fn config(&self) -> &ChatApiConfig {
        &self.config
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Posts a message and returns the event-stream body once the server has
    /// acknowledged the request with a success status.
    pub async fn send_message(
        &self,
        conversation_id: ConversationId,
        body: &MessageBody,
        cancellation: Option<&CancelSignal>,
    ) -> Result<ChunkStream, ChatApiError> {
        let request = self.message_request(conversation_id, body)?;
        debug!(
            conversation_id,
            multipart = body.is_multipart(),
            "posting chat message"
        );

        let response = await_or_cancel(request.send(), cancellation).await??;
        let response = ensure_success(response, cancellation).await?;

        Ok(response
            .bytes_stream()
            .map(|chunk| chunk.map(|bytes| bytes.to_vec()).map_err(ChatApiError::from))
            .boxed())
    }

    fn message_request(
        &self,
        conversation_id: ConversationId,
        body: &MessageBody,
    ) -> Result<RequestBuilder, ChatApiError> {
        let url = messages_url(&self.base_url, conversation_id)?;
        body.apply(
            self.http
                .post(url)
                .header(ACCEPT, HeaderValue::from_static("text/event-stream")),
        )
    }

    pub async fn list_conversations(&self) -> Result<Vec<Conversation>, ChatApiError> {
        let response = self.http.get(conversations_url(&self.base_url)?).send().await?;
        let response = ensure_success(response, None).await?;
        Ok(response.json().await?)
    }

    /// Fetches one conversation together with its ordered messages.
    pub async fn get_conversation(
        &self,
        id: ConversationId,
    ) -> Result<Conversation, ChatApiError> {
        let response = self
            .http
            .get(conversation_url(&self.base_url, id)?)
            .send()
            .await?;
        let response = ensure_success(response, None).await?;
        Ok(response.json().await?)
    }

    /// Creates a conversation; a blank title falls back to the server default.
    pub async fn create_conversation(&self, title: &str) -> Result<Conversation, ChatApiError> {
        let title = if title.trim().is_empty() {
            DEFAULT_CONVERSATION_TITLE
        } else {
            title
        };
        let response = self
            .http
            .post(conversations_url(&self.base_url)?)
            .json(&CreateConversation { title })
            .send()
            .await?;
        let response = ensure_success(response, None).await?;
        Ok(response.json().await?)
    }

    pub async fn delete_conversation(&self, id: ConversationId) -> Result<(), ChatApiError> {
        let response = self
            .http
            .delete(conversation_url(&self.base_url, id)?)
            .send()
            .await?;
        ensure_success(response, None).await?;
        Ok(())
    }
}

fn build_headers(config: &ChatApiConfig) -> Result<HeaderMap, ChatApiError> {
    let mut headers = HeaderMap::new();
    for (key, value) in &config.extra_headers {
        let name =
            HeaderName::from_bytes(key.as_bytes()).map_err(|error| ChatApiError::InvalidHeader {
                name: key.clone(),
                reason: error.to_string(),
            })?;
        let value = HeaderValue::from_str(value).map_err(|error| ChatApiError::InvalidHeader {
            name: key.clone(),
            reason: error.to_string(),
        })?;
        headers.insert(name, value);
    }
    if let Some(user_agent) = config.user_agent.as_deref() {
        let value =
            HeaderValue::from_str(user_agent).map_err(|error| ChatApiError::InvalidHeader {
                name: USER_AGENT.to_string(),
                reason: error.to_string(),
            })?;
        headers.insert(USER_AGENT, value);
    }
    Ok(headers)
}

async fn ensure_success(
    response: Response,
    cancellation: Option<&CancelSignal>,
) -> Result<Response, ChatApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = await_or_cancel(response.text(), cancellation)
        .await?
        .unwrap_or_default();
    Err(ChatApiError::Status {
        status,
        message: parse_error_message(status, &body),
    })
}
