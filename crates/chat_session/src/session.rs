use std::sync::{Arc, Mutex};

use chat_api::{
    await_or_cancel, cancel, decode_stream, is_cancelled, new_cancel_signal, Attachment,
    CancelSignal, ChatApiError, ChatStreamEvent, ConversationId, MessageBody,
};
use futures_util::StreamExt;
use tracing::{debug, error};

use crate::cache::{CacheInvalidator, QueryKey};
use crate::error::ChatSessionError;
use crate::lock_unpoisoned;
use crate::state::{StreamOutcome, StreamState, GENERIC_FAILURE_MESSAGE};
use crate::transport::MessageTransport;

/// Drives one conversation's streaming replies.
///
/// All methods take `&self`, so a UI task can call [`ChatSession::stop_stream`]
/// or read [`ChatSession::state`] while `send_message` is suspended on the
/// network.
pub struct ChatSession {
    conversation_id: ConversationId,
    transport: Arc<dyn MessageTransport>,
    invalidator: Arc<dyn CacheInvalidator>,
    state: Mutex<StreamState>,
    active_cancel: Mutex<Option<CancelSignal>>,
}

impl ChatSession {
    pub fn new(
        conversation_id: ConversationId,
        transport: Arc<dyn MessageTransport>,
        invalidator: Arc<dyn CacheInvalidator>,
    ) -> Self {
        Self {
            conversation_id,
            transport,
            invalidator,
            state: Mutex::new(StreamState::default()),
            active_cancel: Mutex::new(None),
        }
    }

    pub fn conversation_id(&self) -> ConversationId {
        self.conversation_id
    }

    pub fn state(&self) -> StreamState {
        lock_unpoisoned(&self.state).clone()
    }

    pub fn is_streaming(&self) -> bool {
        lock_unpoisoned(&self.state).is_streaming
    }

    /// Sends `content` and consumes the reply stream until a terminal event.
    ///
    /// Failures of the exchange are reported through the returned outcome and
    /// [`ChatSession::state`]; the only error is a send issued while another
    /// reply is still streaming.
    pub async fn send_message(
        &self,
        content: impl Into<String>,
        attachment: Option<Attachment>,
    ) -> Result<StreamOutcome, ChatSessionError> {
        let signal = self.begin()?;
        let body = MessageBody::new(content, attachment);
        debug!(
            conversation_id = self.conversation_id,
            multipart = body.is_multipart(),
            "chat stream started"
        );

        let outcome = match self.consume(&body, &signal).await {
            Ok(outcome) => outcome,
            Err(err) if err.is_cancelled() => StreamOutcome::Aborted,
            Err(err) => {
                error!(
                    conversation_id = self.conversation_id,
                    error = %err,
                    "chat stream failed"
                );
                StreamOutcome::Errored(GENERIC_FAILURE_MESSAGE.to_string())
            }
        };

        let outcome = if self.finish(&signal, &outcome) {
            outcome
        } else {
            StreamOutcome::Aborted
        };
        if outcome == StreamOutcome::Completed {
            self.invalidator
                .invalidate(QueryKey::Conversation(self.conversation_id));
            self.invalidator.invalidate(QueryKey::ConversationList);
        }
        debug!(
            conversation_id = self.conversation_id,
            ?outcome,
            "chat stream finished"
        );
        Ok(outcome)
    }

    /// Cancels the in-flight request, if any.
    ///
    /// Text received before the call stays in `current_message`. Returns
    /// whether a stream was actually stopped.
    pub fn stop_stream(&self) -> bool {
        let Some(signal) = lock_unpoisoned(&self.active_cancel).take() else {
            return false;
        };
        cancel::cancel(&signal);
        lock_unpoisoned(&self.state).finish(&StreamOutcome::Aborted);
        debug!(conversation_id = self.conversation_id, "chat stream stopped");
        true
    }

    fn begin(&self) -> Result<CancelSignal, ChatSessionError> {
        let mut active = lock_unpoisoned(&self.active_cancel);
        if active.is_some() {
            return Err(ChatSessionError::AlreadyStreaming);
        }
        let signal = new_cancel_signal();
        *active = Some(signal.clone());
        lock_unpoisoned(&self.state).begin();
        Ok(signal)
    }

    async fn consume(
        &self,
        body: &MessageBody,
        signal: &CancelSignal,
    ) -> Result<StreamOutcome, ChatApiError> {
        let chunks = self
            .transport
            .post_message(self.conversation_id, body, Some(signal))
            .await?;
        let mut events = std::pin::pin!(decode_stream(chunks));

        loop {
            let event = match await_or_cancel(events.next(), Some(signal)).await? {
                Some(event) => event?,
                None => return Err(ChatApiError::IncompleteStream),
            };

            match event {
                ChatStreamEvent::Content { text } => {
                    let mut state = lock_unpoisoned(&self.state);
                    if is_cancelled(Some(signal)) {
                        return Err(ChatApiError::Cancelled);
                    }
                    state.append(&text);
                }
                ChatStreamEvent::Done => return Ok(StreamOutcome::Completed),
                ChatStreamEvent::Error { message } => {
                    return Ok(StreamOutcome::Errored(message));
                }
            }
        }
    }

    /// Applies `outcome` unless the stream was already stopped; returns
    /// whether it was applied.
    fn finish(&self, signal: &CancelSignal, outcome: &StreamOutcome) -> bool {
        let mut active = lock_unpoisoned(&self.active_cancel);
        let still_active = active
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, signal));
        if !still_active {
            return false;
        }
        *active = None;
        lock_unpoisoned(&self.state).finish(outcome);
        true
    }
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("conversation_id", &self.conversation_id)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
