use chat_api::{
    CancelSignal, ChatApiClient, ChatApiError, ChunkStream, ConversationId, MessageBody,
};
use futures_util::future::{BoxFuture, FutureExt};

/// Sends one message and hands back the raw event-stream body.
///
/// Implemented by [`ChatApiClient`]; tests substitute scripted bodies.
pub trait MessageTransport: Send + Sync {
    fn post_message<'a>(
        &'a self,
        conversation_id: ConversationId,
        body: &'a MessageBody,
        cancellation: Option<&'a CancelSignal>,
    ) -> BoxFuture<'a, Result<ChunkStream, ChatApiError>>;
}

impl MessageTransport for ChatApiClient {
    fn post_message<'a>(
        &'a self,
        conversation_id: ConversationId,
        body: &'a MessageBody,
        cancellation: Option<&'a CancelSignal>,
    ) -> BoxFuture<'a, Result<ChunkStream, ChatApiError>> {
        self.send_message(conversation_id, body, cancellation).boxed()
    }
}
