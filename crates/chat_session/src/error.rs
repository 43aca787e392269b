use chat_api::ChatApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatSessionError {
    #[error("a reply is already streaming for this conversation")]
    AlreadyStreaming,

    #[error(transparent)]
    Api(#[from] ChatApiError),
}
