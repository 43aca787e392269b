//! Conversation-side state for the chat agent window.
//!
//! [`ChatSession`] turns the decoded event stream of one send into a
//! renderable [`StreamState`] and notifies a [`CacheInvalidator`] once a reply
//! has been persisted. [`ConversationCache`] is the default invalidation
//! target.

use std::sync::{Mutex, MutexGuard};

pub mod cache;
pub mod error;
pub mod session;
pub mod state;
pub mod transport;

pub use cache::{CacheInvalidator, ConversationCache, ConversationService, QueryKey};
pub use error::ChatSessionError;
pub use session::ChatSession;
pub use state::{StreamOutcome, StreamPhase, StreamState, GENERIC_FAILURE_MESSAGE};
pub use transport::MessageTransport;

pub(crate) fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
