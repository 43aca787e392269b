/// Text shown for any failure that is not a server-signaled error frame.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to generate response";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamPhase {
    #[default]
    Idle,
    Streaming,
    Completed,
    Errored,
    Aborted,
}

/// How one `send_message` call ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamOutcome {
    Completed,
    Errored(String),
    Aborted,
}

/// Renderable snapshot of the in-flight reply.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StreamState {
    pub phase: StreamPhase,
    pub is_streaming: bool,
    pub current_message: String,
    pub error: Option<String>,
}

impl StreamState {
    pub(crate) fn begin(&mut self) {
        self.phase = StreamPhase::Streaming;
        self.is_streaming = true;
        self.current_message.clear();
        self.error = None;
    }

    pub(crate) fn append(&mut self, text: &str) {
        self.current_message.push_str(text);
    }

    /// Applies a terminal outcome. Accumulated text is kept in every case.
    pub(crate) fn finish(&mut self, outcome: &StreamOutcome) {
        self.is_streaming = false;
        match outcome {
            StreamOutcome::Completed => self.phase = StreamPhase::Completed,
            StreamOutcome::Errored(message) => {
                self.phase = StreamPhase::Errored;
                self.error = Some(message.clone());
            }
            StreamOutcome::Aborted => self.phase = StreamPhase::Aborted,
        }
    }
}
