/// The page's single conditional log sink, switched at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogSink {
    enabled: bool,
}

impl LogSink {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn log(&self, message: impl std::fmt::Display) {
        if self.enabled {
            tracing::info!(target: "ep_profile", "{message}");
        }
    }
}
