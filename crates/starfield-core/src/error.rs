use thiserror::Error;

/// Failures local to the background visual.
///
/// None of these are allowed to reach the rest of the page: callers log them
/// and either skip the frame or omit the background entirely.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BackgroundError {
    #[error("graphics context unavailable: {0}")]
    ContextUnavailable(String),

    #[error("session {session} used after dispose")]
    UseAfterDispose { session: u64 },

    #[error("session {live} is still live; dispose it before creating another")]
    SessionAlreadyLive { live: u64 },

    #[error("invalid viewport {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },

    #[error("draw failed: {0}")]
    Draw(String),
}

pub type Result<T> = std::result::Result<T, BackgroundError>;
