//! Error types for tile and surface operations.

/// Errors raised while materializing, drawing or driving a tile.
///
/// Out-of-range geometry is *not* an error: width/height setters reject it
/// silently and keep the previous value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TileError {
    /// The host could not create (or attach) a page element.
    #[error("failed to create {element} element: {reason}")]
    CreateElement {
        /// Element kind, e.g. `"canvas"` or `"video"`
        element: &'static str,
        /// Host-provided detail
        reason: String,
    },
    /// The canvas did not hand out a 2D drawing context.
    #[error("no 2d drawing context: {0}")]
    Context(String),
    /// A drawing primitive failed.
    #[error("draw failed: {0}")]
    Draw(String),
    /// The media element refused a playback request.
    #[error("playback failed: {0}")]
    Playback(String),
    /// Binding DOM event listeners failed.
    #[error("event binding failed: {0}")]
    Bind(String),
    /// The host could not schedule a task.
    #[error("scheduling failed: {0}")]
    Schedule(String),
    /// The operation needs a canvas, context or video that is not attached.
    #[error("tile is not initialized")]
    NotInitialized,
}

impl TileError {
    /// Shorthand for [`TileError::CreateElement`].
    pub fn create(element: &'static str, reason: impl Into<String>) -> Self {
        TileError::CreateElement {
            element,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_element() {
        let err = TileError::create("canvas", "document has no body");
        assert_eq!(
            err.to_string(),
            "failed to create canvas element: document has no body"
        );
        assert_eq!(TileError::NotInitialized.to_string(), "tile is not initialized");
    }
}
