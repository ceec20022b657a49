//! Error types for the engine.
//!
//! Stepping, cell access and reseeding are total and never fail. Only
//! construction-time misuse (bad dimensions, malformed rules, unreadable
//! config) and undersized region buffers surface as [`EngineError`].

/// Errors that can occur while building or feeding a grid.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Grid dimensions must both be positive.
    #[error("invalid grid dimensions {width}x{height}: both must be positive")]
    InvalidDimensions {
        /// Requested width.
        width: i32,
        /// Requested height.
        height: i32,
    },

    /// A rule's pattern or template does not have exactly four slots.
    #[error("rule has {input} input and {output} output slots, expected 4 and 4")]
    RuleArity {
        /// Number of input pattern slots supplied.
        input: usize,
        /// Number of output template slots supplied.
        output: usize,
    },

    /// A rule written in text notation could not be parsed.
    #[error("cannot parse rule: {0}")]
    RuleParse(String),

    /// A region buffer is smaller than the region it must hold.
    #[error("region buffer holds {got} cells, {needed} required")]
    RegionBufferTooSmall {
        /// Cells the region covers.
        needed: usize,
        /// Cells the buffer provides.
        got: usize,
    },

    /// The rayon pool for parallel stepping could not be built.
    #[error("failed to build thread pool: {0}")]
    ThreadPool(String),

    /// Engine configuration could not be parsed.
    #[error("failed to parse engine config: {source}")]
    Config {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EngineError>;
