//! scoresync — editor, score, and playback synchronization engine.
//!
//! Keeps a plain-text structured-music document, a separately rendered
//! graphical score, and a live audio-playback position aligned over one
//! shared bar/beat coordinate system. The source text never has to be
//! valid: position facts come from a shallow scan, failed renders roll
//! back to the last good one, and stale asynchronous results are dropped
//! by generation comparison.
//!
//! # Example
//! ```
//! use scoresync::index;
//!
//! let beats = index("melody: |0.1.4 1.1.4| |2.1.4 3.1.4|");
//! assert_eq!(beats.len(), 4);
//! assert_eq!(beats[2].bar_index, 1);
//! ```
//!
//! The host drives the engine through [`SyncEngine`], implementing
//! [`EditorView`] and [`ScoreView`] for its editor surface and renderer.

pub mod coordinator;
pub mod cursor;
pub mod engine;
pub mod error;
pub mod highlight;
pub mod indexer;
pub mod model;
pub mod paginate;
pub mod surface;
pub mod worker;

pub use coordinator::{RenderCoordinator, RenderUpdate};
pub use cursor::{CursorTracker, FrameResult};
pub use engine::{EngineConfig, SyncEngine};
pub use error::SyncError;
pub use highlight::{
    EditorToScoreHighlighter, PlaybackHighlighter, PlaybackMode, ReentrancyGuard,
    ScoreToEditorHighlighter, ScrollBand, SyncGuards,
};
pub use indexer::{bar_span, beat_at_offset, index, locate};
pub use model::*;
pub use paginate::{page_to_html, paginate, paginate_blocks, Page, PageBlock, PrintBlock};
pub use surface::{Decoration, DecorationStyle, EditorView, ScoreView};
pub use worker::{WorkerClient, WorkerReply, WorkerRequest, WorkerResponse};
