//! Consumption boundaries: the traits a host application implements for
//! its text-editing surface and its score renderer.
//!
//! The engine never inspects renderer internals beyond bar/beat/range
//! identity, and it only ever mutates presentation state (decorations,
//! highlight, scroll position) through these traits. Replacing the
//! rendered content wholesale is reserved to the render coordinator.

use serde::{Deserialize, Serialize};

use crate::model::{EntityId, RequestGeneration};

/// Presentation style of an editor overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecorationStyle {
    /// Score-originated selection mirrored into the editor
    Selection,
    /// The beat currently sounding during playback
    PlayingBeat,
    /// The bar holding the parked player cursor while paused
    ParkedBar,
}

/// A presentation-only overlay applied to a text range. Carries no
/// semantic data. Offsets are in UTF-16 code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decoration {
    pub from: usize,
    pub to: usize,
    pub style: DecorationStyle,
}

/// The text editor surface as the engine consumes it.
pub trait EditorView {
    /// Read-only snapshot of the current document text.
    fn document(&self) -> &str;

    /// Document length in UTF-16 code units.
    fn document_length(&self) -> usize {
        self.document().chars().map(char::len_utf16).sum()
    }

    /// Current caret offset in UTF-16 code units.
    fn caret_offset(&self) -> usize;

    /// Replace the whole decoration set. The engine redraws wholesale on
    /// every update; no incremental diffing is expected.
    fn set_decorations(&mut self, decorations: &[Decoration]);

    /// Scroll so `offset` sits at `target_fraction` of the viewport
    /// height (0.0 = top, 1.0 = bottom).
    fn scroll_to_offset(&mut self, offset: usize, target_fraction: f64);

    /// Where `offset` currently sits in the viewport, as a fraction of the
    /// viewport height. `None` when the position is unknown or off-screen.
    fn offset_viewport_fraction(&self, offset: usize) -> Option<f64>;
}

/// The score renderer as the engine consumes it.
pub trait ScoreView {
    /// Ask the renderer to (re-)render `content`. Fire-and-forget: the
    /// host delivers the asynchronous outcome back to the render
    /// coordinator tagged with the same generation. Nothing is ever
    /// cancelled; superseded outcomes are dropped by generation
    /// comparison when they arrive.
    fn request_render(&mut self, generation: RequestGeneration, content: &str);

    /// Highlight the inclusive range between two rendered entities.
    fn highlight_range(&mut self, from: EntityId, to: EntityId);

    /// Remove any entity highlight.
    fn clear_highlight(&mut self);

    /// Scroll the score view so `entity` sits in the upper third of the
    /// viewport.
    fn scroll_to_entity(&mut self, entity: EntityId);

    /// Resolve a bar/beat coordinate to the rendered entity at that
    /// position, if one exists in the current render.
    fn entity_at(&self, bar_index: usize, beat_index: usize) -> Option<EntityId>;

    /// Where `entity` currently sits in the viewport, as a fraction of the
    /// viewport height (0.0 = top, 1.0 = bottom). `None` when unknown or
    /// off-screen.
    fn entity_viewport_fraction(&self, entity: EntityId) -> Option<f64>;
}
