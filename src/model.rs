//! Data model for the shared bar/beat coordinate system.
//!
//! Every component of the engine speaks in these types: positions in the
//! source text, beat records produced by the indexer, and the observable
//! values handed to the host UI. All offsets and columns are counted in
//! UTF-16 code units so they stay consistent with the units the editor
//! surface itself reports.

use serde::{Deserialize, Serialize};

/// A location in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePosition {
    /// Line index (0-based)
    pub line: usize,
    /// Column within the line, in UTF-16 code units (0-based)
    pub column: usize,
    /// Absolute offset from the start of the document, in UTF-16 code units
    pub offset: usize,
}

/// A span of source text with both offset and line/column bounds.
///
/// `from <= to` always holds for ranges produced by this crate. A range
/// carried across a document edit may point past the end of the new text
/// and must be re-clamped with [`CodeRange::clamp_to`] before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeRange {
    /// Start offset (UTF-16 code units)
    pub from: usize,
    /// End offset (UTF-16 code units)
    pub to: usize,
    pub start_line: usize,
    pub start_column: usize,
    pub end_line: usize,
    pub end_column: usize,
}

impl CodeRange {
    pub fn new(start: SourcePosition, end: SourcePosition) -> Self {
        Self {
            from: start.offset,
            to: end.offset,
            start_line: start.line,
            start_column: start.column,
            end_line: end.line,
            end_column: end.column,
        }
    }

    /// Clamp both bounds into `[0, document_length]`.
    ///
    /// Never panics and never yields a range with `from > to`, whatever
    /// state the input range is in.
    pub fn clamp_to(&self, document_length: usize) -> CodeRange {
        let to = self.to.min(document_length);
        let from = self.from.min(to);
        CodeRange { from, to, ..*self }
    }

    /// Whether a caret offset falls on this range. The end bound is
    /// inclusive so a caret sitting just after a beat token still resolves
    /// to that beat.
    pub fn contains_offset(&self, offset: usize) -> bool {
        self.from <= offset && offset <= self.to
    }

    /// The range covering everything from the start of `first` to the end
    /// of `last`.
    pub fn covering(first: &CodeRange, last: &CodeRange) -> CodeRange {
        CodeRange {
            from: first.from,
            to: last.to,
            start_line: first.start_line,
            start_column: first.start_column,
            end_line: last.end_line,
            end_column: last.end_column,
        }
    }
}

/// One beat recognized in the source text, addressed by bar and beat index.
///
/// Bar numbering is per structural unit (voice): it resets to 0 whenever
/// the scanner crosses a voice declaration. The list produced by the
/// indexer is totally ordered by `range.from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeatPosition {
    pub bar_index: usize,
    pub beat_index: usize,
    pub range: CodeRange,
}

/// The caret's resolved musical position.
///
/// `from_doc_change` distinguishes "cursor moved because the user typed"
/// (auto-scroll suppressed) from "cursor moved because the user clicked or
/// arrow-keyed" (auto-scroll allowed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorCursorInfo {
    pub bar_index: usize,
    pub beat_index: usize,
    pub from_doc_change: bool,
}

/// A score-side selection, expressed in the same bar/beat coordinate space
/// as [`EditorCursorInfo`] so the two highlighters stay symmetric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSelectionInfo {
    pub start_bar_index: usize,
    pub start_beat_index: usize,
    pub end_bar_index: usize,
    pub end_beat_index: usize,
}

impl ScoreSelectionInfo {
    /// A single-beat selection (a click on one entity).
    pub fn single(bar_index: usize, beat_index: usize) -> Self {
        Self {
            start_bar_index: bar_index,
            start_beat_index: beat_index,
            end_bar_index: bar_index,
            end_beat_index: beat_index,
        }
    }
}

/// Current audio-playback position. Updated at audio-callback rate while
/// playing and cleared on stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackBeatInfo {
    pub bar_index: usize,
    pub beat_index: usize,
}

/// Last played position. Unlike [`PlaybackBeatInfo`] this persists across
/// pause, so a "parked" highlight can survive pausing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerCursorPosition {
    pub bar_index: usize,
    pub beat_index: usize,
}

impl From<PlaybackBeatInfo> for PlayerCursorPosition {
    fn from(beat: PlaybackBeatInfo) -> Self {
        Self {
            bar_index: beat.bar_index,
            beat_index: beat.beat_index,
        }
    }
}

/// Monotonically increasing identity of a render request.
///
/// Stale asynchronous results are discarded by comparing generations;
/// nothing is ever cancelled in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestGeneration(pub u64);

impl RequestGeneration {
    pub fn next(self) -> RequestGeneration {
        RequestGeneration(self.0 + 1)
    }
}

/// Opaque handle into the external renderer's internal model. The engine
/// only compares and forwards these; it never looks inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u64);

/// The identity of the most recently issued re-render. Exactly one may be
/// outstanding per document; a newer request invalidates the previous one
/// by generation comparison, never by cancelling the underlying call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRenderRequest {
    pub generation: RequestGeneration,
    pub content: String,
}

/// Snapshot of the last confirmed-successful render. Sole source of truth
/// for rollback when a later render fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastValidRender {
    pub entity: EntityId,
    pub content: String,
}

/// Serialize the caret's resolved position for the host UI.
pub fn cursor_info_to_json(info: &EditorCursorInfo) -> String {
    serde_json::to_string(info).unwrap_or_else(|_| "{}".to_string())
}

/// Serialize a score-side selection for the host UI.
pub fn selection_info_to_json(info: &ScoreSelectionInfo) -> String {
    serde_json::to_string(info).unwrap_or_else(|_| "{}".to_string())
}
