//! Highlighters: keep the editor, the rendered score, and the playback
//! position visually aligned.
//!
//! Three components share this module: the editor-to-score and
//! score-to-editor highlighter pair, and the playback highlighter. The
//! pair is kept symmetric by a pair of re-entrancy guards so a highlight
//! originating on one side can never immediately bounce back from the
//! other.

mod constants;
mod editor_to_score;
mod playback;
mod score_to_editor;

pub use editor_to_score::EditorToScoreHighlighter;
pub use playback::{PlaybackHighlighter, PlaybackMode};
pub use score_to_editor::ScoreToEditorHighlighter;

use constants::*;

pub(crate) use constants::{GUARD_DURATION_MS, SCROLL_TARGET_FRACTION};

use serde::{Deserialize, Serialize};

/// Re-entrancy guard as an explicit state machine.
///
/// Engaged guards expire on their own after a fixed deadline, so a missing
/// reciprocal event can never lock highlighting out permanently. The state
/// is checked (and consumed) on every event, which makes "why did this
/// highlight not fire" answerable from the state alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReentrancyGuard {
    Idle,
    GuardedUntil(f64),
}

impl ReentrancyGuard {
    pub fn engage(&mut self, now_ms: f64, duration_ms: f64) {
        *self = ReentrancyGuard::GuardedUntil(now_ms + duration_ms);
    }

    pub fn is_active(&self, now_ms: f64) -> bool {
        match self {
            ReentrancyGuard::Idle => false,
            ReentrancyGuard::GuardedUntil(deadline) => now_ms < *deadline,
        }
    }

    /// Check and consume: returns whether the guard was active. The guard
    /// returns to `Idle` either way (an expired deadline collapses too).
    pub fn take(&mut self, now_ms: f64) -> bool {
        let active = self.is_active(now_ms);
        *self = ReentrancyGuard::Idle;
        active
    }
}

/// The two directional guards, owned together so both highlighters see
/// the same state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyncGuards {
    duration_ms: f64,
    /// Engaged by the score-to-editor highlighter; checked by the
    /// editor-to-score highlighter.
    pub score_origin: ReentrancyGuard,
    /// Engaged by the editor-to-score highlighter; checked by the
    /// score-to-editor highlighter.
    pub editor_origin: ReentrancyGuard,
}

impl SyncGuards {
    pub fn new(duration_ms: f64) -> Self {
        Self {
            duration_ms,
            score_origin: ReentrancyGuard::Idle,
            editor_origin: ReentrancyGuard::Idle,
        }
    }

    pub fn engage_score_origin(&mut self, now_ms: f64) {
        self.score_origin.engage(now_ms, self.duration_ms);
    }

    pub fn take_score_origin(&mut self, now_ms: f64) -> bool {
        self.score_origin.take(now_ms)
    }

    pub fn engage_editor_origin(&mut self, now_ms: f64) {
        self.editor_origin.engage(now_ms, self.duration_ms);
    }

    pub fn take_editor_origin(&mut self, now_ms: f64) -> bool {
        self.editor_origin.take(now_ms)
    }
}

impl Default for SyncGuards {
    fn default() -> Self {
        Self::new(GUARD_DURATION_MS)
    }
}

/// A comfortable "already visible" band of the viewport. Targets inside
/// the band are not scrolled to; this is what keeps highlight-following
/// from jittering on every event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollBand {
    /// Upper edge as a fraction of viewport height
    pub top: f64,
    /// Lower edge as a fraction of viewport height
    pub bottom: f64,
}

impl ScrollBand {
    /// Band used for cursor-driven highlights.
    pub const CURSOR: ScrollBand = ScrollBand {
        top: CURSOR_BAND_TOP,
        bottom: CURSOR_BAND_BOTTOM,
    };

    /// Wider band used during playback.
    pub const PLAYBACK: ScrollBand = ScrollBand {
        top: PLAYBACK_BAND_TOP,
        bottom: PLAYBACK_BAND_BOTTOM,
    };

    pub fn contains(&self, fraction: f64) -> bool {
        self.top <= fraction && fraction <= self.bottom
    }

    /// Whether a target at `fraction` needs a scroll. Unknown or
    /// off-screen positions (`None`) always do.
    pub fn needs_scroll(&self, fraction: Option<f64>) -> bool {
        !matches!(fraction, Some(f) if self.contains(f))
    }
}
