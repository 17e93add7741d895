//! Editor-to-score highlighter: follows the caret's musical position into
//! the rendered score.

use log::debug;

use super::{ScrollBand, SyncGuards};
use crate::indexer;
use crate::model::{BeatPosition, EditorCursorInfo};
use crate::surface::ScoreView;

pub struct EditorToScoreHighlighter {
    band: ScrollBand,
}

impl EditorToScoreHighlighter {
    pub fn new(band: ScrollBand) -> Self {
        Self { band }
    }

    /// Handle one cursor emission.
    ///
    /// Skips (consuming the score-origin guard) when the emission was
    /// triggered by the score side; otherwise highlights the caret's whole
    /// bar in the score and, for click/arrow-key movement only, scrolls
    /// the bar into the comfortable band.
    pub fn on_cursor(
        &self,
        info: Option<EditorCursorInfo>,
        beats: &[BeatPosition],
        score: &mut impl ScoreView,
        guards: &mut SyncGuards,
        now_ms: f64,
    ) {
        if guards.take_score_origin(now_ms) {
            debug!("editor->score highlight skipped: score-originated cursor move");
            return;
        }

        let Some(info) = info else {
            // Caret left the recognized beats: no highlight.
            score.clear_highlight();
            return;
        };

        let Some((first, last)) = indexer::bar_span(beats, info.bar_index) else {
            return;
        };
        let (Some(from), Some(to)) = (
            score.entity_at(first.bar_index, first.beat_index),
            score.entity_at(last.bar_index, last.beat_index),
        ) else {
            debug!("editor->score highlight skipped: bar {} not in current render", info.bar_index);
            return;
        };

        score.highlight_range(from, to);
        guards.engage_editor_origin(now_ms);

        // Typing must not move the score view; only deliberate cursor
        // movement scrolls, and only when the bar left the visible band.
        if !info.from_doc_change && self.band.needs_scroll(score.entity_viewport_fraction(from)) {
            score.scroll_to_entity(from);
        }
    }
}
