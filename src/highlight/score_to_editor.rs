//! Score-to-editor highlighter: mirrors score-side selections and clicks
//! back into the source text.

use log::debug;

use super::{ScrollBand, SyncGuards, SCROLL_TARGET_FRACTION};
use crate::indexer;
use crate::model::{BeatPosition, CodeRange, ScoreSelectionInfo};
use crate::surface::{Decoration, DecorationStyle, EditorView};

pub struct ScoreToEditorHighlighter {
    band: ScrollBand,
    decorations: Vec<Decoration>,
}

impl ScoreToEditorHighlighter {
    pub fn new(band: ScrollBand) -> Self {
        Self {
            band,
            decorations: Vec::new(),
        }
    }

    /// Handle a score-side selection or click.
    ///
    /// Translates the bar/beat selection to a source range, replaces the
    /// selection decoration layer, engages the score-origin guard so the
    /// editor-to-score highlighter does not bounce the event straight
    /// back, and scrolls the editor when the range sits outside the
    /// comfortable band. Returns whether the decoration layer changed.
    pub fn on_selection(
        &mut self,
        selection: ScoreSelectionInfo,
        beats: &[BeatPosition],
        editor: &mut impl EditorView,
        guards: &mut SyncGuards,
        now_ms: f64,
    ) -> bool {
        if guards.take_editor_origin(now_ms) {
            debug!("score->editor highlight skipped: editor-originated score event");
            return false;
        }

        let start = indexer::locate(beats, selection.start_bar_index, selection.start_beat_index);
        let end = indexer::locate(beats, selection.end_bar_index, selection.end_beat_index);
        let (Some(start), Some(end)) = (start, end) else {
            // Mapping miss: the selection has no source counterpart.
            let had_any = !self.decorations.is_empty();
            self.decorations.clear();
            return had_any;
        };

        let range =
            CodeRange::covering(&start.range, &end.range).clamp_to(editor.document_length());

        self.decorations = vec![Decoration {
            from: range.from,
            to: range.to,
            style: DecorationStyle::Selection,
        }];
        guards.engage_score_origin(now_ms);

        if self.band.needs_scroll(editor.offset_viewport_fraction(range.from)) {
            editor.scroll_to_offset(range.from, SCROLL_TARGET_FRACTION);
        }
        true
    }

    /// Current selection decoration layer.
    pub fn decorations(&self) -> &[Decoration] {
        &self.decorations
    }

    pub fn clear(&mut self) -> bool {
        let had_any = !self.decorations.is_empty();
        self.decorations.clear();
        had_any
    }
}
