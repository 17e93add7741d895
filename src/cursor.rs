//! Cursor tracker: resolves the caret to its musical position.
//!
//! Editor change/selection events are cheap to record and coalesce; the
//! actual computation runs at most once per animation frame, against the
//! latest caret position only. The beat list is re-derived only when the
//! document itself changed.

use crate::indexer;
use crate::model::{BeatPosition, EditorCursorInfo};
use crate::surface::EditorView;

/// Outcome of one animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameResult {
    /// Nothing to do: no coalesced events, or the bar index is unchanged
    /// from the last emission.
    Idle,
    /// The caret's resolved position changed bars. `None` means the caret
    /// sits outside any recognized beat (e.g. in the metadata header).
    Emitted(Option<EditorCursorInfo>),
}

pub struct CursorTracker {
    beats: Vec<BeatPosition>,
    /// Whether `beats` matches the current document
    indexed: bool,
    /// A document change was observed since the last frame
    pending_change: bool,
    /// Any event was observed since the last frame
    pending_event: bool,
    /// Bar index of the last emission (`Some(None)` = emitted "outside")
    last_emitted_bar: Option<Option<usize>>,
}

impl CursorTracker {
    pub fn new() -> Self {
        Self {
            beats: Vec::new(),
            indexed: false,
            pending_change: false,
            pending_event: false,
            last_emitted_bar: None,
        }
    }

    /// Record an editor change/selection event. Multiple events within a
    /// frame coalesce; only the caret position at frame time matters.
    pub fn on_event(&mut self, changed: bool, selection_changed: bool) {
        if changed {
            self.pending_change = true;
            self.indexed = false;
        }
        if changed || selection_changed {
            self.pending_event = true;
        }
    }

    /// Run the per-frame computation against the latest editor state.
    pub fn on_frame(&mut self, editor: &impl EditorView) -> FrameResult {
        if !self.pending_event {
            return FrameResult::Idle;
        }
        let from_doc_change = self.pending_change;
        self.pending_event = false;
        self.pending_change = false;

        self.beats_for(editor);

        let info = indexer::beat_at_offset(&self.beats, editor.caret_offset()).map(|bp| {
            EditorCursorInfo {
                bar_index: bp.bar_index,
                beat_index: bp.beat_index,
                from_doc_change,
            }
        });

        // Beat-only movement within a bar is not re-emitted.
        let bar = info.map(|i| i.bar_index);
        if self.last_emitted_bar == Some(bar) {
            return FrameResult::Idle;
        }
        self.last_emitted_bar = Some(bar);
        FrameResult::Emitted(info)
    }

    /// The beat list backing the last computation. Re-derived lazily on
    /// the first frame after a document change.
    pub fn beats(&self) -> &[BeatPosition] {
        &self.beats
    }

    /// The beat list for the current document, re-indexing first if a
    /// document change invalidated the cached one.
    pub fn beats_for(&mut self, editor: &impl EditorView) -> &[BeatPosition] {
        if !self.indexed {
            self.beats = indexer::index(editor.document());
            self.indexed = true;
        }
        &self.beats
    }
}

impl Default for CursorTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Decoration;

    struct FakeEditor {
        text: String,
        caret: usize,
    }

    impl EditorView for FakeEditor {
        fn document(&self) -> &str {
            &self.text
        }
        fn caret_offset(&self) -> usize {
            self.caret
        }
        fn set_decorations(&mut self, _decorations: &[Decoration]) {}
        fn scroll_to_offset(&mut self, _offset: usize, _target_fraction: f64) {}
        fn offset_viewport_fraction(&self, _offset: usize) -> Option<f64> {
            Some(0.5)
        }
    }

    fn editor(text: &str, caret: usize) -> FakeEditor {
        FakeEditor {
            text: text.to_string(),
            caret,
        }
    }

    #[test]
    fn no_events_means_idle() {
        let mut tracker = CursorTracker::new();
        let ed = editor("|a b| |c d|", 1);
        assert_eq!(tracker.on_frame(&ed), FrameResult::Idle);
    }

    #[test]
    fn events_coalesce_to_one_emission_per_frame() {
        let mut tracker = CursorTracker::new();
        let ed = editor("|a b| |c d|", 1);

        tracker.on_event(false, true);
        tracker.on_event(false, true);
        tracker.on_event(false, true);

        match tracker.on_frame(&ed) {
            FrameResult::Emitted(Some(info)) => {
                assert_eq!(info.bar_index, 0);
                assert_eq!(info.beat_index, 0);
                assert!(!info.from_doc_change);
            }
            other => panic!("Expected emission, got {other:?}"),
        }
        // The frame consumed every coalesced event.
        assert_eq!(tracker.on_frame(&ed), FrameResult::Idle);
    }

    #[test]
    fn same_bar_movement_is_suppressed() {
        let mut tracker = CursorTracker::new();
        let mut ed = editor("|a b| |c d|", 1);

        tracker.on_event(false, true);
        assert!(matches!(tracker.on_frame(&ed), FrameResult::Emitted(Some(_))));

        // Move to the second beat of the same bar.
        ed.caret = 3;
        tracker.on_event(false, true);
        assert_eq!(tracker.on_frame(&ed), FrameResult::Idle);

        // Move into the second bar.
        ed.caret = 7;
        tracker.on_event(false, true);
        match tracker.on_frame(&ed) {
            FrameResult::Emitted(Some(info)) => assert_eq!(info.bar_index, 1),
            other => panic!("Expected bar 1 emission, got {other:?}"),
        }
    }

    #[test]
    fn doc_change_flag_survives_coalescing() {
        let mut tracker = CursorTracker::new();
        let ed = editor("|a b|", 1);

        tracker.on_event(true, false);
        tracker.on_event(false, true);

        match tracker.on_frame(&ed) {
            FrameResult::Emitted(Some(info)) => assert!(info.from_doc_change),
            other => panic!("Expected emission, got {other:?}"),
        }
    }

    #[test]
    fn caret_outside_beats_emits_null_once() {
        let mut tracker = CursorTracker::new();
        let mut ed = editor("title here\n|a b|", 2);

        tracker.on_event(false, true);
        assert_eq!(tracker.on_frame(&ed), FrameResult::Emitted(None));

        // Still outside: suppressed.
        ed.caret = 4;
        tracker.on_event(false, true);
        assert_eq!(tracker.on_frame(&ed), FrameResult::Idle);
    }
}
