//! Engine facade: one host-facing object wiring the cursor tracker, the
//! highlighter trio, and the render coordinator together.
//!
//! The engine owns no ambient state: the editor and score handles are
//! passed into each entry point, and everything observable is exposed
//! through narrow getters. Editor decorations are composed from the
//! individual highlighter layers and redrawn wholesale on every visual
//! update.

use serde::{Deserialize, Serialize};

use crate::coordinator::{RenderCoordinator, RenderUpdate, RENDER_TIMEOUT_MS};
use crate::cursor::{CursorTracker, FrameResult};
use crate::error::SyncError;
use crate::highlight::{
    EditorToScoreHighlighter, PlaybackHighlighter, ScoreToEditorHighlighter, ScrollBand,
    SyncGuards, GUARD_DURATION_MS,
};
use crate::model::{
    EditorCursorInfo, EntityId, LastValidRender, PlaybackBeatInfo, PlayerCursorPosition,
    RequestGeneration, ScoreSelectionInfo,
};
use crate::surface::{Decoration, EditorView, ScoreView};

/// Tunable behavior of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Self-clear deadline of the re-entrancy guards (ms)
    pub guard_duration_ms: f64,
    /// Render request deadline before the advisory warning fires (ms)
    pub render_timeout_ms: f64,
    /// Comfortable band for cursor-driven auto-scroll
    pub cursor_band: ScrollBand,
    /// Comfortable band for playback-driven auto-scroll
    pub playback_band: ScrollBand,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            guard_duration_ms: GUARD_DURATION_MS,
            render_timeout_ms: RENDER_TIMEOUT_MS,
            cursor_band: ScrollBand::CURSOR,
            playback_band: ScrollBand::PLAYBACK,
        }
    }
}

pub struct SyncEngine {
    tracker: CursorTracker,
    editor_to_score: EditorToScoreHighlighter,
    score_to_editor: ScoreToEditorHighlighter,
    playback: PlaybackHighlighter,
    coordinator: RenderCoordinator,
    guards: SyncGuards,
    /// Last emitted caret position (observable)
    cursor_info: Option<EditorCursorInfo>,
    /// Last surfaced render error (observable)
    last_error: Option<SyncError>,
}

impl SyncEngine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            tracker: CursorTracker::new(),
            editor_to_score: EditorToScoreHighlighter::new(config.cursor_band),
            score_to_editor: ScoreToEditorHighlighter::new(config.cursor_band),
            playback: PlaybackHighlighter::new(config.playback_band),
            coordinator: RenderCoordinator::with_timeout(config.render_timeout_ms),
            guards: SyncGuards::new(config.guard_duration_ms),
            cursor_info: None,
            last_error: None,
        }
    }

    // ── Editor side ─────────────────────────────────────────────────

    /// Record an editor change/selection event (cheap; coalesced).
    pub fn on_editor_event(&mut self, changed: bool, selection_changed: bool) {
        self.tracker.on_event(changed, selection_changed);
    }

    /// Run the per-frame cursor computation and drive the score highlight
    /// when the caret changed bars.
    pub fn on_frame(
        &mut self,
        editor: &impl EditorView,
        score: &mut impl ScoreView,
        now_ms: f64,
    ) {
        if let FrameResult::Emitted(info) = self.tracker.on_frame(editor) {
            self.cursor_info = info;
            self.editor_to_score
                .on_cursor(info, self.tracker.beats(), score, &mut self.guards, now_ms);
        }
    }

    // ── Score side ──────────────────────────────────────────────────

    /// Handle a score-side selection or click.
    pub fn on_score_selection(
        &mut self,
        selection: ScoreSelectionInfo,
        editor: &mut impl EditorView,
        now_ms: f64,
    ) {
        let beats = self.tracker.beats_for(&*editor);
        let changed =
            self.score_to_editor
                .on_selection(selection, beats, editor, &mut self.guards, now_ms);
        if changed {
            self.redraw(editor);
        }
    }

    // ── Playback ────────────────────────────────────────────────────

    pub fn on_playback_tick(&mut self, beat: PlaybackBeatInfo, editor: &mut impl EditorView) {
        let beats = self.tracker.beats_for(&*editor);
        if self.playback.on_tick(beat, beats, editor) {
            self.redraw(editor);
        }
    }

    pub fn on_playback_pause(&mut self, editor: &mut impl EditorView) {
        let beats = self.tracker.beats_for(&*editor);
        if self.playback.on_pause(beats, &*editor) {
            self.redraw(editor);
        }
    }

    pub fn on_playback_stop(&mut self, editor: &mut impl EditorView) {
        if self.playback.on_stop() {
            self.redraw(editor);
        }
    }

    // ── Rendering ───────────────────────────────────────────────────

    /// Issue a re-render of `content`, superseding any outstanding one.
    pub fn request_render(
        &mut self,
        content: &str,
        now_ms: f64,
        score: &mut impl ScoreView,
    ) -> RequestGeneration {
        self.coordinator.request_render(content, now_ms, score)
    }

    /// Deliver a successful renderer outcome.
    pub fn on_render_success(
        &mut self,
        generation: RequestGeneration,
        content: &str,
        entity: EntityId,
    ) -> RenderUpdate {
        let update = self.coordinator.on_render_success(generation, content, entity);
        if matches!(update, RenderUpdate::Applied { .. }) {
            self.last_error = None;
        }
        update
    }

    /// Deliver a renderer error.
    pub fn on_render_error(
        &mut self,
        generation: RequestGeneration,
        message: &str,
        score: &mut impl ScoreView,
    ) -> RenderUpdate {
        let update = self.coordinator.on_render_error(generation, message, score);
        if let RenderUpdate::Failed { error, .. } = &update {
            self.last_error = Some(error.clone());
        }
        update
    }

    /// Advance the engine clock: checks the render deadline.
    pub fn on_tick(&mut self, now_ms: f64) -> Option<SyncError> {
        let advisory = self.coordinator.on_tick(now_ms);
        if let Some(error) = &advisory {
            self.last_error = Some(error.clone());
        }
        advisory
    }

    // ── Observables ─────────────────────────────────────────────────

    pub fn cursor_info(&self) -> Option<EditorCursorInfo> {
        self.cursor_info
    }

    pub fn playback_beat(&self) -> Option<PlaybackBeatInfo> {
        self.playback.playing_beat()
    }

    pub fn player_cursor(&self) -> Option<PlayerCursorPosition> {
        self.playback.player_cursor()
    }

    pub fn last_render_error(&self) -> Option<&SyncError> {
        self.last_error.as_ref()
    }

    pub fn last_valid_render(&self) -> Option<&LastValidRender> {
        self.coordinator.last_valid()
    }

    fn redraw(&self, editor: &mut impl EditorView) {
        let mut decorations: Vec<Decoration> = self.score_to_editor.decorations().to_vec();
        decorations.extend(self.playback.decoration());
        editor.set_decorations(&decorations);
    }
}

impl Default for SyncEngine {
    fn default() -> Self {
        Self::new()
    }
}
