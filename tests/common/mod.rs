//! Test doubles for the editor surface and the score renderer.
#![allow(dead_code)] // not every test binary exercises every double

use scoresync::{Decoration, EditorView, EntityId, RequestGeneration, ScoreView};

/// Editor double: records every decoration redraw and scroll request.
pub struct FakeEditor {
    pub text: String,
    pub caret: usize,
    pub decorations: Vec<Decoration>,
    /// Every wholesale redraw, in order (for mode-exclusivity checks)
    pub decoration_history: Vec<Vec<Decoration>>,
    pub scrolls: Vec<(usize, f64)>,
    /// Reported viewport position for any offset
    pub viewport_fraction: Option<f64>,
}

impl FakeEditor {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            caret: 0,
            decorations: Vec::new(),
            decoration_history: Vec::new(),
            scrolls: Vec::new(),
            viewport_fraction: Some(0.5),
        }
    }
}

impl EditorView for FakeEditor {
    fn document(&self) -> &str {
        &self.text
    }

    fn caret_offset(&self) -> usize {
        self.caret
    }

    fn set_decorations(&mut self, decorations: &[Decoration]) {
        self.decorations = decorations.to_vec();
        self.decoration_history.push(decorations.to_vec());
    }

    fn scroll_to_offset(&mut self, offset: usize, target_fraction: f64) {
        self.scrolls.push((offset, target_fraction));
    }

    fn offset_viewport_fraction(&self, _offset: usize) -> Option<f64> {
        self.viewport_fraction
    }
}

/// Renderer double: resolves every bar/beat coordinate to a synthetic
/// entity and records render requests, highlights, and scrolls.
pub struct FakeScore {
    pub requests: Vec<(RequestGeneration, String)>,
    pub highlights: Vec<(EntityId, EntityId)>,
    pub clear_count: usize,
    pub scrolled: Vec<EntityId>,
    /// Reported viewport position for any entity
    pub viewport_fraction: Option<f64>,
    /// When false, `entity_at` resolves nothing (bar not in the render)
    pub resolve_entities: bool,
}

impl FakeScore {
    pub fn new() -> Self {
        Self {
            requests: Vec::new(),
            highlights: Vec::new(),
            clear_count: 0,
            scrolled: Vec::new(),
            viewport_fraction: Some(0.5),
            resolve_entities: true,
        }
    }

    /// The synthetic entity minted for a bar/beat coordinate.
    pub fn entity(bar_index: usize, beat_index: usize) -> EntityId {
        EntityId((bar_index * 1000 + beat_index) as u64)
    }
}

impl ScoreView for FakeScore {
    fn request_render(&mut self, generation: RequestGeneration, content: &str) {
        self.requests.push((generation, content.to_string()));
    }

    fn highlight_range(&mut self, from: EntityId, to: EntityId) {
        self.highlights.push((from, to));
    }

    fn clear_highlight(&mut self) {
        self.clear_count += 1;
    }

    fn scroll_to_entity(&mut self, entity: EntityId) {
        self.scrolled.push(entity);
    }

    fn entity_at(&self, bar_index: usize, beat_index: usize) -> Option<EntityId> {
        if self.resolve_entities {
            Some(Self::entity(bar_index, beat_index))
        } else {
            None
        }
    }

    fn entity_viewport_fraction(&self, _entity: EntityId) -> Option<f64> {
        self.viewport_fraction
    }
}
