//! Render request coordinator: owns the single-flight contract with the
//! score renderer.
//!
//! Exactly one render request may be outstanding per document. A newer
//! request supersedes the previous one purely by generation comparison at
//! response time; the underlying asynchronous call is never cancelled.
//! The coordinator is the only component allowed to replace the rendered
//! content wholesale, and the last confirmed-good render is kept so a
//! failed parse never blanks the visible score.

use log::{debug, warn};

use crate::error::SyncError;
use crate::model::{EntityId, LastValidRender, PendingRenderRequest, RequestGeneration};
use crate::surface::ScoreView;

/// Default deadline for a render request (ms).
pub(crate) const RENDER_TIMEOUT_MS: f64 = 3000.0;

/// Outcome of feeding a renderer response into the coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderUpdate {
    /// The pending render succeeded and `entity` is now the visible score.
    Applied {
        generation: RequestGeneration,
        entity: EntityId,
    },
    /// The response belonged to a superseded request and was dropped.
    Stale,
    /// The pending render failed. `rolled_back` reports whether the last
    /// valid snapshot was re-submitted to keep the score visible.
    Failed {
        error: SyncError,
        rolled_back: bool,
    },
}

pub struct RenderCoordinator {
    timeout_ms: f64,
    /// Last generation handed out, pending or not
    generation: RequestGeneration,
    pending: Option<PendingRenderRequest>,
    deadline_ms: Option<f64>,
    /// Whether the advisory timeout already fired for the pending request
    warned: bool,
    last_valid: Option<LastValidRender>,
}

impl RenderCoordinator {
    pub fn new() -> Self {
        Self::with_timeout(RENDER_TIMEOUT_MS)
    }

    pub fn with_timeout(timeout_ms: f64) -> Self {
        Self {
            timeout_ms,
            generation: RequestGeneration(0),
            pending: None,
            deadline_ms: None,
            warned: false,
            last_valid: None,
        }
    }

    /// Issue a re-render of `content`, superseding any outstanding request.
    pub fn request_render(
        &mut self,
        content: &str,
        now_ms: f64,
        score: &mut impl ScoreView,
    ) -> RequestGeneration {
        if let Some(prev) = &self.pending {
            debug!("render {:?} superseded before completion", prev.generation);
        }

        self.generation = self.generation.next();
        let generation = self.generation;
        self.pending = Some(PendingRenderRequest {
            generation,
            content: content.to_string(),
        });
        self.deadline_ms = Some(now_ms + self.timeout_ms);
        self.warned = false;

        score.request_render(generation, content);
        generation
    }

    /// Handle a successful renderer response.
    ///
    /// The result is applied only when it answers the currently pending
    /// request: the generation must match and the reported content must
    /// equal what was submitted (a successful render of the wrong
    /// generation's content must not be promoted).
    pub fn on_render_success(
        &mut self,
        generation: RequestGeneration,
        content: &str,
        entity: EntityId,
    ) -> RenderUpdate {
        let Some(pending) = &self.pending else {
            debug!("render {:?} resolved with no request pending; dropped", generation);
            return RenderUpdate::Stale;
        };
        if pending.generation != generation {
            debug!(
                "render {:?} resolved after being superseded by {:?}; dropped",
                generation, pending.generation
            );
            return RenderUpdate::Stale;
        }
        if pending.content != content {
            warn!("render {:?} reported content that was never requested; dropped", generation);
            self.clear_pending();
            return RenderUpdate::Stale;
        }

        self.last_valid = Some(LastValidRender {
            entity,
            content: content.to_string(),
        });
        self.clear_pending();
        RenderUpdate::Applied { generation, entity }
    }

    /// Handle a renderer error.
    ///
    /// Surfaces the error and, when a last valid render exists, commands a
    /// re-render of that snapshot (not the failed content) so the visible
    /// score never goes blank. The rollback render runs under a fresh
    /// generation that is deliberately not tracked as pending: its own
    /// completion is dropped as stale, and the kept snapshot stays
    /// authoritative.
    pub fn on_render_error(
        &mut self,
        generation: RequestGeneration,
        message: &str,
        score: &mut impl ScoreView,
    ) -> RenderUpdate {
        let stale = match &self.pending {
            None => true,
            Some(pending) => pending.generation != generation,
        };
        if stale {
            debug!("render error for superseded {:?}; dropped", generation);
            return RenderUpdate::Stale;
        }
        self.clear_pending();

        let rolled_back = if let Some(last) = &self.last_valid {
            self.generation = self.generation.next();
            warn!("render {:?} failed; rolling back to last valid render", generation);
            score.request_render(self.generation, &last.content);
            true
        } else {
            false
        };

        RenderUpdate::Failed {
            error: SyncError::ParseFailure {
                generation,
                message: message.to_string(),
            },
            rolled_back,
        }
    }

    /// Check the render deadline. Fires the advisory warning at most once
    /// per request; the pending request stays alive because the renderer
    /// may still resolve it.
    pub fn on_tick(&mut self, now_ms: f64) -> Option<SyncError> {
        let pending = self.pending.as_ref()?;
        let deadline = self.deadline_ms?;
        if self.warned || now_ms < deadline {
            return None;
        }
        self.warned = true;
        warn!("render {:?} still unresolved after {} ms", pending.generation, self.timeout_ms);
        Some(SyncError::ParseTimeout {
            generation: pending.generation,
        })
    }

    pub fn pending(&self) -> Option<&PendingRenderRequest> {
        self.pending.as_ref()
    }

    pub fn last_valid(&self) -> Option<&LastValidRender> {
        self.last_valid.as_ref()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_none()
    }

    fn clear_pending(&mut self) {
        self.pending = None;
        self.deadline_ms = None;
        self.warned = false;
    }
}

impl Default for RenderCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
