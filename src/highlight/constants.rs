//! Shared constants for highlight behavior.

// ── Re-entrancy guards ──────────────────────────────────────────────
/// How long a guard stays engaged before it self-clears (ms). Bounds the
/// lock-out window when no reciprocal event ever arrives.
pub(crate) const GUARD_DURATION_MS: f64 = 200.0;

// ── Comfortable bands (fractions of viewport height) ────────────────
/// Cursor-driven highlights scroll only when the target sits outside
/// this band.
pub(crate) const CURSOR_BAND_TOP: f64 = 0.15;
pub(crate) const CURSOR_BAND_BOTTOM: f64 = 0.70;

/// Playback uses a wider band so auto-scroll does not fight manual
/// scrolling during playback.
pub(crate) const PLAYBACK_BAND_TOP: f64 = 0.20;
pub(crate) const PLAYBACK_BAND_BOTTOM: f64 = 0.80;

// ── Scroll placement ────────────────────────────────────────────────
/// Where a scrolled-to target lands in the viewport (upper third).
pub(crate) const SCROLL_TARGET_FRACTION: f64 = 1.0 / 3.0;
