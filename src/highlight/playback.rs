//! Playback highlighter: a state machine with two mutually exclusive
//! visual modes.
//!
//! While playing, exactly the sounding beat is highlighted; while paused,
//! the entire bar holding the parked player cursor is. Switching modes
//! always replaces the single decoration slot, so a leftover highlight
//! from the previous mode cannot survive the transition.

use super::ScrollBand;
use crate::indexer;
use crate::model::{BeatPosition, CodeRange, PlaybackBeatInfo, PlayerCursorPosition};
use crate::surface::{Decoration, DecorationStyle, EditorView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackMode {
    Stopped,
    Playing,
    Paused,
}

pub struct PlaybackHighlighter {
    band: ScrollBand,
    mode: PlaybackMode,
    /// Live position; cleared on pause and stop
    playing_beat: Option<PlaybackBeatInfo>,
    /// Last played position; survives pause, cleared on stop
    player_cursor: Option<PlayerCursorPosition>,
    /// The single decoration slot both modes share
    decoration: Option<Decoration>,
}

impl PlaybackHighlighter {
    pub fn new(band: ScrollBand) -> Self {
        Self {
            band,
            mode: PlaybackMode::Stopped,
            playing_beat: None,
            player_cursor: None,
            decoration: None,
        }
    }

    /// Handle a playback tick: highlight exactly the sounding beat.
    /// Returns whether the decoration layer changed.
    pub fn on_tick(
        &mut self,
        beat: PlaybackBeatInfo,
        beats: &[BeatPosition],
        editor: &mut impl EditorView,
    ) -> bool {
        self.mode = PlaybackMode::Playing;
        self.playing_beat = Some(beat);
        self.player_cursor = Some(beat.into());

        let range = indexer::locate(beats, beat.bar_index, beat.beat_index)
            .map(|bp| bp.range.clamp_to(editor.document_length()));
        let next = range.map(|r| Decoration {
            from: r.from,
            to: r.to,
            style: DecorationStyle::PlayingBeat,
        });
        let changed = next != self.decoration;
        self.decoration = next;

        if let Some(r) = range {
            if self.band.needs_scroll(editor.offset_viewport_fraction(r.from)) {
                editor.scroll_to_offset(r.from, super::SCROLL_TARGET_FRACTION);
            }
        }
        changed
    }

    /// Handle pause: highlight the whole bar holding the parked player
    /// cursor. Returns whether the decoration layer changed.
    pub fn on_pause(&mut self, beats: &[BeatPosition], editor: &impl EditorView) -> bool {
        self.mode = PlaybackMode::Paused;
        self.playing_beat = None;

        let next = self.player_cursor.and_then(|pc| {
            let (first, last) = indexer::bar_span(beats, pc.bar_index)?;
            let range = CodeRange::covering(&first.range, &last.range)
                .clamp_to(editor.document_length());
            Some(Decoration {
                from: range.from,
                to: range.to,
                style: DecorationStyle::ParkedBar,
            })
        });
        let changed = next != self.decoration;
        self.decoration = next;
        changed
    }

    /// Handle stop: clear both the live position and the parked cursor.
    /// Returns whether the decoration layer changed.
    pub fn on_stop(&mut self) -> bool {
        self.mode = PlaybackMode::Stopped;
        self.playing_beat = None;
        self.player_cursor = None;
        let changed = self.decoration.is_some();
        self.decoration = None;
        changed
    }

    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    pub fn playing_beat(&self) -> Option<PlaybackBeatInfo> {
        self.playing_beat
    }

    pub fn player_cursor(&self) -> Option<PlayerCursorPosition> {
        self.player_cursor
    }

    /// Current playback decoration, if either mode has one to show.
    pub fn decoration(&self) -> Option<Decoration> {
        self.decoration
    }
}
