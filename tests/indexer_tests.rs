//! Indexer tests — scanning, lookup, and bounds-safety properties.

use pretty_assertions::assert_eq;
use scoresync::model::{CodeRange, SourcePosition};
use scoresync::{bar_span, beat_at_offset, index, locate};

/// Two voices with a metadata frontmatter header.
const TWO_VOICES: &str = "---\n\
title: Example\n\
---\n\
melody: |0.1.4 1.1.4| |2.1.4 3.1.4|\n\
bass: |4.1.2 5.1.2|\n";

/// A single voice with three bars of varying beat counts.
const ONE_VOICE: &str = "|a bb| |ccc d| |e|";

#[test]
fn index_is_idempotent() {
    assert_eq!(index(TWO_VOICES), index(TWO_VOICES));
    assert_eq!(index(ONE_VOICE), index(ONE_VOICE));
}

#[test]
fn index_is_total_on_malformed_input() {
    assert!(index("").is_empty(), "Empty source should index to nothing");
    assert!(
        index("||| |x").is_empty(),
        "Beats outside any open bar should not be indexed"
    );
    // Dangling open bar, stray delimiters, no voice declaration: the scan
    // still returns a list.
    let beats = index("|a b\n:::|weird||");
    assert!(
        beats.iter().all(|bp| bp.range.from <= bp.range.to),
        "Every recorded range should be well-formed"
    );
}

#[test]
fn index_output_is_ordered_by_offset() {
    let beats = index(TWO_VOICES);
    for pair in beats.windows(2) {
        assert!(
            pair[0].range.from < pair[1].range.from,
            "Beat list should be strictly ordered by range.from"
        );
    }
}

#[test]
fn adjacent_bar_blocks_form_two_groups() {
    let beats = index("... |0.1.4 1.1.4| |2.1.4 3.1.4|");
    let bars: Vec<usize> = beats.iter().map(|bp| bp.bar_index).collect();
    assert_eq!(bars, vec![0, 0, 1, 1], "Two bar groups of two beats each");
    let beats_in_bar: Vec<usize> = beats.iter().map(|bp| bp.beat_index).collect();
    assert_eq!(beats_in_bar, vec![0, 1, 0, 1]);
}

#[test]
fn frontmatter_is_skipped() {
    let beats = index(TWO_VOICES);
    assert_eq!(beats.len(), 6);
    // Nothing indexed before the closing fence (offset 23 starts line 3).
    assert!(
        beats.iter().all(|bp| bp.range.from >= 23),
        "No beat should be recorded inside the metadata header"
    );

    // Bar-like text inside the header is not indexed either.
    let sneaky = index("---\nmeta: |9.9.9|\n---\n|a|");
    assert_eq!(sneaky.len(), 1, "Only the beat after the header counts");
}

#[test]
fn bar_numbering_resets_per_voice() {
    let beats = index(TWO_VOICES);
    let bars: Vec<usize> = beats.iter().map(|bp| bp.bar_index).collect();
    assert_eq!(
        bars,
        vec![0, 0, 1, 1, 0, 0],
        "The bass voice should restart bar numbering at 0"
    );
}

#[test]
fn locate_round_trips_within_one_voice() {
    let beats = index(ONE_VOICE);
    assert_eq!(beats.len(), 5);
    for bp in &beats {
        let found = locate(&beats, bp.bar_index, bp.beat_index)
            .expect("Every indexed beat should be locatable");
        assert_eq!(found.range, bp.range, "Round trip should preserve the range");
    }
}

#[test]
fn locate_falls_back_to_first_beat_of_bar() {
    let beats = index(ONE_VOICE);
    let found = locate(&beats, 1, 7).expect("Bar 1 exists");
    assert_eq!((found.bar_index, found.beat_index), (1, 0));
    assert!(locate(&beats, 9, 0).is_none(), "Absent bars resolve to None");
}

#[test]
fn locate_prefers_the_first_voice() {
    let beats = index(TWO_VOICES);
    // Both voices have a bar 0; the melody (first in document order) wins.
    let found = locate(&beats, 0, 0).expect("Bar 0 exists");
    assert_eq!(found.range.from, 32, "Should resolve inside the melody voice");
}

#[test]
fn bar_span_covers_first_to_last_beat() {
    let beats = index(ONE_VOICE);
    let (first, last) = bar_span(&beats, 1).expect("Bar 1 exists");
    assert_eq!(first.range.from, 8, "Span starts at 'ccc'");
    assert_eq!(last.range.to, 13, "Span ends after 'd'");
    assert!(bar_span(&beats, 3).is_none());
}

#[test]
fn beat_at_offset_is_inclusive_of_the_token_end() {
    let beats = index(ONE_VOICE);
    let inside = beat_at_offset(&beats, 9).expect("Offset 9 is inside 'ccc'");
    assert_eq!((inside.bar_index, inside.beat_index), (1, 0));
    let at_end = beat_at_offset(&beats, 11).expect("Offset 11 sits just after 'ccc'");
    assert_eq!((at_end.bar_index, at_end.beat_index), (1, 0));
    assert!(beat_at_offset(&beats, 14).is_none(), "Between bars is a miss");
    assert!(beat_at_offset(&beats, 6).is_none(), "Between bars is a miss");
}

#[test]
fn offsets_count_utf16_code_units() {
    // The treble clef glyph is a surrogate pair: two UTF-16 units.
    let beats = index("\u{1F3B5} |a|");
    assert_eq!(beats.len(), 1);
    assert_eq!(beats[0].range.from, 4);
    assert_eq!(beats[0].range.to, 5);
    assert_eq!(beats[0].range.start_column, 4);
}

#[test]
fn stale_ranges_clamp_without_panicking() {
    let beats = index(ONE_VOICE);
    let last = beats.last().expect("ONE_VOICE has beats");

    // The document shrank under the range.
    let clamped = last.range.clamp_to(10);
    assert!(clamped.from <= clamped.to);
    assert_eq!((clamped.from, clamped.to), (10, 10));

    let emptied = last.range.clamp_to(0);
    assert_eq!((emptied.from, emptied.to), (0, 0));

    // Even a degenerate backwards range comes out well-formed.
    let backwards = CodeRange::new(
        SourcePosition { line: 0, column: 30, offset: 30 },
        SourcePosition { line: 0, column: 10, offset: 10 },
    );
    let fixed = backwards.clamp_to(50);
    assert!(fixed.from <= fixed.to);
}
