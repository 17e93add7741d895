//! Position indexer: scans source text into an ordered beat-position list.
//!
//! The scan is deliberately shallow: it only recognizes the positional
//! facts the synchronization engine needs (bar delimiters, beat tokens,
//! voice declarations, the metadata frontmatter fence). It never requires
//! the text to be syntactically valid, always returns a (possibly empty)
//! list, and produces identical output for identical input.
//!
//! Recognized structure:
//! - a frontmatter block fenced by `---` lines at the top of the document
//!   is skipped entirely;
//! - a line whose leading token is `name:` declares a new voice; bar
//!   numbering resets to 0 when the scanner crosses one;
//! - `|` opens a bar when none is open and closes it otherwise; a newline
//!   closes any open bar (bars are line-local); each opening `|` consumes
//!   the next bar index;
//! - inside an open bar, every maximal run of non-whitespace, non-`|`
//!   characters is one beat, numbered from 0 within its bar.

use crate::model::{BeatPosition, CodeRange, SourcePosition};

/// Scan `source` and return every recognized beat, ordered by `range.from`.
///
/// Total and stable: never fails, even on malformed input, and re-indexing
/// identical text yields identical output.
pub fn index(source: &str) -> Vec<BeatPosition> {
    let mut beats: Vec<BeatPosition> = Vec::new();

    // Next bar index within the current structural unit.
    let mut bar_counter: usize = 0;
    let mut in_frontmatter = false;

    let mut line_idx: usize = 0;
    let mut line_start_offset: usize = 0;

    for raw_line in split_lines(source) {
        let content = raw_line
            .strip_suffix('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .unwrap_or(raw_line);

        if line_idx == 0 && content.trim() == "---" {
            in_frontmatter = true;
        } else if in_frontmatter {
            if content.trim() == "---" {
                in_frontmatter = false;
            }
        } else {
            scan_line(content, line_idx, line_start_offset, &mut bar_counter, &mut beats);
        }

        line_start_offset += utf16_len(raw_line);
        line_idx += 1;
    }

    beats
}

/// Look up the beat at `(bar_index, beat_index)`.
///
/// Bar numbering repeats per structural unit, so the lookup resolves
/// within the first unit (in document order) that contains the requested
/// bar. If the exact beat is absent, falls back to the first beat of that
/// bar; if the bar is entirely absent, returns `None`.
pub fn locate(beats: &[BeatPosition], bar_index: usize, beat_index: usize) -> Option<BeatPosition> {
    let run = bar_run(beats, bar_index)?;
    run.iter()
        .find(|bp| bp.beat_index == beat_index)
        .copied()
        .or(Some(run[0]))
}

/// First and last beat of a bar, resolved in the same first-unit-wins way
/// as [`locate`]. Both highlighters use this to turn a bar index into a
/// full beat extent.
pub fn bar_span(beats: &[BeatPosition], bar_index: usize) -> Option<(BeatPosition, BeatPosition)> {
    let run = bar_run(beats, bar_index)?;
    Some((run[0], run[run.len() - 1]))
}

/// The contiguous run of beats belonging to the first bar (in document
/// order) with the given index. Never empty when `Some`.
fn bar_run(beats: &[BeatPosition], bar_index: usize) -> Option<&[BeatPosition]> {
    let start = beats.iter().position(|bp| bp.bar_index == bar_index)?;
    let len = beats[start..]
        .iter()
        .take_while(|bp| bp.bar_index == bar_index)
        .count();
    Some(&beats[start..start + len])
}

/// Map a caret offset to the beat whose range contains it, if any.
pub fn beat_at_offset(beats: &[BeatPosition], offset: usize) -> Option<&BeatPosition> {
    beats.iter().find(|bp| bp.range.contains_offset(offset))
}

// ─── Scanning internals ─────────────────────────────────────────────

/// Scan one line's content (no terminator) for a voice declaration and
/// bar/beat structure.
fn scan_line(
    content: &str,
    line_idx: usize,
    line_start_offset: usize,
    bar_counter: &mut usize,
    beats: &mut Vec<BeatPosition>,
) {
    let mut column: usize = 0;
    let mut rest = content;

    if let Some(decl_len) = voice_decl_len(content) {
        *bar_counter = 0;
        column = utf16_len(&content[..decl_len]);
        rest = &content[decl_len..];
    }

    let mut in_bar = false;
    let mut current_bar: usize = 0;
    let mut beat_in_bar: usize = 0;
    let mut beat_start: Option<SourcePosition> = None;
    let mut beat_end: Option<SourcePosition> = None;

    for ch in rest.chars() {
        let here = SourcePosition {
            line: line_idx,
            column,
            offset: line_start_offset + column,
        };
        let width = ch.len_utf16();
        let after = SourcePosition {
            line: line_idx,
            column: column + width,
            offset: line_start_offset + column + width,
        };

        if in_bar && ch != '|' && !ch.is_whitespace() {
            if beat_start.is_none() {
                beat_start = Some(here);
            }
            beat_end = Some(after);
        } else {
            flush_beat(&mut beat_start, &mut beat_end, current_bar, &mut beat_in_bar, beats);
            if ch == '|' {
                if in_bar {
                    in_bar = false;
                } else {
                    in_bar = true;
                    current_bar = *bar_counter;
                    *bar_counter += 1;
                    beat_in_bar = 0;
                }
            }
        }

        column += width;
    }

    // Line end closes any open beat and any open bar.
    flush_beat(&mut beat_start, &mut beat_end, current_bar, &mut beat_in_bar, beats);
}

fn flush_beat(
    beat_start: &mut Option<SourcePosition>,
    beat_end: &mut Option<SourcePosition>,
    bar_index: usize,
    beat_in_bar: &mut usize,
    beats: &mut Vec<BeatPosition>,
) {
    if let (Some(start), Some(end)) = (beat_start.take(), beat_end.take()) {
        beats.push(BeatPosition {
            bar_index,
            beat_index: *beat_in_bar,
            range: CodeRange::new(start, end),
        });
        *beat_in_bar += 1;
    }
}

/// Byte length of a leading `name:` voice declaration, colon included.
///
/// The name starts with a letter or `_` and continues with letters,
/// digits, `_` or `-`; leading whitespace is allowed.
fn voice_decl_len(content: &str) -> Option<usize> {
    let trimmed = content.trim_start();
    let indent = content.len() - trimmed.len();

    let mut chars = trimmed.char_indices();
    let (_, first) = chars.next()?;
    if !(first.is_alphabetic() || first == '_') {
        return None;
    }

    for (i, ch) in chars {
        if ch == ':' {
            return Some(indent + i + 1);
        }
        if !(ch.is_alphanumeric() || ch == '_' || ch == '-') {
            return None;
        }
    }
    None
}

/// Iterate lines keeping their terminators, so offset bookkeeping stays
/// exact. An empty source yields no lines.
fn split_lines(source: &str) -> impl Iterator<Item = &str> {
    source.split_inclusive('\n')
}

fn utf16_len(s: &str) -> usize {
    s.chars().map(char::len_utf16).sum()
}
