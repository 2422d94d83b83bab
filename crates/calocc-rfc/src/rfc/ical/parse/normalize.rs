//! Feed text normalization ahead of decoding.
//!
//! Event blocks that carry an RRULE are moved in front of the ones that do
//! not, so a master event is always decoded before any `RECURRENCE-ID` block
//! that refers to it. Everything outside the event-block region is kept
//! byte for byte.

use std::borrow::Cow;
use std::ops::Range;

const BEGIN_EVENT: &str = "BEGIN:VEVENT";
const END_EVENT: &str = "END:VEVENT";

#[derive(Debug)]
struct EventBlock {
    span: Range<usize>,
    recurring: bool,
}

/// ## Summary
/// Reorders `VEVENT` blocks so recurring ones come first.
///
/// Relative order inside each group is kept. Content found between blocks is
/// moved after the reordered region. Text with no event blocks, or with
/// unbalanced `BEGIN:VEVENT`/`END:VEVENT` lines, is returned unchanged.
#[must_use]
pub fn normalize_feed(text: &str) -> Cow<'_, str> {
    let Some(blocks) = scan_event_blocks(text) else {
        tracing::debug!("Unbalanced VEVENT delimiters, leaving feed text untouched");
        return Cow::Borrowed(text);
    };
    let (Some(first), Some(last)) = (blocks.first(), blocks.last()) else {
        return Cow::Borrowed(text);
    };
    let region = first.span.start..last.span.end;
    let line_ending = if text.contains("\r\n") { "\r\n" } else { "\n" };

    let mut pieces: Vec<&str> = Vec::with_capacity(blocks.len() * 2);
    pieces.extend(
        blocks
            .iter()
            .filter(|block| block.recurring)
            .map(|block| &text[block.span.clone()]),
    );
    pieces.extend(
        blocks
            .iter()
            .filter(|block| !block.recurring)
            .map(|block| &text[block.span.clone()]),
    );
    pieces.extend(
        blocks
            .windows(2)
            .map(|pair| &text[pair[0].span.end..pair[1].span.start])
            .filter(|between| !between.is_empty()),
    );

    let mut out = String::with_capacity(text.len() + line_ending.len());
    out.push_str(&text[..region.start]);
    for piece in pieces {
        out.push_str(piece);
        if !piece.ends_with('\n') {
            out.push_str(line_ending);
        }
    }
    let suffix = &text[region.end..];
    if suffix.is_empty() && !text.ends_with('\n') {
        // The last piece was given a line ending it did not have in the input.
        let trimmed = out.trim_end_matches(['\r', '\n']).len();
        out.truncate(trimmed);
    }
    out.push_str(suffix);

    if out == text {
        Cow::Borrowed(text)
    } else {
        tracing::trace!(blocks = blocks.len(), "Reordered event blocks");
        Cow::Owned(out)
    }
}

/// Finds every top-level `VEVENT` block. `None` means the delimiters do not
/// pair up.
fn scan_event_blocks(text: &str) -> Option<Vec<EventBlock>> {
    let mut blocks = Vec::new();
    let mut open: Option<(usize, bool)> = None;
    let mut offset = 0;

    for raw_line in text.split_inclusive('\n') {
        let line_start = offset;
        offset += raw_line.len();
        let line = raw_line.trim_end_matches(['\r', '\n']).trim_end();

        match line {
            l if l.eq_ignore_ascii_case(BEGIN_EVENT) => {
                if open.is_some() {
                    return None;
                }
                open = Some((line_start, false));
            }
            l if l.eq_ignore_ascii_case(END_EVENT) => {
                let (start, recurring) = open.take()?;
                blocks.push(EventBlock {
                    span: start..offset,
                    recurring,
                });
            }
            l if is_rrule_line(l) => {
                if let Some((_, recurring)) = open.as_mut() {
                    *recurring = true;
                }
            }
            _ => {}
        }
    }

    if open.is_some() {
        return None;
    }
    Some(blocks)
}

fn is_rrule_line(line: &str) -> bool {
    line.get(..5)
        .is_some_and(|name| name.eq_ignore_ascii_case("RRULE"))
        && matches!(line.as_bytes().get(5), Some(b':' | b';'))
}
