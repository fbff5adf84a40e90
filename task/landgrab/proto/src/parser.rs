//! Field-keyed scanner for game-state records.
//!
//! A record looks like a flat JSON object, but only four keys matter and the
//! rest of the line is never validated. Each field is located by its quoted
//! key and read independently, so field order and unknown keys do not matter.
//! Missing or malformed values fall back to defaults instead of failing.

use crate::{GameState, Point, PointBuf, DEFAULT_BOARD_SIZE};

////////////////////////////////////////////////////////////////////////////////

pub const BOARD_SIZE_KEY: &str = "board_size";
pub const MY_POS_KEY: &str = "my_pos";
pub const COINS_KEY: &str = "coins";
pub const WALLS_KEY: &str = "walls";

////////////////////////////////////////////////////////////////////////////////

pub fn fill(state: &mut GameState, line: &str) {
    let bytes = line.as_bytes();

    state.board_size = find_value(bytes, BOARD_SIZE_KEY)
        .and_then(|value| parse_int(value, 0))
        .map(|(board_size, _)| board_size)
        .unwrap_or(DEFAULT_BOARD_SIZE);

    state.agent_position = find_value(bytes, MY_POS_KEY)
        .and_then(parse_single_point)
        .unwrap_or_default();

    state.items.clear();
    if let Some(value) = find_value(bytes, COINS_KEY) {
        scan_points(value, &mut state.items);
    }

    state.obstacles.clear();
    if let Some(value) = find_value(bytes, WALLS_KEY) {
        scan_points(value, &mut state.obstacles);
    }
}

/// Returns everything after the first `"key":` marker.
fn find_value<'a>(bytes: &'a [u8], key: &str) -> Option<&'a [u8]> {
    let key = key.as_bytes();
    let mut from = 0;

    while let Some(offset) = find(&bytes[from..], key) {
        let start = from + offset;
        let end = start + key.len();
        from = start + 1;

        if start == 0 || bytes[start - 1] != b'"' || bytes.get(end) != Some(&b'"') {
            continue;
        }

        let separator = skip_whitespace(bytes, end + 1);
        if bytes.get(separator) == Some(&b':') {
            return Some(&bytes[separator + 1..]);
        }
    }

    None
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn skip_whitespace(bytes: &[u8], mut pos: usize) -> usize {
    while bytes.get(pos).is_some_and(u8::is_ascii_whitespace) {
        pos += 1;
    }
    pos
}

/// Reads a leading integer, returning it with the position right after it.
fn parse_int(bytes: &[u8], pos: usize) -> Option<(i32, usize)> {
    let mut pos = skip_whitespace(bytes, pos);

    let negative = match bytes.get(pos) {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };

    let digits_start = pos;
    let mut value: i64 = 0;
    while let Some(digit @ b'0'..=b'9') = bytes.get(pos).copied() {
        value = value * 10 + i64::from(digit - b'0');
        if value > i64::from(i32::MAX) + 1 {
            return None;
        }
        pos += 1;
    }

    if pos == digits_start {
        return None;
    }

    let value = if negative { -value } else { value };
    i32::try_from(value).ok().map(|value| (value, pos))
}

/// Parses `[<int>, <int>]` starting at the opening bracket at `open`.
fn parse_pair(bytes: &[u8], open: usize) -> Option<(Point, usize)> {
    let (x, pos) = parse_int(bytes, open + 1)?;

    let pos = skip_whitespace(bytes, pos);
    if bytes.get(pos) != Some(&b',') {
        return None;
    }

    let (y, pos) = parse_int(bytes, pos + 1)?;

    let pos = skip_whitespace(bytes, pos);
    if bytes.get(pos) != Some(&b']') {
        return None;
    }

    Some((Point(x, y), pos + 1))
}

/// Collects pairs from a bracketed list until the list's own closing bracket
/// or until `out` is full.
fn scan_points<const N: usize>(value: &[u8], out: &mut PointBuf<N>) {
    let mut pos = skip_whitespace(value, 0);
    if value.get(pos) != Some(&b'[') {
        return;
    }
    pos += 1;

    // Brackets opened by entries that did not parse as pairs.
    let mut depth = 0usize;

    while pos < value.len() && !out.is_full() {
        match value[pos] {
            b'[' if depth == 0 => match parse_pair(value, pos) {
                Some((point, next)) => {
                    out.push(point);
                    pos = next;
                    continue;
                }
                None => depth += 1,
            },
            b'[' => depth += 1,
            b']' if depth == 0 => return,
            b']' => depth -= 1,
            _ => {}
        }
        pos += 1;
    }
}

fn parse_single_point(value: &[u8]) -> Option<Point> {
    let open = skip_whitespace(value, 0);
    if value.get(open) != Some(&b'[') {
        return None;
    }

    if let Some((point, _)) = parse_pair(value, open) {
        return Some(point);
    }

    let mut first = PointBuf::<1>::new();
    scan_points(value, &mut first);
    first.first().copied()
}

////////////////////////////////////////////////////////////////////////////////
