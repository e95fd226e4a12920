//! Extraction of the JSON payload from free-form model output.
//!
//! Models often wrap their answer in prose or code fences. The scanner walks
//! the text once for top-level bracketed regions, matching brackets with a
//! stack that ignores anything inside JSON string literals, and returns
//! the first region that is syntactically valid JSON.

use crate::error::{Error, Result};
use deck_core::Slide;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Kind of bracketed region to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// `[` … `]`, used for bulk generation.
    Array,
    /// `{` … `}`, used for single-slide regeneration.
    Object,
}

impl Region {
    fn delimiters(self) -> (u8, u8) {
        match self {
            Self::Array => (b'[', b']'),
            Self::Object => (b'{', b'}'),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

/// Top-level balanced regions as `(start, end)` byte positions, in order.
///
/// One pass with a stack of open brackets. Quotes only start a string once
/// a region is open, so prose before the payload cannot swallow it. An
/// opener that never closes stays on the stack and is ignored; regions
/// closed inside it still count.
fn balanced_regions(bytes: &[u8], open: u8, close: u8) -> Vec<(usize, usize)> {
    let mut openers = Vec::new();
    let mut closed = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        if b == b'"' && !openers.is_empty() {
            in_string = true;
        } else if b == open {
            openers.push(i);
        } else if b == close {
            if let Some(start) = openers.pop() {
                closed.push((start, i));
            }
        }
    }

    // Regions either nest or are disjoint; keep the outermost ones.
    closed.sort_unstable();
    let mut regions: Vec<(usize, usize)> = Vec::new();
    for (start, end) in closed {
        if regions.last().map_or(true, |&(_, last_end)| start > last_end) {
            regions.push((start, end));
        }
    }

    regions
}

/// All top-level balanced regions of the given kind, in order.
///
/// Regions nested inside an earlier balanced region are not reported
/// separately. An opening bracket that never closes is skipped.
pub fn candidate_regions(text: &str, region: Region) -> Vec<&str> {
    let (open, close) = region.delimiters();

    balanced_regions(text.as_bytes(), open, close)
        .into_iter()
        // Brackets are ASCII, so both ends sit on char boundaries.
        .map(|(start, end)| &text[start..=end])
        .collect()
}

/// Extract and syntax-check the first valid JSON region.
///
/// Fails with [`Error::NoJsonFound`] if there is no balanced region at all,
/// or with [`Error::InvalidJson`] (from the first candidate) if none parses.
pub fn extract_json(text: &str, region: Region) -> Result<Value> {
    let mut first_error = None;

    for candidate in candidate_regions(text, region) {
        match serde_json::from_str::<Value>(candidate) {
            Ok(value) => return Ok(value),
            Err(e) => {
                log::debug!("skipping invalid JSON {} candidate: {}", region.name(), e);
                first_error.get_or_insert(e);
            }
        }
    }

    Err(match first_error {
        Some(e) => Error::InvalidJson(e),
        None => Error::NoJsonFound {
            expected: region.name(),
        },
    })
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(Error::Schema)
}

/// Parse a bulk generation response into slides.
///
/// Missing fields are filled with their empty defaults; wrongly typed fields
/// and unknown templates are schema errors. An empty array is an error.
pub fn parse_slides(text: &str) -> Result<Vec<Slide>> {
    let slides: Vec<Slide> = decode(extract_json(text, Region::Array)?)?;
    if slides.is_empty() {
        return Err(Error::NoSlides);
    }
    Ok(slides)
}

/// Parse a regeneration response into one slide.
pub fn parse_slide(text: &str) -> Result<Slide> {
    decode(extract_json(text, Region::Object)?)
}
