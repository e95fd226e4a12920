//! Cleanup of model-generated slide text.
//!
//! Normalizes line endings, collapses runs of horizontal whitespace, trims
//! each line, drops blank paragraphs and bullets, and makes slide ids unique
//! within a deck.

use crate::types::{new_slide_id, Slide, SlideContent, SlideMeta};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Regex to collapse runs of spaces and tabs into one space.
static WHITESPACE_COLLAPSE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());

/// Regex to cap blank-line runs at one blank line.
static BLANK_LINES_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Text normalizer for generated slides.
#[derive(Debug, Clone)]
pub struct ContentNormalizer {
    /// Whether to drop paragraphs and bullets that are empty after cleanup.
    drop_blank_entries: bool,
}

impl Default for ContentNormalizer {
    fn default() -> Self {
        Self {
            drop_blank_entries: true,
        }
    }
}

impl ContentNormalizer {
    /// Create a normalizer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether blank paragraphs and bullets are removed.
    pub fn with_drop_blank_entries(mut self, drop: bool) -> Self {
        self.drop_blank_entries = drop;
        self
    }

    /// Normalize one piece of text.
    ///
    /// - Converts `\r\n` and `\r` to `\n`
    /// - Collapses spaces/tabs to a single space and trims every line
    /// - Keeps at most one blank line between paragraphs
    /// - Trims leading/trailing blank lines
    pub fn normalize_text(&self, text: &str) -> String {
        let unified = text.replace("\r\n", "\n").replace('\r', "\n");

        let lines = unified
            .split('\n')
            .map(|line| WHITESPACE_COLLAPSE_REGEX.replace_all(line, " ").trim().to_string())
            .collect::<Vec<_>>()
            .join("\n");

        BLANK_LINES_REGEX
            .replace_all(&lines, "\n\n")
            .trim_matches('\n')
            .to_string()
    }

    fn normalize_optional(&self, text: Option<&str>) -> Option<String> {
        text.map(|t| self.normalize_text(t)).filter(|t| !t.is_empty())
    }

    fn normalize_entries(&self, entries: &[String]) -> Vec<String> {
        entries
            .iter()
            .map(|e| self.normalize_text(e))
            .filter(|e| !self.drop_blank_entries || !e.is_empty())
            .collect()
    }

    /// Normalize slide metadata.
    pub fn normalize_meta(&self, meta: &SlideMeta) -> SlideMeta {
        SlideMeta {
            title: self.normalize_text(&meta.title),
            subtitle: self.normalize_optional(meta.subtitle.as_deref()),
            author: self.normalize_optional(meta.author.as_deref()),
        }
    }

    /// Normalize every text field of a content record.
    ///
    /// The image url is trimmed; an empty url becomes `None`. Layout hints
    /// are not inspected.
    pub fn normalize_content(&self, content: &SlideContent) -> SlideContent {
        let mut next = content.clone();

        next.text_blocks = self.normalize_entries(&content.text_blocks);
        next.list_items = self.normalize_entries(&content.list_items);
        next.columns.left = self.normalize_text(&content.columns.left);
        next.columns.right = self.normalize_text(&content.columns.right);
        next.quote = self.normalize_text(&content.quote);
        next.image.url = content
            .image
            .url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(str::to_string);

        next
    }

    /// Normalize a single slide, keeping its id and template.
    pub fn normalize_slide(&self, slide: &Slide) -> Slide {
        Slide {
            id: slide.id.trim().to_string(),
            template: slide.template,
            meta: self.normalize_meta(&slide.meta),
            content: self.normalize_content(&slide.content),
        }
    }

    /// Normalize a generated deck.
    ///
    /// Slides whose id is empty or repeats an earlier slide's id are given a
    /// fresh one, so every id in the result is unique.
    pub fn normalize_slides(&self, slides: &[Slide]) -> Vec<Slide> {
        let mut seen = HashSet::new();

        slides
            .iter()
            .map(|slide| {
                let mut slide = self.normalize_slide(slide);
                if slide.id.is_empty() || !seen.insert(slide.id.clone()) {
                    let fresh = new_slide_id();
                    log::debug!("replacing duplicate or empty slide id {:?} with {}", slide.id, fresh);
                    seen.insert(fresh.clone());
                    slide.id = fresh;
                }
                slide
            })
            .collect()
    }
}
