//! Domain types for slides and presentations.
//!
//! `SlideContent` is a flat record: every field exists regardless of which
//! template is active, so switching templates never drops data that the
//! conversion does not touch.

use crate::error::Error;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display layout of a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlideTemplate {
    /// Large centered title with subtitle.
    Title,
    /// Title with text paragraphs.
    #[default]
    Text,
    /// Title with bullet points.
    List,
    /// Content split into two columns.
    TwoColumn,
    /// Large centered quote with attribution.
    Quote,
    /// Full-width image with title.
    Image,
}

impl SlideTemplate {
    /// All templates, in the order the template picker lists them.
    pub const ALL: [SlideTemplate; 6] = [
        Self::Title,
        Self::Text,
        Self::TwoColumn,
        Self::Image,
        Self::List,
        Self::Quote,
    ];

    /// Wire tag, as used in JSON and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Text => "text",
            Self::List => "list",
            Self::TwoColumn => "two-column",
            Self::Quote => "quote",
            Self::Image => "image",
        }
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "Title Slide",
            Self::Text => "Content",
            Self::List => "List",
            Self::TwoColumn => "Two Column",
            Self::Quote => "Quote",
            Self::Image => "Image",
        }
    }

    /// One-line description of the layout.
    pub fn description(self) -> &'static str {
        match self {
            Self::Title => "Large centered title with subtitle",
            Self::Text => "Title with text paragraphs",
            Self::List => "Title with bullet points",
            Self::TwoColumn => "Split content into two columns",
            Self::Quote => "Large centered quote with attribution",
            Self::Image => "Full-width image with title",
        }
    }
}

impl fmt::Display for SlideTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SlideTemplate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::UnknownTemplate(s.to_string()))
    }
}

/// Title, subtitle and attribution of a slide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideMeta {
    /// Slide heading. May be empty but is always present.
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    /// Optional subtitle, serialized as `null` when absent.
    #[serde(default)]
    pub subtitle: Option<String>,

    /// Optional author, used for quote attribution.
    #[serde(default)]
    pub author: Option<String>,
}

impl SlideMeta {
    /// Create metadata with just a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            author: None,
        }
    }
}

/// The two text columns of a `two-column` slide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Columns {
    #[serde(default, deserialize_with = "null_as_default")]
    pub left: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub right: String,
}

impl Columns {
    /// True if neither column holds text.
    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }
}

/// Which side of the slide an image occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImagePosition {
    Left,
    Right,
    #[default]
    Full,
}

/// Image slot of a slide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideImage {
    /// Image location; `None` until the user supplies one.
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub position: ImagePosition,
}

/// Template-agnostic slide content. Every field is always populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideContent {
    #[serde(default, deserialize_with = "null_as_default")]
    pub text_blocks: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub list_items: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub columns: Columns,

    #[serde(default, deserialize_with = "null_as_default")]
    pub quote: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub image: SlideImage,

    /// Opaque layout data, passed through untouched.
    #[serde(default = "empty_hints", deserialize_with = "null_as_empty_hints")]
    pub layout_hints: serde_json::Value,
}

impl Default for SlideContent {
    fn default() -> Self {
        Self {
            text_blocks: Vec::new(),
            list_items: Vec::new(),
            columns: Columns::default(),
            quote: String::new(),
            image: SlideImage::default(),
            layout_hints: empty_hints(),
        }
    }
}

/// One page of a presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    /// Stable identifier, assigned once at creation.
    #[serde(default = "new_slide_id", deserialize_with = "null_as_new_id")]
    pub id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub template: SlideTemplate,

    #[serde(default, deserialize_with = "null_as_default")]
    pub meta: SlideMeta,

    #[serde(default, deserialize_with = "null_as_default")]
    pub content: SlideContent,
}

impl Slide {
    /// Create an empty slide with a fresh id.
    pub fn new(template: SlideTemplate, meta: SlideMeta) -> Self {
        Self {
            id: new_slide_id(),
            template,
            meta,
            content: SlideContent::default(),
        }
    }

    /// Set the content, consuming and returning the slide.
    pub fn with_content(mut self, content: SlideContent) -> Self {
        self.content = content;
        self
    }
}

/// An ordered deck of slides held for one editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    pub id: String,

    /// Deck title; the topic it was generated for.
    pub title: String,

    pub(crate) slides: Vec<Slide>,

    pub created_at: DateTime<Utc>,

    /// Refreshed on every accepted mutation.
    pub(crate) updated_at: DateTime<Utc>,
}

/// Generate a fresh slide identifier.
pub fn new_slide_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn empty_hints() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

/// Treat an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_empty_hints<'de, D>(deserializer: D) -> Result<serde_json::Value, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<serde_json::Value>::deserialize(deserializer)?.unwrap_or_else(empty_hints))
}

fn null_as_new_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(new_slide_id))
}
