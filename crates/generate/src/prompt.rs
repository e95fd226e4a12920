//! Prompt construction for bulk generation and single-slide regeneration.

use deck_core::{Slide, SlideTemplate};
use serde::{Deserialize, Serialize};

/// Slide count used when a generation request does not specify one.
pub const DEFAULT_SLIDE_COUNT: usize = 5;

/// Feedback used when a regeneration request has no instruction.
pub const DEFAULT_FEEDBACK: &str = "Make it better and more engaging";

/// Input to bulk generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Free-text instruction from the user. May be empty.
    #[serde(default)]
    pub prompt: String,

    /// What the deck is about. Callers are expected to pass a non-empty topic.
    pub topic: String,

    /// Reference texts, inserted into the prompt verbatim.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reference_files: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slide_count: Option<usize>,
}

impl GenerationRequest {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            ..Self::default()
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn with_reference(mut self, text: impl Into<String>) -> Self {
        self.reference_files.push(text.into());
        self
    }

    pub fn with_slide_count(mut self, count: usize) -> Self {
        self.slide_count = Some(count);
        self
    }

    /// Requested slide count, or the default.
    pub fn effective_slide_count(&self) -> usize {
        self.slide_count.unwrap_or(DEFAULT_SLIDE_COUNT)
    }
}

/// Input to single-slide regeneration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegenerationRequest {
    /// Id the regenerated slide must keep.
    pub slide_id: String,

    pub current_slide: Slide,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

impl RegenerationRequest {
    /// Regenerate `slide`, keeping its id.
    pub fn for_slide(slide: Slide) -> Self {
        Self {
            slide_id: slide.id.clone(),
            current_slide: slide,
            prompt: None,
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// The user's feedback, or the default when absent or blank.
    pub fn feedback(&self) -> &str {
        self.prompt
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(DEFAULT_FEEDBACK)
    }
}

/// Shape every slide must follow, shown to the model verbatim.
const SLIDE_SCHEMA: &str = r#"{
  "id": "slide-1",
  "template": "title" | "text" | "list" | "two-column" | "quote" | "image",
  "meta": {
    "title": "Slide Title",
    "subtitle": "Optional subtitle" or null,
    "author": "Optional author" or null
  },
  "content": {
    "textBlocks": ["Paragraph 1", "Paragraph 2"],
    "listItems": ["Item 1", "Item 2", "Item 3"],
    "columns": { "left": "Left column content", "right": "Right column content" },
    "quote": "Quote text",
    "image": { "url": null, "position": "left" | "right" | "full" },
    "layoutHints": {}
  }
}"#;

/// Fully populated sample slide, anchoring the model to the complete shape.
const EXAMPLE_SLIDE: &str = r#"{
  "id": "slide-1",
  "template": "text",
  "meta": {
    "title": "Introduction to AI",
    "subtitle": null,
    "author": null
  },
  "content": {
    "textBlocks": ["Artificial Intelligence is transforming how we work and live.", "From healthcare to transportation, AI is making significant impacts."],
    "listItems": [],
    "columns": { "left": "", "right": "" },
    "quote": "",
    "image": { "url": null, "position": "full" },
    "layoutHints": {}
  }
}"#;

/// Numbered generation rules, one per content-bearing template.
fn critical_rules() -> String {
    let mut rules = vec!["ALL slides must have meta.title filled".to_string()];
    rules.extend(
        [
            SlideTemplate::Text,
            SlideTemplate::List,
            SlideTemplate::TwoColumn,
            SlideTemplate::Quote,
        ]
        .into_iter()
        .map(|t| format!("For \"{}\" template: fill {}", t.as_str(), template_fields(t))),
    );
    rules.push(
        "Always include ALL fields in the structure, use empty arrays [] or empty strings \"\" for unused fields"
            .to_string(),
    );
    rules.push("Use a variety of templates for visual interest".to_string());

    rules
        .iter()
        .enumerate()
        .map(|(i, rule)| format!("{}. {}", i + 1, rule))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Which fields each template reads.
fn template_guide() -> String {
    SlideTemplate::ALL
        .iter()
        .map(|t| format!("- \"{}\": {}", t.as_str(), template_fields(*t)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn template_fields(template: SlideTemplate) -> &'static str {
    match template {
        SlideTemplate::Title => "meta.title and meta.subtitle",
        SlideTemplate::Text => "meta.title and content.textBlocks (1-3 paragraphs)",
        SlideTemplate::List => "meta.title and content.listItems (3-6 items)",
        SlideTemplate::TwoColumn => {
            "meta.title, content.columns.left AND content.columns.right (both filled)"
        }
        SlideTemplate::Quote => "content.quote and meta.author",
        SlideTemplate::Image => "meta.title and content.image (position \"full\")",
    }
}

/// Build the prompt asking for a JSON array of slides.
pub fn build_generation_prompt(request: &GenerationRequest) -> String {
    let context = if request.reference_files.is_empty() {
        String::new()
    } else {
        format!(
            "Reference materials: {}",
            request.reference_files.join("\n\n")
        )
    };

    format!(
        "You are a professional presentation designer. Generate {count} slides for a presentation about \"{topic}\".

{context}

User requirements: {prompt}

Return ONLY a valid JSON array of slides. Every slide must use this EXACT structure:

{schema}

TEMPLATE USAGE GUIDE:
{guide}

CRITICAL RULES:
{rules}

Example slide:
{example}

Return the array starting with [ and ending with ]",
        count = request.effective_slide_count(),
        topic = request.topic,
        context = context,
        prompt = request.prompt,
        schema = SLIDE_SCHEMA,
        guide = template_guide(),
        rules = critical_rules(),
        example = EXAMPLE_SLIDE,
    )
}

/// Build the prompt asking for one replacement slide as a JSON object.
pub fn build_regeneration_prompt(request: &RegenerationRequest) -> String {
    let current = serde_json::to_string_pretty(&request.current_slide).unwrap_or_default();
    let template = request.current_slide.template;

    format!(
        "You are a professional presentation designer. Regenerate this slide with improvements.

Current slide: {current}

User feedback: {feedback}

Return ONLY a valid JSON object using the structure below. Keep \"id\" set to \"{id}\" and \"template\" set to \"{template}\"; improve only the content.

{schema}

The \"{template}\" template uses {fields}.
Always include ALL fields; use [] or \"\" for fields the template does not use.",
        current = current,
        feedback = request.feedback(),
        id = request.slide_id,
        template = template.as_str(),
        schema = SLIDE_SCHEMA,
        fields = template_fields(template),
    )
}
