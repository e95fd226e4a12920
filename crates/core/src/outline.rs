//! Plain-text outline output.
//!
//! Renders each slide as a short block showing what its active template
//! displays, with blocks separated by a blank line.

use crate::types::{Presentation, Slide, SlideTemplate};

/// Formatter for plain-text presentation outlines.
#[derive(Debug, Clone)]
pub struct OutlineFormatter {
    /// Number of bullets shown per list slide.
    max_list_items: usize,
}

impl Default for OutlineFormatter {
    fn default() -> Self {
        Self { max_list_items: 3 }
    }
}

impl OutlineFormatter {
    /// Create a new formatter showing up to 3 bullets per slide.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show up to `items` bullets per list slide.
    pub fn with_max_list_items(mut self, items: usize) -> Self {
        self.max_list_items = items.max(1); // At least 1 bullet per slide
        self
    }

    /// Format one slide, numbered from 1.
    ///
    /// # Example output
    /// ```text
    /// 2. [list] Why Rust
    ///    • Memory safety
    ///    • Speed
    ///    … 2 more
    /// ```
    pub fn format_slide(&self, number: usize, slide: &Slide) -> String {
        let mut lines = vec![format!("{}. [{}] {}", number, slide.template, slide.meta.title)];
        let content = &slide.content;

        match slide.template {
            SlideTemplate::Title => {
                if let Some(subtitle) = &slide.meta.subtitle {
                    lines.push(indent(subtitle));
                }
            }
            SlideTemplate::Text => {
                lines.extend(content.text_blocks.iter().map(|b| indent(b)));
            }
            SlideTemplate::List => {
                let shown = content.list_items.iter().take(self.max_list_items);
                lines.extend(shown.map(|item| indent(&format!("• {}", item))));

                let hidden = content.list_items.len().saturating_sub(self.max_list_items);
                if hidden > 0 {
                    lines.push(indent(&format!("… {} more", hidden)));
                }
            }
            SlideTemplate::TwoColumn => {
                lines.push(indent(&format!("Left: {}", content.columns.left)));
                lines.push(indent(&format!("Right: {}", content.columns.right)));
            }
            SlideTemplate::Quote => {
                lines.push(indent(&format!("\"{}\"", content.quote)));
                if let Some(author) = &slide.meta.author {
                    lines.push(indent(&format!("— {}", author)));
                }
            }
            SlideTemplate::Image => {
                let url = content.image.url.as_deref().unwrap_or("(no image)");
                lines.push(indent(url));
            }
        }

        lines.join("\n")
    }

    /// Format a whole presentation with a header line.
    pub fn format(&self, presentation: &Presentation) -> String {
        let header = format!(
            "{}\nLast edited: {}",
            presentation.title,
            presentation.updated_at().format("%Y-%m-%d %H:%M:%S UTC")
        );

        let slides = presentation
            .slides()
            .iter()
            .enumerate()
            .map(|(i, slide)| self.format_slide(i + 1, slide));

        std::iter::once(header)
            .chain(slides)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Format and add a trailing newline.
    pub fn format_with_newline(&self, presentation: &Presentation) -> String {
        format!("{}\n", self.format(presentation))
    }
}

/// Indent every line of a possibly multi-line value under the slide heading.
fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("   {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}
