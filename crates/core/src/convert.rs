//! Template conversion.
//!
//! Switching a slide's template remaps whichever content fields the target
//! layout displays, pulling from the first non-empty source in a fixed
//! priority order. Fields the target does not display are left untouched, so
//! a later switch back can still find them.

use crate::types::{Columns, ImagePosition, Slide, SlideContent, SlideMeta, SlideTemplate};

/// Paragraph used when a `text` slide has nothing to show.
pub const TEXT_PLACEHOLDER: &str = "Add your content here";

/// Bullets used when a `list` slide has nothing to show.
pub const LIST_PLACEHOLDER: [&str; 3] = ["Item 1", "Item 2", "Item 3"];

/// Column text used when a `two-column` slide has nothing to show.
pub const LEFT_COLUMN_PLACEHOLDER: &str = "Left column content";
pub const RIGHT_COLUMN_PLACEHOLDER: &str = "Right column content";

/// Quote used when a `quote` slide has nothing to show.
pub const QUOTE_PLACEHOLDER: &str = "Your quote here";

/// Remap `content` for display under `target`.
///
/// Total and side-effect free. `meta` is never altered; a `title` slide only
/// displays `meta.title` and `meta.subtitle`, so its content passes through.
pub fn convert(content: &SlideContent, _meta: &SlideMeta, target: SlideTemplate) -> SlideContent {
    let mut next = content.clone();

    match target {
        SlideTemplate::Title => {}

        SlideTemplate::Text => {
            if let Some(blocks) = sequence_from(&content.list_items, &content.columns, &content.quote) {
                next.text_blocks = blocks;
            } else if content.text_blocks.is_empty() {
                next.text_blocks = vec![TEXT_PLACEHOLDER.to_string()];
            }
        }

        SlideTemplate::List => {
            if let Some(items) = sequence_from(&content.text_blocks, &content.columns, &content.quote) {
                next.list_items = items;
            } else if content.list_items.is_empty() {
                next.list_items = LIST_PLACEHOLDER.iter().map(|s| s.to_string()).collect();
            }
        }

        SlideTemplate::TwoColumn => {
            if content.text_blocks.len() >= 2 {
                next.columns = split_columns(&content.text_blocks, "\n\n");
            } else if content.list_items.len() >= 2 {
                next.columns = split_columns(&content.list_items, "\n");
            } else if content.columns.is_empty() {
                next.columns = Columns {
                    left: LEFT_COLUMN_PLACEHOLDER.to_string(),
                    right: RIGHT_COLUMN_PLACEHOLDER.to_string(),
                };
            }
        }

        SlideTemplate::Quote => {
            if let Some(first) = content
                .text_blocks
                .first()
                .or_else(|| content.list_items.first())
            {
                next.quote = first.clone();
            } else if content.quote.is_empty() {
                next.quote = QUOTE_PLACEHOLDER.to_string();
            }
        }

        SlideTemplate::Image => {
            next.image.position = ImagePosition::Full;
        }
    }

    next
}

/// Shared source chain for `text` and `list`: the other sequence, then the
/// non-empty columns in left-then-right order, then the quote.
fn sequence_from(other: &[String], columns: &Columns, quote: &str) -> Option<Vec<String>> {
    if !other.is_empty() {
        return Some(other.to_vec());
    }

    if !columns.is_empty() {
        return Some(
            [&columns.left, &columns.right]
                .into_iter()
                .filter(|c| !c.is_empty())
                .cloned()
                .collect(),
        );
    }

    if !quote.is_empty() {
        return Some(vec![quote.to_string()]);
    }

    None
}

/// Split at the ceiling of half the length; the left column gets the extra
/// entry on odd lengths.
fn split_columns(entries: &[String], separator: &str) -> Columns {
    let mid = entries.len().div_ceil(2);
    let (left, right) = entries.split_at(mid);

    Columns {
        left: left.join(separator),
        right: right.join(separator),
    }
}

impl Slide {
    /// Switch this slide to `target`, converting its content.
    ///
    /// The id and meta are kept. Switching to the current template still
    /// applies the conversion rules.
    pub fn with_template(&self, target: SlideTemplate) -> Slide {
        Slide {
            id: self.id.clone(),
            template: target,
            meta: self.meta.clone(),
            content: convert(&self.content, &self.meta, target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn meta() -> SlideMeta {
        SlideMeta::new("Heading")
    }

    fn with_text(blocks: &[&str]) -> SlideContent {
        SlideContent {
            text_blocks: strings(blocks),
            ..SlideContent::default()
        }
    }

    fn with_list(items: &[&str]) -> SlideContent {
        SlideContent {
            list_items: strings(items),
            ..SlideContent::default()
        }
    }

    fn with_columns(left: &str, right: &str) -> SlideContent {
        SlideContent {
            columns: Columns {
                left: left.to_string(),
                right: right.to_string(),
            },
            ..SlideContent::default()
        }
    }

    fn with_quote(quote: &str) -> SlideContent {
        SlideContent {
            quote: quote.to_string(),
            ..SlideContent::default()
        }
    }

    #[test]
    fn test_title_leaves_content_untouched() {
        let content = with_list(&["A", "B"]);
        assert_eq!(convert(&content, &meta(), SlideTemplate::Title), content);
    }

    #[test]
    fn test_text_prefers_list_items() {
        let mut content = with_list(&["One", "Two"]);
        content.quote = "Ignored".to_string();
        content.text_blocks = strings(&["Old"]);

        let result = convert(&content, &meta(), SlideTemplate::Text);
        assert_eq!(result.text_blocks, vec!["One", "Two"]);
        assert_eq!(result.list_items, vec!["One", "Two"]);
        assert_eq!(result.quote, "Ignored");
    }

    #[test]
    fn test_text_from_columns_skips_empty_side() {
        let result = convert(&with_columns("", "Right only"), &meta(), SlideTemplate::Text);
        assert_eq!(result.text_blocks, vec!["Right only"]);

        let result = convert(&with_columns("L", "R"), &meta(), SlideTemplate::Text);
        assert_eq!(result.text_blocks, vec!["L", "R"]);
    }

    #[test]
    fn test_text_from_quote() {
        let result = convert(&with_quote("To be"), &meta(), SlideTemplate::Text);
        assert_eq!(result.text_blocks, vec!["To be"]);
    }

    #[test]
    fn test_text_keeps_existing_blocks() {
        let content = with_text(&["Keep me"]);
        let result = convert(&content, &meta(), SlideTemplate::Text);
        assert_eq!(result.text_blocks, vec!["Keep me"]);
    }

    #[test]
    fn test_text_placeholder_when_empty() {
        let result = convert(&SlideContent::default(), &meta(), SlideTemplate::Text);
        assert_eq!(result.text_blocks, vec![TEXT_PLACEHOLDER]);
    }

    #[test]
    fn test_list_from_text_blocks() {
        let result = convert(&with_text(&["P1", "P2"]), &meta(), SlideTemplate::List);
        assert_eq!(result.list_items, vec!["P1", "P2"]);
    }

    #[test]
    fn test_list_from_columns() {
        let result = convert(&with_columns("X", "Y"), &meta(), SlideTemplate::List);
        assert_eq!(result.list_items, vec!["X", "Y"]);
    }

    #[test]
    fn test_list_from_quote() {
        let result = convert(&with_quote("Q"), &meta(), SlideTemplate::List);
        assert_eq!(result.list_items, vec!["Q"]);
    }

    #[test]
    fn test_columns_outrank_quote() {
        let mut content = with_columns("Left", "Right");
        content.quote = "Quoted".to_string();

        let text = convert(&content, &meta(), SlideTemplate::Text);
        assert_eq!(text.text_blocks, vec!["Left", "Right"]);

        let list = convert(&content, &meta(), SlideTemplate::List);
        assert_eq!(list.list_items, vec!["Left", "Right"]);
    }

    #[test]
    fn test_list_from_one_sided_columns() {
        let result = convert(&with_columns("Only left", ""), &meta(), SlideTemplate::List);
        assert_eq!(result.list_items, vec!["Only left"]);
    }

    #[test]
    fn test_list_keeps_existing_items() {
        let result = convert(&with_list(&["Only"]), &meta(), SlideTemplate::List);
        assert_eq!(result.list_items, vec!["Only"]);
    }

    #[test]
    fn test_list_placeholder_when_empty() {
        let result = convert(&SlideContent::default(), &meta(), SlideTemplate::List);
        assert_eq!(result.list_items, vec!["Item 1", "Item 2", "Item 3"]);
    }

    #[test]
    fn test_two_column_splits_text_blocks_at_ceiling() {
        let result = convert(&with_text(&["A", "B", "C"]), &meta(), SlideTemplate::TwoColumn);
        assert_eq!(result.columns.left, "A\n\nB");
        assert_eq!(result.columns.right, "C");
    }

    #[test]
    fn test_two_column_splits_even_text_blocks() {
        let result = convert(&with_text(&["A", "B", "C", "D"]), &meta(), SlideTemplate::TwoColumn);
        assert_eq!(result.columns.left, "A\n\nB");
        assert_eq!(result.columns.right, "C\n\nD");
    }

    #[test]
    fn test_two_column_splits_list_items_with_single_newline() {
        let result = convert(&with_list(&["1", "2", "3", "4", "5"]), &meta(), SlideTemplate::TwoColumn);
        assert_eq!(result.columns.left, "1\n2\n3");
        assert_eq!(result.columns.right, "4\n5");
    }

    #[test]
    fn test_two_column_single_text_block_not_split() {
        let mut content = with_text(&["Alone"]);
        content.columns = Columns {
            left: "Existing".to_string(),
            right: String::new(),
        };

        let result = convert(&content, &meta(), SlideTemplate::TwoColumn);
        assert_eq!(result.columns, content.columns);
    }

    #[test]
    fn test_two_column_single_entries_fall_to_placeholder() {
        let mut content = with_text(&["Alone"]);
        content.list_items = strings(&["Also alone"]);

        let result = convert(&content, &meta(), SlideTemplate::TwoColumn);
        assert_eq!(result.columns.left, LEFT_COLUMN_PLACEHOLDER);
        assert_eq!(result.columns.right, RIGHT_COLUMN_PLACEHOLDER);
        assert_eq!(result.text_blocks, vec!["Alone"]);
    }

    #[test]
    fn test_quote_takes_first_text_block() {
        let result = convert(
            &with_text(&["First paragraph", "Second"]),
            &meta(),
            SlideTemplate::Quote,
        );
        assert_eq!(result.quote, "First paragraph");
    }

    #[test]
    fn test_quote_from_list_then_existing_then_placeholder() {
        let result = convert(&with_list(&["Bullet", "Other"]), &meta(), SlideTemplate::Quote);
        assert_eq!(result.quote, "Bullet");

        let result = convert(&with_quote("Kept"), &meta(), SlideTemplate::Quote);
        assert_eq!(result.quote, "Kept");

        let result = convert(&SlideContent::default(), &meta(), SlideTemplate::Quote);
        assert_eq!(result.quote, QUOTE_PLACEHOLDER);
    }

    #[test]
    fn test_image_forces_full_position_and_keeps_url() {
        let mut content = with_text(&["Caption"]);
        content.image.url = Some("https://example.com/a.png".to_string());
        content.image.position = ImagePosition::Left;

        let result = convert(&content, &meta(), SlideTemplate::Image);
        assert_eq!(result.image.position, ImagePosition::Full);
        assert_eq!(result.image.url.as_deref(), Some("https://example.com/a.png"));
        assert_eq!(result.text_blocks, vec!["Caption"]);
    }

    #[test]
    fn test_every_target_yields_populated_content() {
        let sources = [
            SlideContent::default(),
            with_text(&["A", "B"]),
            with_list(&["A"]),
            with_columns("L", ""),
            with_quote("Q"),
        ];

        for source in &sources {
            for target in SlideTemplate::ALL {
                let result = convert(source, &meta(), target);
                let value = serde_json::to_value(&result).unwrap();
                for field in ["textBlocks", "listItems", "columns", "quote", "image", "layoutHints"] {
                    assert!(value.get(field).is_some(), "{field} missing after {target}");
                }
            }
        }
    }

    #[test]
    fn test_list_quote_list_is_lossy() {
        let original = with_list(&["One", "Two", "Three"]);

        let quoted = convert(&original, &meta(), SlideTemplate::Quote);
        assert_eq!(quoted.quote, "One");

        // The quote outranks the surviving list items on the way back.
        let back = convert(&quoted, &meta(), SlideTemplate::List);
        assert_eq!(back.list_items, vec!["One"]);
        assert_ne!(back.list_items, original.list_items);
    }

    #[test]
    fn test_text_two_column_text_is_lossy() {
        let original = with_text(&["A", "B", "C"]);

        let columns = convert(&original, &meta(), SlideTemplate::TwoColumn);
        let back = convert(&columns, &meta(), SlideTemplate::Text);

        assert_eq!(back.text_blocks, vec!["A\n\nB", "C"]);
    }

    #[test]
    fn test_with_template_keeps_identity() {
        let slide = Slide::new(SlideTemplate::Text, meta()).with_content(with_text(&["A", "B"]));
        let switched = slide.with_template(SlideTemplate::List);

        assert_eq!(switched.id, slide.id);
        assert_eq!(switched.meta, slide.meta);
        assert_eq!(switched.template, SlideTemplate::List);
        assert_eq!(switched.content.list_items, vec!["A", "B"]);
    }
}
