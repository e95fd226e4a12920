//! In-place field edits on a single slide.
//!
//! These mirror the inline editors of the slide canvas. They mutate a slide
//! value only; commit the result with [`Presentation::edit_slide`] so the
//! deck's modification time is refreshed.
//!
//! [`Presentation::edit_slide`]: crate::Presentation::edit_slide

use crate::error::{Error, Result};
use crate::types::Slide;

/// Text appended by [`Slide::add_text_block`].
pub const NEW_PARAGRAPH: &str = "New paragraph";

/// Text appended by [`Slide::add_list_item`].
pub const NEW_LIST_ITEM: &str = "New item";

/// One of the two columns of a `two-column` slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSide {
    Left,
    Right,
}

impl Slide {
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.meta.title = title.into();
    }

    /// Set the subtitle; an empty string clears it.
    pub fn set_subtitle(&mut self, subtitle: impl Into<String>) {
        self.meta.subtitle = non_empty(subtitle.into());
    }

    /// Set the author; an empty string clears it.
    pub fn set_author(&mut self, author: impl Into<String>) {
        self.meta.author = non_empty(author.into());
    }

    /// Append a placeholder paragraph.
    pub fn add_text_block(&mut self) {
        self.content.text_blocks.push(NEW_PARAGRAPH.to_string());
    }

    pub fn set_text_block(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        let slot = item_mut(&mut self.content.text_blocks, "paragraph", index)?;
        *slot = text.into();
        Ok(())
    }

    pub fn remove_text_block(&mut self, index: usize) -> Result<String> {
        item_mut(&mut self.content.text_blocks, "paragraph", index)?;
        Ok(self.content.text_blocks.remove(index))
    }

    /// Append a placeholder bullet.
    pub fn add_list_item(&mut self) {
        self.content.list_items.push(NEW_LIST_ITEM.to_string());
    }

    pub fn set_list_item(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        let slot = item_mut(&mut self.content.list_items, "list item", index)?;
        *slot = text.into();
        Ok(())
    }

    pub fn remove_list_item(&mut self, index: usize) -> Result<String> {
        item_mut(&mut self.content.list_items, "list item", index)?;
        Ok(self.content.list_items.remove(index))
    }

    pub fn set_column(&mut self, side: ColumnSide, text: impl Into<String>) {
        let column = match side {
            ColumnSide::Left => &mut self.content.columns.left,
            ColumnSide::Right => &mut self.content.columns.right,
        };
        *column = text.into();
    }

    pub fn set_quote(&mut self, quote: impl Into<String>) {
        self.content.quote = quote.into();
    }

    /// Set or clear the image location. The position is left as is.
    pub fn set_image_url(&mut self, url: Option<String>) {
        self.content.image.url = url.and_then(non_empty);
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn item_mut<'a>(items: &'a mut [String], field: &'static str, index: usize) -> Result<&'a mut String> {
    let len = items.len();
    items
        .get_mut(index)
        .ok_or(Error::ItemIndexOutOfRange { field, index, len })
}
