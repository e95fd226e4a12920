//! The presentation document held for one editing session.
//!
//! Every structural change goes through [`Presentation::replace_slide`], which
//! validates the index before touching the sequence and refreshes
//! `updated_at` on success.

use crate::error::{Error, Result};
use crate::types::{Presentation, Slide, SlideTemplate};
use chrono::{DateTime, Utc};

impl Presentation {
    /// Create a presentation from freshly generated slides.
    pub fn new(title: impl Into<String>, slides: Vec<Slide>) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            slides,
            created_at: now,
            updated_at: now,
        }
    }

    /// Slides in presentation order.
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Time of the last accepted mutation.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Get the slide at `index`, or an error if out of range.
    pub fn slide(&self, index: usize) -> Result<&Slide> {
        self.slides.get(index).ok_or(Error::SlideIndexOutOfRange {
            index,
            len: self.slides.len(),
        })
    }

    /// Find the index of the slide with the given id.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.slides.iter().position(|s| s.id == id)
    }

    /// Replace the slide at `index`.
    ///
    /// An out-of-range index is rejected and leaves the deck untouched.
    pub fn replace_slide(&mut self, index: usize, slide: Slide) -> Result<()> {
        let len = self.slides.len();
        let target = self
            .slides
            .get_mut(index)
            .ok_or(Error::SlideIndexOutOfRange { index, len })?;

        *target = slide;
        self.touch();
        Ok(())
    }

    /// Edit a copy of the slide at `index` and commit it if `edit` succeeds.
    ///
    /// A failing edit leaves the slide and `updated_at` as they were.
    pub fn edit_slide<F>(&mut self, index: usize, edit: F) -> Result<()>
    where
        F: FnOnce(&mut Slide) -> Result<()>,
    {
        let mut draft = self.slide(index)?.clone();
        edit(&mut draft)?;
        self.replace_slide(index, draft)
    }

    /// Switch the slide at `index` to `target`, converting its content.
    pub fn change_template(&mut self, index: usize, target: SlideTemplate) -> Result<()> {
        let converted = self.slide(index)?.with_template(target);
        log::debug!(
            "slide {} switched to {} template",
            converted.id,
            target.as_str()
        );
        self.replace_slide(index, converted)
    }

    /// Refresh the modification time.
    ///
    /// Never moves backwards, even if the wall clock does.
    fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.updated_at);
    }
}
