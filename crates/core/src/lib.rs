//! Core slide content model, template conversion, and presentation document
//! for the slide-deck editor.

pub mod convert;
pub mod document;
pub mod edit;
pub mod error;
pub mod normalize;
pub mod outline;
pub mod session;
pub mod types;

pub use convert::convert;
pub use edit::ColumnSide;
pub use error::{Error, Result};
pub use normalize::ContentNormalizer;
pub use outline::OutlineFormatter;
pub use session::{
    clear_presentation, load_presentation, save_presentation, FileSessionStore,
    MemorySessionStore, SessionStore, PRESENTATION_KEY,
};
pub use types::{
    Columns, ImagePosition, Presentation, Slide, SlideContent, SlideImage, SlideMeta,
    SlideTemplate,
};
