//! Slide generation and regeneration on top of a completion backend.

use crate::client::CompletionBackend;
use crate::error::{Error, Result};
use crate::extract::{parse_slide, parse_slides};
use crate::prompt::{
    build_generation_prompt, build_regeneration_prompt, GenerationRequest, RegenerationRequest,
};
use deck_core::{save_presentation, ContentNormalizer, Presentation, SessionStore, Slide};

/// Sampling temperature for bulk generation.
pub const GENERATION_TEMPERATURE: f32 = 0.7;

/// Sampling temperature for single-slide regeneration.
pub const REGENERATION_TEMPERATURE: f32 = 0.8;

/// Stateless generator: every call is one independent completion request.
#[derive(Debug, Clone)]
pub struct SlideGenerator<B> {
    backend: B,
    normalizer: ContentNormalizer,
}

impl<B: CompletionBackend> SlideGenerator<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            normalizer: ContentNormalizer::new(),
        }
    }

    /// Use a custom normalizer for generated text.
    pub fn with_normalizer(mut self, normalizer: ContentNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Generate a deck of slides for `request`.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<Vec<Slide>> {
        let prompt = build_generation_prompt(request);
        log::info!(
            "generating {} slides about {:?}",
            request.effective_slide_count(),
            request.topic
        );

        let raw = self.backend.complete(&prompt, GENERATION_TEMPERATURE).await?;
        let slides = parse_slides(&raw).map_err(|e| log_unparseable(e, &raw))?;

        Ok(self.normalizer.normalize_slides(&slides))
    }

    /// Regenerate one slide.
    ///
    /// The result always carries the requested slide id and the current
    /// slide's template, whatever the model returned.
    pub async fn regenerate(&self, request: &RegenerationRequest) -> Result<Slide> {
        let prompt = build_regeneration_prompt(request);
        log::info!("regenerating slide {}", request.slide_id);

        let raw = self.backend.complete(&prompt, REGENERATION_TEMPERATURE).await?;
        let parsed = parse_slide(&raw).map_err(|e| log_unparseable(e, &raw))?;
        let mut slide = self.normalizer.normalize_slide(&parsed);

        if slide.id != request.slide_id || slide.template != request.current_slide.template {
            log::debug!(
                "model changed slide identity ({} / {}); restoring {} / {}",
                slide.id,
                slide.template,
                request.slide_id,
                request.current_slide.template
            );
        }
        // Assigned after normalizing so the requested id comes back verbatim.
        slide.id = request.slide_id.clone();
        slide.template = request.current_slide.template;

        Ok(slide)
    }

    /// Generate a deck and make it the session's active presentation.
    ///
    /// Nothing is written to `store` unless generation succeeds.
    pub async fn generate_presentation(
        &self,
        request: &GenerationRequest,
        store: &mut dyn SessionStore,
    ) -> Result<Presentation> {
        let slides = self.generate(request).await?;
        let presentation = Presentation::new(request.topic.clone(), slides);
        save_presentation(store, &presentation)?;
        Ok(presentation)
    }
}

/// Keep the raw model text out of the error; it only goes to the log.
fn log_unparseable(error: Error, raw: &str) -> Error {
    log::debug!("could not parse model output ({}):\n{}", error, raw);
    error
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use deck_core::{load_presentation, MemorySessionStore, SlideMeta, SlideTemplate};
    use std::sync::Mutex;

    /// Backend returning a canned reply and recording what it was asked.
    struct CannedBackend {
        reply: Result<String>,
        calls: Mutex<Vec<(String, f32)>>,
    }

    impl CannedBackend {
        fn replying(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing(error: Error) -> Self {
            Self {
                reply: Err(error),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CompletionBackend for CannedBackend {
        async fn complete(&self, prompt: &str, temperature: f32) -> Result<String> {
            self.calls
                .lock()
                .unwrap()
                .push((prompt.to_string(), temperature));
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(Error::MissingApiKey) => Err(Error::MissingApiKey),
                Err(e) => Err(Error::Upstream {
                    status: 502,
                    message: e.to_string(),
                }),
            }
        }
    }

    const DECK: &str = r#"Here is your deck:
```json
[
  {"id": "slide-1", "template": "title", "meta": {"title": "  Rust  Basics ", "subtitle": "An intro"}},
  {"id": "slide-1", "template": "list", "meta": {"title": "Why"}, "content": {"listItems": ["Fast", " ", "Safe"]}}
]
```"#;

    #[tokio::test]
    async fn test_generate_parses_and_normalizes() {
        let generator = SlideGenerator::new(CannedBackend::replying(DECK));
        let request = GenerationRequest::new("Rust").with_slide_count(2);

        let slides = generator.generate(&request).await.unwrap();

        assert_eq!(slides.len(), 2);
        assert_eq!(slides[0].meta.title, "Rust Basics");
        assert_eq!(slides[1].content.list_items, vec!["Fast", "Safe"]);
        assert_ne!(slides[0].id, slides[1].id);

        let calls = generator.backend().calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].0.contains("Generate 2 slides"));
        assert_eq!(calls[0].1, GENERATION_TEMPERATURE);
    }

    #[tokio::test]
    async fn test_generate_presentation_persists() {
        let generator = SlideGenerator::new(CannedBackend::replying(DECK));
        let mut store = MemorySessionStore::new();

        let deck = generator
            .generate_presentation(&GenerationRequest::new("Rust"), &mut store)
            .await
            .unwrap();

        assert_eq!(deck.title, "Rust");
        assert_eq!(load_presentation(&store).unwrap(), Some(deck));
    }

    #[tokio::test]
    async fn test_malformed_output_persists_nothing() {
        let generator =
            SlideGenerator::new(CannedBackend::replying(r#"[{"id": "slide-1", "meta": }]"#));
        let mut store = MemorySessionStore::new();

        let err = generator
            .generate_presentation(&GenerationRequest::new("Rust"), &mut store)
            .await
            .unwrap_err();

        assert!(err.is_parse());
        assert!(load_presentation(&store).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_backend_error_surfaces() {
        let generator = SlideGenerator::new(CannedBackend::failing(Error::MissingApiKey));

        let err = generator
            .generate(&GenerationRequest::new("Rust"))
            .await
            .unwrap_err();

        assert!(err.is_config());
    }

    #[tokio::test]
    async fn test_regenerate_enforces_id_and_template() {
        let reply = r#"{"id": "something-else", "template": "quote",
            "meta": {"title": "Better"}, "content": {"textBlocks": ["New text"]}}"#;
        let generator = SlideGenerator::new(CannedBackend::replying(reply));

        let mut current = Slide::new(SlideTemplate::Text, SlideMeta::new("Old"));
        current.id = "slide-3".to_string();
        let request = RegenerationRequest::for_slide(current).with_prompt("Punchier");

        let slide = generator.regenerate(&request).await.unwrap();

        assert_eq!(slide.id, "slide-3");
        assert_eq!(slide.template, SlideTemplate::Text);
        assert_eq!(slide.meta.title, "Better");
        assert_eq!(slide.content.text_blocks, vec!["New text"]);

        let calls = generator.backend().calls.lock().unwrap();
        assert!(calls[0].0.contains("User feedback: Punchier"));
        assert_eq!(calls[0].1, REGENERATION_TEMPERATURE);
    }

    #[tokio::test]
    async fn test_regenerate_keeps_untrimmed_id() {
        let reply = r#"{"id": "x", "template": "text", "meta": {"title": "  Spaced   title "}}"#;
        let generator = SlideGenerator::new(CannedBackend::replying(reply));

        let mut current = Slide::new(SlideTemplate::Text, SlideMeta::new("Old"));
        current.id = " slide-3 ".to_string();
        let request = RegenerationRequest::for_slide(current);

        let slide = generator.regenerate(&request).await.unwrap();

        assert_eq!(slide.id, request.slide_id);
        assert_eq!(slide.id, " slide-3 ");
        assert_eq!(slide.meta.title, "Spaced title");
    }

    #[tokio::test]
    async fn test_regenerate_without_object_fails() {
        let generator = SlideGenerator::new(CannedBackend::replying("Sorry, I can't."));
        let request =
            RegenerationRequest::for_slide(Slide::new(SlideTemplate::Text, SlideMeta::new("T")));

        let err = generator.regenerate(&request).await.unwrap_err();
        assert!(matches!(err, Error::NoJsonFound { expected: "object" }));
    }
}
