//! Summarization pipeline: extraction, hosted summary, alignment

use crate::error::{Result, SummarizerError};
use crate::input::extractor;
use crate::input::manager::DocumentSource;
use crate::llm::client::Summarizer;
use crate::output::report::{DocumentInfo, DocumentStats, ModelInfo, SummaryReport};
use crate::processing::aligner::Aligner;
use crate::processing::embeddings::Embedder;
use crate::processing::paragraph::{MappingEntry, Paragraph};
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;

/// Coordinates the three stages of a run: extract the paragraph sequence,
/// obtain the bullet summary, align each bullet to its source paragraph.
///
/// The embedding service is injected once and shared; the summarizer is
/// passed per call so the offline path never needs one.
pub struct SummaryPipeline {
    embedder: Arc<dyn Embedder>,
    embedding_model: String,
}

impl SummaryPipeline {
    pub fn new(embedder: Arc<dyn Embedder>, embedding_model: impl Into<String>) -> Self {
        Self {
            embedder,
            embedding_model: embedding_model.into(),
        }
    }

    pub fn extract(&self, source: &DocumentSource) -> Result<Vec<Paragraph>> {
        extractor::extract(&source.bytes, source.format)
    }

    pub async fn summarize(
        &self,
        source: &DocumentSource,
        summarizer: &dyn Summarizer,
    ) -> Result<Vec<String>> {
        summarizer.summarize(&source.bytes, source.format).await
    }

    pub fn align(&self, paragraphs: &[Paragraph], bullets: &[String]) -> Result<Vec<MappingEntry>> {
        Aligner::new(self.embedder.clone()).align(paragraphs, bullets)
    }

    pub fn assemble(
        &self,
        source: &DocumentSource,
        paragraphs: Vec<Paragraph>,
        mapping: Vec<MappingEntry>,
        summarizer_model: Option<String>,
        started: Instant,
    ) -> SummaryReport {
        let stats = DocumentStats::compute(&paragraphs, &mapping);
        SummaryReport {
            document: DocumentInfo {
                name: source.name.clone(),
                format: source.format.to_string(),
                size_bytes: source.bytes.len(),
            },
            paragraphs,
            mapping,
            stats,
            model_info: ModelInfo {
                embedding_model: self.embedding_model.clone(),
                summarizer_model,
            },
            processing_time_ms: started.elapsed().as_millis() as u64,
            generated_at: Utc::now(),
        }
    }

    /// Run the full document-to-mapping flow against a hosted summarizer.
    pub async fn run(
        &self,
        source: &DocumentSource,
        summarizer: &dyn Summarizer,
    ) -> Result<SummaryReport> {
        let started = Instant::now();

        let paragraphs = self.extract(source)?;
        // Fail before the network call when there is nothing to align
        // against; the aligner would reject the run anyway.
        if paragraphs.is_empty() {
            return Err(SummarizerError::InsufficientData(
                "document yielded no paragraphs".to_string(),
            ));
        }

        let bullets = self.summarize(source, summarizer).await?;
        let mapping = self.align(&paragraphs, &bullets)?;

        Ok(self.assemble(
            source,
            paragraphs,
            mapping,
            Some(summarizer.model().to_string()),
            started,
        ))
    }

    /// Align pre-generated summary bullets without calling the hosted API.
    pub fn run_offline(&self, source: &DocumentSource, bullets: &[String]) -> Result<SummaryReport> {
        let started = Instant::now();
        let paragraphs = self.extract(source)?;
        let mapping = self.align(&paragraphs, bullets)?;
        Ok(self.assemble(source, paragraphs, mapping, None, started))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::format::DocumentFormat;
    use async_trait::async_trait;

    /// Word-overlap embedder over a tiny fixed vocabulary, enough to steer
    /// bullets to the intended paragraphs deterministically.
    struct KeywordEmbedder {
        keywords: Vec<&'static str>,
    }

    impl Embedder for KeywordEmbedder {
        fn embed(&self, text: &str) -> Vec<f32> {
            let lower = text.to_lowercase();
            self.keywords
                .iter()
                .map(|k| if lower.contains(k) { 1.0 } else { 0.0 })
                .collect()
        }
    }

    struct FixedSummarizer {
        bullets: Vec<String>,
    }

    #[async_trait]
    impl Summarizer for FixedSummarizer {
        async fn summarize(
            &self,
            _bytes: &[u8],
            _format: DocumentFormat,
        ) -> Result<Vec<String>> {
            Ok(self.bullets.clone())
        }

        fn model(&self) -> &str {
            "fixed-test-model"
        }
    }

    fn lease_source() -> DocumentSource {
        let text = "The tenant shall pay rent monthly.\n\nEither party may terminate with 30 days notice.";
        DocumentSource {
            name: "lease.txt".to_string(),
            bytes: text.as_bytes().to_vec(),
            format: DocumentFormat::Txt,
        }
    }

    fn pipeline() -> SummaryPipeline {
        let embedder = KeywordEmbedder {
            keywords: vec!["rent", "notice"],
        };
        SummaryPipeline::new(Arc::new(embedder), "test-embeddings")
    }

    #[tokio::test]
    async fn test_run_produces_one_entry_per_bullet() {
        let summarizer = FixedSummarizer {
            bullets: vec![
                "Rent is due every month.".to_string(),
                "30 days notice ends the agreement.".to_string(),
            ],
        };

        let report = pipeline().run(&lease_source(), &summarizer).await.unwrap();

        assert_eq!(report.stats.paragraph_count, 2);
        assert_eq!(report.stats.insight_count, 2);
        assert_eq!(report.mapping[0].reference_paragraph_id, 0);
        assert_eq!(report.mapping[1].reference_paragraph_id, 1);
        assert_eq!(
            report.model_info.summarizer_model.as_deref(),
            Some("fixed-test-model")
        );
    }

    #[tokio::test]
    async fn test_run_fails_on_empty_document_before_summarizing() {
        let source = DocumentSource {
            name: "empty.txt".to_string(),
            bytes: b"   \n\n  ".to_vec(),
            format: DocumentFormat::Txt,
        };
        let summarizer = FixedSummarizer { bullets: vec![] };

        let err = pipeline().run(&source, &summarizer).await.unwrap_err();
        assert!(matches!(err, SummarizerError::InsufficientData(_)));
    }

    #[test]
    fn test_run_offline_skips_the_summarizer() {
        let bullets = vec!["Monthly rent obligation.".to_string()];
        let report = pipeline().run_offline(&lease_source(), &bullets).unwrap();

        assert_eq!(report.mapping.len(), 1);
        assert_eq!(report.mapping[0].reference_paragraph_id, 0);
        assert!(report.model_info.summarizer_model.is_none());
        assert_eq!(report.model_info.embedding_model, "test-embeddings");
    }
}
