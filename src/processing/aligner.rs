//! Summary-to-paragraph alignment by embedding similarity

use crate::error::{Result, SummarizerError};
use crate::processing::embeddings::{cosine_similarity, Embedder};
use crate::processing::paragraph::{MappingEntry, Paragraph};
use std::sync::Arc;

/// Maps each summary bullet to its most similar source paragraph.
///
/// Both sides are embedded with one shared embedding service so the vectors
/// are comparable. Matching is independent per bullet: two bullets may
/// legitimately map to the same paragraph.
pub struct Aligner {
    embedder: Arc<dyn Embedder>,
}

impl Aligner {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self { embedder }
    }

    /// Produce one mapping entry per bullet, preserving bullet order.
    ///
    /// Fails with `InsufficientData` when there are no paragraphs to match
    /// against. Zero bullets is not an error: the result is simply empty.
    pub fn align(
        &self,
        paragraphs: &[Paragraph],
        bullets: &[String],
    ) -> Result<Vec<MappingEntry>> {
        if paragraphs.is_empty() {
            return Err(SummarizerError::InsufficientData(
                "cannot align a summary against an empty document".to_string(),
            ));
        }
        if bullets.is_empty() {
            return Ok(Vec::new());
        }

        let paragraph_texts: Vec<String> = paragraphs.iter().map(|p| p.text.clone()).collect();
        let paragraph_embeddings = self.embedder.embed_batch(&paragraph_texts);
        let bullet_embeddings = self.embedder.embed_batch(bullets);

        let mut mapping = Vec::with_capacity(bullets.len());
        for (bullet, bullet_embedding) in bullets.iter().zip(bullet_embeddings.iter()) {
            let best = best_match(bullet_embedding, &paragraph_embeddings)?;
            let paragraph = &paragraphs[best];
            mapping.push(MappingEntry {
                summary_sentence: bullet.clone(),
                reference_paragraph_id: paragraph.id,
                reference_text: paragraph.text.clone(),
            });
        }

        Ok(mapping)
    }
}

/// Index of the highest-scoring paragraph embedding. Ties keep the first
/// occurrence in paragraph order, so the lowest id wins deterministically.
fn best_match(bullet: &[f32], paragraphs: &[Vec<f32>]) -> Result<usize> {
    let mut best_index = 0;
    let mut best_score = f32::NEG_INFINITY;

    for (index, paragraph) in paragraphs.iter().enumerate() {
        let score = cosine_similarity(bullet, paragraph)?;
        if score > best_score {
            best_score = score;
            best_index = index;
        }
    }

    Ok(best_index)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Deterministic bag-of-words embedder: each distinct word gets its own
    /// dimension, so identical texts embed identically and word overlap is
    /// the only source of similarity.
    struct BagOfWordsEmbedder {
        vocabulary: Mutex<HashMap<String, usize>>,
    }

    impl BagOfWordsEmbedder {
        fn new() -> Self {
            Self {
                vocabulary: Mutex::new(HashMap::new()),
            }
        }
    }

    impl Embedder for BagOfWordsEmbedder {
        fn embed(&self, text: &str) -> Vec<f32> {
            let mut vector = vec![0.0f32; 256];
            let mut vocabulary = self.vocabulary.lock().unwrap();
            for word in text
                .to_lowercase()
                .split(|c: char| !c.is_alphanumeric())
                .filter(|w| !w.is_empty())
            {
                let next = vocabulary.len();
                let index = *vocabulary.entry(word.to_string()).or_insert(next);
                vector[index] += 1.0;
            }
            vector
        }
    }

    /// Embeds every text to the same vector, forcing similarity ties.
    struct ConstantEmbedder;

    impl Embedder for ConstantEmbedder {
        fn embed(&self, _text: &str) -> Vec<f32> {
            vec![1.0, 0.0, 1.0]
        }
    }

    fn paragraphs(texts: &[&str]) -> Vec<Paragraph> {
        texts
            .iter()
            .enumerate()
            .map(|(id, text)| Paragraph {
                id,
                text: text.to_string(),
            })
            .collect()
    }

    fn bullets(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_align_preserves_bullet_order_and_length() {
        let aligner = Aligner::new(Arc::new(BagOfWordsEmbedder::new()));
        let paras = paragraphs(&[
            "The tenant shall pay rent monthly.",
            "Either party may terminate with 30 days notice.",
            "Deposits are refundable within two weeks.",
        ]);
        let points = bullets(&[
            "Deposits refundable in two weeks.",
            "Rent is due every month.",
            "30 days notice ends the lease.",
        ]);

        let mapping = aligner.align(&paras, &points).unwrap();

        assert_eq!(mapping.len(), points.len());
        for (entry, bullet) in mapping.iter().zip(points.iter()) {
            assert_eq!(&entry.summary_sentence, bullet);
            assert!(paras.iter().any(|p| p.id == entry.reference_paragraph_id));
        }
    }

    #[test]
    fn test_align_lease_scenario() {
        let aligner = Aligner::new(Arc::new(BagOfWordsEmbedder::new()));
        let paras = paragraphs(&[
            "The tenant shall pay rent monthly.",
            "Either party may terminate with 30 days notice.",
        ]);
        let points = bullets(&[
            "Rent is due every month.",
            "30 days notice required to end lease.",
        ]);

        let mapping = aligner.align(&paras, &points).unwrap();

        assert_eq!(mapping[0].reference_paragraph_id, 0);
        assert_eq!(mapping[0].reference_text, "The tenant shall pay rent monthly.");
        assert_eq!(mapping[1].reference_paragraph_id, 1);
        assert_eq!(
            mapping[1].reference_text,
            "Either party may terminate with 30 days notice."
        );
    }

    #[test]
    fn test_align_identical_text_maps_to_its_paragraph() {
        let aligner = Aligner::new(Arc::new(BagOfWordsEmbedder::new()));
        let paras = paragraphs(&[
            "Confidential information stays confidential.",
            "Governing law is the law of the state.",
            "Invoices are payable within thirty days.",
        ]);
        let points = bullets(&["Governing law is the law of the state."]);

        let mapping = aligner.align(&paras, &points).unwrap();
        assert_eq!(mapping[0].reference_paragraph_id, 1);
    }

    #[test]
    fn test_align_ties_break_to_lowest_id() {
        let aligner = Aligner::new(Arc::new(ConstantEmbedder));
        let paras = paragraphs(&["First.", "Second.", "Third."]);
        let points = bullets(&["Anything at all."]);

        let mapping = aligner.align(&paras, &points).unwrap();
        assert_eq!(mapping[0].reference_paragraph_id, 0);
        assert_eq!(mapping[0].reference_text, "First.");
    }

    #[test]
    fn test_align_two_bullets_may_share_a_paragraph() {
        let aligner = Aligner::new(Arc::new(BagOfWordsEmbedder::new()));
        let paras = paragraphs(&[
            "The landlord maintains the premises.",
            "Unrelated arbitration clause.",
        ]);
        let points = bullets(&[
            "Landlord maintains the premises.",
            "The premises are maintained by the landlord.",
        ]);

        let mapping = aligner.align(&paras, &points).unwrap();
        assert_eq!(mapping[0].reference_paragraph_id, 0);
        assert_eq!(mapping[1].reference_paragraph_id, 0);
    }

    #[test]
    fn test_align_empty_bullets_returns_empty_mapping() {
        let aligner = Aligner::new(Arc::new(BagOfWordsEmbedder::new()));
        let paras = paragraphs(&["Some clause."]);

        let mapping = aligner.align(&paras, &[]).unwrap();
        assert!(mapping.is_empty());
    }

    #[test]
    fn test_align_empty_paragraphs_fails() {
        let aligner = Aligner::new(Arc::new(BagOfWordsEmbedder::new()));
        let points = bullets(&["A bullet with no possible target."]);

        let err = aligner.align(&[], &points).unwrap_err();
        assert!(matches!(err, SummarizerError::InsufficientData(_)));
    }
}
