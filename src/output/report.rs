//! Summary report structures

use crate::processing::paragraph::{MappingEntry, Paragraph};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Full result of one summarization run, suitable for direct rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryReport {
    pub document: DocumentInfo,
    pub paragraphs: Vec<Paragraph>,
    pub mapping: Vec<MappingEntry>,
    pub stats: DocumentStats,
    pub model_info: ModelInfo,
    pub processing_time_ms: u64,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub name: String,
    pub format: String,
    pub size_bytes: usize,
}

/// Headline numbers: paragraphs analyzed, key insights, words processed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentStats {
    pub paragraph_count: usize,
    pub insight_count: usize,
    pub total_words: usize,
}

impl DocumentStats {
    pub fn compute(paragraphs: &[Paragraph], mapping: &[MappingEntry]) -> Self {
        Self {
            paragraph_count: paragraphs.len(),
            insight_count: mapping.len(),
            total_words: paragraphs.iter().map(|p| p.word_count()).sum(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub embedding_model: String,
    pub summarizer_model: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_compute() {
        let paragraphs = vec![
            Paragraph {
                id: 0,
                text: "The tenant shall pay rent monthly.".to_string(),
            },
            Paragraph {
                id: 1,
                text: "Deposits are refundable.".to_string(),
            },
        ];
        let mapping = vec![MappingEntry {
            summary_sentence: "Rent is due monthly.".to_string(),
            reference_paragraph_id: 0,
            reference_text: paragraphs[0].text.clone(),
        }];

        let stats = DocumentStats::compute(&paragraphs, &mapping);
        assert_eq!(stats.paragraph_count, 2);
        assert_eq!(stats.insight_count, 1);
        assert_eq!(stats.total_words, 9);
    }
}
