//! Core value types for extracted documents and summary mappings

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// One extracted, non-empty unit of source-document text.
///
/// The id is the 0-based position assigned in extraction order over the
/// surviving paragraphs; ids are contiguous, never reused or reordered, and
/// the record is immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub id: usize,
    pub text: String,
}

impl Paragraph {
    pub fn word_count(&self) -> usize {
        self.text.unicode_words().count()
    }
}

/// Association of one summary bullet with its best-matching paragraph.
///
/// `reference_paragraph_id` always names an id present in the paragraph
/// sequence the aligner was given; `reference_text` is the matched
/// paragraph's text copied at selection time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    pub summary_sentence: String,
    pub reference_paragraph_id: usize,
    pub reference_text: String,
}
