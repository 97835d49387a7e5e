//! Paragraph extraction from raw document bytes

use crate::error::{Result, SummarizerError};
use crate::input::format::DocumentFormat;
use crate::processing::paragraph::Paragraph;
use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};

/// Extract the ordered paragraph sequence from an in-memory document.
///
/// Pure function of its inputs: the caller supplies the bytes, no disk or
/// network access happens here. Paragraph ids are assigned over the
/// surviving (trimmed, non-empty) segments, so they are contiguous from 0.
pub fn extract(bytes: &[u8], format: DocumentFormat) -> Result<Vec<Paragraph>> {
    let segments = match format {
        DocumentFormat::Txt => extract_txt(bytes)?,
        DocumentFormat::Pdf => extract_pdf(bytes)?,
        DocumentFormat::Docx => extract_docx(bytes)?,
    };
    Ok(index_paragraphs(segments))
}

fn extract_txt(bytes: &[u8]) -> Result<Vec<String>> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| SummarizerError::Decoding(format!("file is not valid UTF-8: {}", e)))?;
    Ok(split_blank_lines(text))
}

fn extract_pdf(bytes: &[u8]) -> Result<Vec<String>> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| SummarizerError::Format(format!("failed to parse PDF: {}", e)))?;

    // Pages are concatenated in page order, each followed by a single
    // newline. A page with no extractable text contributes nothing.
    let mut text = String::new();
    for page in pages {
        if !page.is_empty() {
            text.push_str(&page);
            text.push('\n');
        }
    }
    Ok(split_blank_lines(&text))
}

fn extract_docx(bytes: &[u8]) -> Result<Vec<String>> {
    let docx = read_docx(bytes)
        .map_err(|e| SummarizerError::Format(format!("failed to parse DOCX: {:?}", e)))?;

    // Each block-level paragraph element is one candidate segment. Tables,
    // images and section breaks are skipped.
    let mut segments = Vec::new();
    for child in &docx.document.children {
        if let DocumentChild::Paragraph(para) = child {
            segments.push(docx_paragraph_text(para));
        }
    }
    Ok(segments)
}

/// Concatenate the text runs of one DOCX paragraph element. Runs are parts
/// of the same sentence, so no separator is inserted between them.
fn docx_paragraph_text(para: &docx_rs::Paragraph) -> String {
    let mut parts = Vec::new();
    for child in &para.children {
        if let ParagraphChild::Run(run) = child {
            for rc in &run.children {
                if let RunChild::Text(t) = rc {
                    parts.push(t.text.clone());
                }
            }
        }
    }
    parts.join("")
}

/// Candidate segments are split on blank-line boundaries.
fn split_blank_lines(text: &str) -> Vec<String> {
    text.split("\n\n").map(|s| s.to_string()).collect()
}

/// Trim every candidate, drop the ones that are empty after trimming, and
/// assign ids as the 0-based index in the surviving sequence.
fn index_paragraphs(segments: Vec<String>) -> Vec<Paragraph> {
    segments
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .enumerate()
        .map(|(id, text)| Paragraph { id, text })
        .collect()
}
