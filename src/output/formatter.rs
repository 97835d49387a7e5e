//! Output formatters for the summary report

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::SummaryReport;
use colored::Colorize;

/// Render a report in the requested format.
pub fn render(report: &SummaryReport, format: &OutputFormat, detailed: bool) -> Result<String> {
    match format {
        OutputFormat::Console => Ok(render_console(report, detailed)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Markdown => Ok(render_markdown(report, detailed)),
    }
}

/// Two-pane console view: the document paragraphs followed by the summary
/// insights, each insight tagged with the paragraph it references.
fn render_console(report: &SummaryReport, detailed: bool) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "\n{}\n",
        "Document Analysis Complete".bold().underline()
    ));
    out.push_str(&format!(
        "{} ({}, {} bytes)\n\n",
        report.document.name.bold(),
        report.document.format,
        report.document.size_bytes
    ));

    out.push_str(&format!(
        "  {} paragraphs analyzed | {} key insights | {} words processed\n\n",
        report.stats.paragraph_count.to_string().cyan(),
        report.stats.insight_count.to_string().cyan(),
        report.stats.total_words.to_string().cyan()
    ));

    if detailed {
        out.push_str(&format!("{}\n", "Document Content".bold()));
        for paragraph in &report.paragraphs {
            out.push_str(&format!(
                "  {} {} ({} words)\n",
                format!("[{}]", paragraph.id + 1).dimmed(),
                paragraph.text,
                paragraph.word_count()
            ));
        }
        out.push('\n');
    }

    out.push_str(&format!("{}\n", "Executive Summary".bold()));
    for (index, entry) in report.mapping.iter().enumerate() {
        out.push_str(&format!(
            "  {} {}\n",
            format!("{}.", index + 1).green().bold(),
            entry.summary_sentence
        ));
        out.push_str(&format!(
            "     {}\n",
            format!("references paragraph {}", entry.reference_paragraph_id + 1).dimmed()
        ));
        if detailed {
            out.push_str(&format!("     {}\n", entry.reference_text.dimmed().italic()));
        }
    }

    out.push_str(&format!(
        "\n{} embedding: {}{}, {}ms\n",
        "Models:".dimmed(),
        report.model_info.embedding_model,
        report
            .model_info
            .summarizer_model
            .as_deref()
            .map(|m| format!(", summarizer: {}", m))
            .unwrap_or_default(),
        report.processing_time_ms
    ));

    out
}

fn render_markdown(report: &SummaryReport, detailed: bool) -> String {
    let mut out = String::new();

    out.push_str(&format!("# Summary: {}\n\n", report.document.name));
    out.push_str(&format!(
        "Generated {} | {} paragraphs | {} insights | {} words\n\n",
        report.generated_at.format("%Y-%m-%d %H:%M UTC"),
        report.stats.paragraph_count,
        report.stats.insight_count,
        report.stats.total_words
    ));

    out.push_str("## Executive Summary\n\n");
    for entry in &report.mapping {
        out.push_str(&format!(
            "- {} *(paragraph {})*\n",
            entry.summary_sentence,
            entry.reference_paragraph_id + 1
        ));
        if detailed {
            out.push_str(&format!("  > {}\n", entry.reference_text));
        }
    }

    if detailed {
        out.push_str("\n## Document Content\n\n");
        for paragraph in &report.paragraphs {
            out.push_str(&format!("**{}.** {}\n\n", paragraph.id + 1, paragraph.text));
        }
    }

    out
}
