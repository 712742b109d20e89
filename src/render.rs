use owo_colors::OwoColorize;
use std::fmt::Write as _;
use unicode_segmentation::UnicodeSegmentation;

use crate::types::{FactCheckResult, HistoryEntry, Verdict};

pub const EXAMPLE_CLAIMS: [&str; 4] = [
    "The Great Wall of China is visible from space with the naked eye.",
    "Humans only use 10% of their brains.",
    "Thomas Edison invented the light bulb.",
    "A penny dropped from the Empire State Building can be lethal.",
];

const HISTORY_CLAIM_WIDTH: usize = 72;

pub fn verdict_label(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::True => "True",
        Verdict::False => "False",
        Verdict::Mixed => "Mixed / Nuanced",
    }
}

fn paint(verdict: Verdict, text: &str, color: bool) -> String {
    if !color {
        return text.to_string();
    }
    match verdict {
        Verdict::True => text.green().bold().to_string(),
        Verdict::False => text.red().bold().to_string(),
        Verdict::Mixed => text.yellow().bold().to_string(),
    }
}

pub fn render_result(claim: &str, result: &FactCheckResult, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Claim: \"{}\"", claim.trim());
    let _ = writeln!(out, "Verdict: {}", paint(result.verdict, verdict_label(result.verdict), color));
    if !result.explanation.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", result.explanation);
    }
    if !result.sources.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Sources:");
        for (i, source) in result.sources.iter().enumerate() {
            if source.label() == source.uri() {
                let _ = writeln!(out, "  {}. {}", i + 1, source.uri());
            } else {
                let _ = writeln!(out, "  {}. {} <{}>", i + 1, source.label(), source.uri());
            }
        }
    }
    out
}

/// Text placed on the clipboard by a shell's copy action.
pub fn copy_text(result: &FactCheckResult) -> String {
    format!("Verdict: {}\n\n{}", verdict_label(result.verdict), result.explanation)
}

/// What `check` and `show` print: the full card, or only the copy text
/// when `--copy` is given.
pub fn present(claim: &str, result: &FactCheckResult, copy: bool, color: bool) -> String {
    if copy {
        return format!("{}\n", copy_text(result));
    }
    render_result(claim, result, color)
}

fn truncate_graphemes(text: &str, width: usize) -> String {
    let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let graphemes: Vec<&str> = single_line.graphemes(true).collect();
    if graphemes.len() <= width {
        return single_line;
    }
    let mut out: String = graphemes[..width - 1].concat();
    out.push('…');
    out
}

pub fn render_history(entries: &[HistoryEntry], color: bool) -> String {
    if entries.is_empty() {
        return "No history yet\nYour past checks will appear here.\n".to_string();
    }
    let mut out = String::new();
    for (i, entry) in entries.iter().enumerate() {
        let verdict = entry.result.verdict;
        let tag = format!("{:<7}", format!("[{}]", tag_text(verdict)));
        let _ = writeln!(
            out,
            "{:>3}  {} {}",
            i,
            paint(verdict, &tag, color),
            truncate_graphemes(&entry.original_claim, HISTORY_CLAIM_WIDTH)
        );
    }
    out
}

fn tag_text(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::True => "TRUE",
        Verdict::False => "FALSE",
        Verdict::Mixed => "MIXED",
    }
}
