use crate::types::Verdict;

pub const VERDICT_PREFIX: &str = "VERDICT:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedVerdict {
    pub verdict: Verdict,
    pub explanation: String,
}

/// Structures a free-text model reply.
///
/// The verdict line is the first line that starts with `VERDICT:` in any case.
/// Its text decides the verdict (`TRUE` is looked for before `FALSE`, anything
/// else is MIXED) and everything after it becomes the explanation. Text before
/// the verdict line is dropped. A reply without a verdict line is MIXED with
/// the whole reply as explanation; this never fails.
pub fn parse_verdict(raw: &str) -> ParsedVerdict {
    let lines: Vec<&str> = raw.split('\n').collect();
    let found = lines
        .iter()
        .enumerate()
        .map(|(i, line)| (i, line.to_uppercase()))
        .find(|(_, upper)| upper.starts_with(VERDICT_PREFIX));

    let Some((idx, upper)) = found else {
        return ParsedVerdict { verdict: Verdict::Mixed, explanation: raw.trim().to_string() };
    };

    ParsedVerdict {
        verdict: classify(&upper),
        explanation: lines[idx + 1..].join("\n").trim().to_string(),
    }
}

fn classify(upper_line: &str) -> Verdict {
    if upper_line.contains("TRUE") {
        Verdict::True
    } else if upper_line.contains("FALSE") {
        Verdict::False
    } else {
        Verdict::Mixed
    }
}
