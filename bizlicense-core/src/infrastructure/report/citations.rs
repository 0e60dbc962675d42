// bizlicense-core/src/infrastructure/report/citations.rs

use regex::Regex;

use crate::domain::{MatchResult, RequirementLevel};

/// Appends a `*Source: ...*` line at the end of the mandatory and recommended
/// sections of a model-written report, listing the authorities behind them.
///
/// Sections are located by their numbered headings (`## 2. Mandatory ...`,
/// `## 3. Recommended ...`). A report without those headings is returned as is.
pub struct CitationAnnotator {
    sections: Vec<(RequirementLevel, Regex, Regex)>,
}

impl CitationAnnotator {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            sections: vec![
                (
                    RequirementLevel::Mandatory,
                    Regex::new(r"(?mi)^##\s*2\.\s*mandatory requirements")?,
                    Regex::new(r"(?m)^##\s*3\.")?,
                ),
                (
                    RequirementLevel::Recommended,
                    Regex::new(r"(?mi)^##\s*3\.\s*recommended requirements")?,
                    Regex::new(r"(?m)^##\s*4\.")?,
                ),
            ],
        })
    }

    pub fn annotate(&self, report: &str, matched: &MatchResult<'_>) -> String {
        let mut out = report.to_string();
        for (level, start, next) in &self.sections {
            let authorities = matched.authorities(*level);
            if authorities.is_empty() {
                continue;
            }
            out = annotate_section(&out, start, next, &authorities);
        }
        out
    }
}

fn annotate_section(report: &str, start: &Regex, next: &Regex, authorities: &[&str]) -> String {
    let Some(heading) = start.find(report) else {
        return report.to_string();
    };
    let end = next
        .find_at(report, heading.end())
        .map(|m| m.start())
        .unwrap_or(report.len());

    let mut out = String::with_capacity(report.len() + 64);
    out.push_str(report[..end].trim_end());
    out.push_str("\n\n*Source: ");
    out.push_str(&authorities.join(", "));
    out.push_str("*\n");
    if end < report.len() {
        out.push('\n');
        out.push_str(&report[end..]);
    }
    out
}
