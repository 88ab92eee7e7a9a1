//! HTML Report
//!
//! Builds the self-contained document that is printed to PDF. The markup
//! lives in `templates/report.html`.

use askama::Template;

use super::ReportResult;
use crate::candidate::{format_timestamp, Candidate, Dimension};

/// Placeholder for empty fields
const EMPTY: &str = "–";

#[derive(Template)]
#[template(path = "report.html")]
struct ReportTemplate<'a> {
    id: &'a str,
    created: String,
    consent: String,
    completeness: String,
    leading: Vec<Section<'a>>,
    ratings: Vec<RatingRow>,
    trailing: Vec<Section<'a>>,
}

struct Section<'a> {
    title: &'static str,
    body: &'a str,
}

impl<'a> Section<'a> {
    fn new(title: &'static str, body: &'a str) -> Self {
        let body = if body.trim().is_empty() { EMPTY } else { body };
        Self { title, body }
    }
}

struct RatingRow {
    label: &'static str,
    value: String,
}

/// Render the evaluation report for one candidate
pub fn build_report_html(candidate: &Candidate) -> ReportResult<String> {
    let ratings = Dimension::ALL
        .into_iter()
        .map(|dimension| RatingRow {
            label: dimension.label(),
            value: candidate
                .ratings
                .get(dimension)
                .map(|r| r.to_string())
                .unwrap_or_else(|| EMPTY.to_string()),
        })
        .collect();

    let template = ReportTemplate {
        id: &candidate.id,
        created: format_timestamp(&candidate.created_at),
        consent: consent_line(candidate),
        completeness: candidate.ratings.completeness().message(),
        leading: vec![
            Section::new("Self-reflection", &candidate.self_reflection),
            Section::new(
                "Consistency of self-reflection",
                &candidate.reflection_consistency,
            ),
        ],
        ratings,
        trailing: vec![
            Section::new("Notes", &candidate.notes),
            Section::new("STAR notes", &candidate.star_notes),
            Section::new("VeSiEr notes", &candidate.vesier_notes),
            Section::new("Conclusion", &candidate.conclusion),
        ],
    };

    Ok(template.render()?)
}

fn consent_line(candidate: &Candidate) -> String {
    match (candidate.consented, &candidate.consent_date) {
        (true, Some(date)) => format!("Consent given {}", format_timestamp(date)),
        (true, None) => "Consent given".to_string(),
        (false, _) => "No consent recorded".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::Rating;
    use chrono::Utc;

    #[test]
    fn test_report_escapes_user_text() {
        let mut candidate = Candidate::new("BW-2026-12345", Utc::now());
        candidate.notes = "<script>alert(1)</script>".to_string();
        candidate.conclusion = "Fish & chips <b>".to_string();

        let html = build_report_html(&candidate).unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Fish &amp; chips &lt;b&gt;"));
    }

    #[test]
    fn test_report_lists_every_dimension() {
        let mut candidate = Candidate::new("BW-2026-12345", Utc::now());
        candidate
            .ratings
            .set(Dimension::Teamwork, Rating::new(5).unwrap());

        let html = build_report_html(&candidate).unwrap();
        for dimension in Dimension::ALL {
            assert!(html.contains(dimension.label()));
        }
        assert!(html.contains("<tr><td>Teamwork</td><td>5</td></tr>"));
        assert!(html.contains("<tr><td>Motivation</td><td>–</td></tr>"));
        assert!(html.contains("1 of 7 dimensions rated"));
        assert!(html.contains("No consent recorded"));
    }

    #[test]
    fn test_report_empty_sections_show_placeholder() {
        let mut candidate = Candidate::new("BW-2026-12345", Utc::now());
        candidate.self_reflection = "Plans ahead.".to_string();
        candidate.star_notes = "   ".to_string();

        let html = build_report_html(&candidate).unwrap();
        assert!(html.contains("<h1>Evaluation for candidate BW-2026-12345</h1>"));
        assert!(html.contains("<h2>Self-reflection</h2>\n<p>Plans ahead.</p>"));
        assert!(html.contains("<h2>STAR notes</h2>\n<p>–</p>"));
        assert!(html.contains("<h2>Conclusion</h2>\n<p>–</p>"));
    }
}
