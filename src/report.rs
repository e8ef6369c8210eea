use std::fmt::Write;

use crate::models::DashboardSummary;

fn returning_share(summary: &DashboardSummary) -> f64 {
    if summary.total_records == 0 {
        0.0
    } else {
        100.0 * summary.returning_volunteers as f64 / summary.total_records as f64
    }
}

/// Renders the full markdown report for one snapshot.
pub fn build_report(summary: &DashboardSummary) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Volunteer Intake Dashboard");
    let _ = writeln!(output);
    let _ = writeln!(output, "- Total volunteers: {}", summary.total_records);
    let _ = writeln!(
        output,
        "- Returning volunteers: {} ({:.1}%)",
        summary.returning_volunteers,
        returning_share(summary)
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Registrations by Governorate");
    let _ = writeln!(output);

    if summary.governorates.is_empty() {
        let _ = writeln!(output, "No registrations in this snapshot.");
    } else {
        let _ = writeln!(output, "| Governorate | Volunteers | Share |");
        let _ = writeln!(output, "| --- | --- | --- |");
        for share in summary.governorates.iter() {
            let _ = writeln!(
                output,
                "| {} | {} | {:.1}% |",
                share.name, share.value, share.percentage
            );
        }
        let total: usize = summary.governorates.iter().map(|share| share.value).sum();
        let _ = writeln!(output, "| Total | {total} | 100% |");
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Registrations by University");
    let _ = writeln!(output);

    if summary.universities.is_empty() {
        let _ = writeln!(output, "No registrations in this snapshot.");
    } else {
        for share in summary.universities.iter() {
            let _ = writeln!(
                output,
                "- {}: {} volunteers ({:.1}%)",
                share.name, share.value, share.percentage
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Registrations in the Last 24 Hours");
    let _ = writeln!(output);

    for bucket in summary.hourly.iter() {
        let _ = writeln!(output, "- {:02}:00 | {}", bucket.hour, bucket.count);
    }

    output
}

/// Compact console rendition of the same summary, for one-shot runs and
/// the watch loop.
pub fn render_summary(summary: &DashboardSummary) -> String {
    let mut output = String::new();

    let _ = writeln!(
        output,
        "{} volunteers, {} returning ({:.1}%)",
        summary.total_records,
        summary.returning_volunteers,
        returning_share(summary)
    );

    let _ = writeln!(output, "By governorate:");
    if summary.governorates.is_empty() {
        let _ = writeln!(output, "  (no registrations)");
    }
    for share in summary.governorates.iter() {
        let _ = writeln!(
            output,
            "  - {}: {} ({:.1}%)",
            share.name, share.value, share.percentage
        );
    }

    let _ = writeln!(output, "By university:");
    if summary.universities.is_empty() {
        let _ = writeln!(output, "  (no registrations)");
    }
    for share in summary.universities.iter() {
        let _ = writeln!(
            output,
            "  - {}: {} ({:.1}%)",
            share.name, share.value, share.percentage
        );
    }

    let last_24h: usize = summary.hourly.iter().map(|bucket| bucket.count).sum();
    let _ = writeln!(output, "Last 24 hours: {last_24h} registrations");

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HourBucket, RankedShare};

    fn sample_summary() -> DashboardSummary {
        DashboardSummary {
            total_records: 4,
            returning_volunteers: 1,
            governorates: vec![
                RankedShare {
                    name: "Cairo".to_string(),
                    value: 3,
                    percentage: 75.0,
                },
                RankedShare {
                    name: "Giza".to_string(),
                    value: 1,
                    percentage: 25.0,
                },
            ],
            universities: vec![RankedShare {
                name: "جامعة عين شمس".to_string(),
                value: 4,
                percentage: 100.0,
            }],
            hourly: (0..24)
                .map(|hour| HourBucket { hour, count: 0 })
                .collect(),
        }
    }

    #[test]
    fn report_carries_totals_and_sections() {
        let report = build_report(&sample_summary());
        assert!(report.contains("# Volunteer Intake Dashboard"));
        assert!(report.contains("- Total volunteers: 4"));
        assert!(report.contains("- Returning volunteers: 1 (25.0%)"));
        assert!(report.contains("| Cairo | 3 | 75.0% |"));
        assert!(report.contains("| Total | 4 | 100% |"));
        assert!(report.contains("- جامعة عين شمس: 4 volunteers (100.0%)"));
        assert!(report.contains("- 00:00 | 0"));
        assert!(report.contains("- 23:00 | 0"));
    }

    #[test]
    fn empty_snapshot_renders_without_dividing_by_zero() {
        let summary = DashboardSummary {
            total_records: 0,
            returning_volunteers: 0,
            governorates: Vec::new(),
            universities: Vec::new(),
            hourly: (0..24)
                .map(|hour| HourBucket { hour, count: 0 })
                .collect(),
        };

        let report = build_report(&summary);
        assert!(report.contains("- Returning volunteers: 0 (0.0%)"));
        assert!(report.contains("No registrations in this snapshot."));
    }

    #[test]
    fn console_summary_is_compact_but_complete() {
        let rendered = render_summary(&sample_summary());
        assert!(rendered.contains("4 volunteers, 1 returning (25.0%)"));
        assert!(rendered.contains("  - Cairo: 3 (75.0%)"));
        assert!(rendered.contains("Last 24 hours: 0 registrations"));
    }
}
