//! HTML report generator.
//!
//! Produces self-contained HTML files with all CSS inlined. Every piece of
//! user-supplied text goes through [`html_escape`].

use anyhow::{Context, Result};
use std::path::Path;

use mockview_core::grade::Grade;
use mockview_core::model::{FeedbackKind, HistoryEntry};
use mockview_core::report::InterviewReport;
use mockview_core::statistics::HistoryStats;

/// Escape a string for safe HTML insertion.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Escape and keep the author's line breaks.
fn multiline(s: &str) -> String {
    html_escape(s).replace('\n', "<br>\n")
}

fn grade_class(grade: Grade) -> &'static str {
    match grade {
        Grade::A => "grade-a",
        Grade::B => "grade-b",
        Grade::C => "grade-c",
        Grade::F => "grade-f",
    }
}

fn page_start(html: &mut String, title: &str) {
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{}</title>\n", html_escape(title)));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");
}

fn page_end(html: &mut String) {
    html.push_str("</body>\n</html>");
}

/// Generate an HTML page for one finished interview.
pub fn generate_interview_html(report: &InterviewReport) -> String {
    let mut html = String::new();
    let role = html_escape(&report.config.job_role);
    page_start(&mut html, &format!("mockview: {} interview", report.config.job_role));

    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{role} interview</h1>\n"));
    html.push_str(&format!(
        "<p class=\"meta\">{} level | {} difficulty | {} questions | {}</p>\n",
        report.config.job_level,
        report.config.difficulty,
        report.questions.questions.len(),
        report.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    html.push_str("</header>\n");

    // Result summary
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str(&format!(
        "<div class=\"score {}\"><span class=\"value\">{}</span><span class=\"grade\">Grade {}</span></div>\n",
        grade_class(report.grade),
        report.score,
        report.grade
    ));
    html.push_str(&format!(
        "<h2>{}</h2>\n<p>{}</p>\n",
        report.grade.label(),
        report.grade.summary()
    ));
    html.push_str("<table class=\"summary\">\n<tbody>\n");
    html.push_str(&format!(
        "<tr><th>Estimated hire chance</th><td>{}%</td></tr>\n",
        report.hire_chance
    ));
    html.push_str(&format!(
        "<tr><th>Total time</th><td>{}</td></tr>\n",
        report.elapsed_display()
    ));
    html.push_str(&format!(
        "<tr><th>Average per answer</th><td>{:.0}s</td></tr>\n",
        report.breakdown.average_secs_per_answer
    ));
    html.push_str(&format!(
        "<tr><th>Pacing bonus</th><td>+{}</td></tr>\n",
        report.breakdown.time_bonus
    ));
    html.push_str(&format!(
        "<tr><th>Subtotal &times; multiplier</th><td>{} &times; {:.2}</td></tr>\n",
        report.breakdown.subtotal, report.breakdown.multiplier
    ));
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Overall coaching
    html.push_str("<section class=\"coaching\">\n<h2>Coaching</h2>\n");
    html.push_str(&format!("<p>{}</p>\n", multiline(&report.grade_feedback)));
    html.push_str("</section>\n");

    // Per-question details
    html.push_str("<section class=\"answers\">\n<h2>Your answers</h2>\n");
    for (i, question) in report.questions.questions.iter().enumerate() {
        html.push_str("<article class=\"answer\">\n");
        html.push_str(&format!(
            "<h3>Question {}</h3>\n<p class=\"question\">{}</p>\n",
            i + 1,
            html_escape(question)
        ));
        match report.answers.get(i) {
            Some(answer) => {
                html.push_str(&format!("<blockquote>{}</blockquote>\n", multiline(answer)));
                if let Some(points) = report.breakdown.answers.get(i) {
                    html.push_str(&format!(
                        "<p class=\"points\">{} words | length +{} | detail +{} | personal +{}</p>\n",
                        points.words, points.length, points.detail, points.personal
                    ));
                }
            }
            None => html.push_str("<p class=\"meta\">Not answered</p>\n"),
        }
        if let Some(items) = report.feedback.get(i) {
            if !items.is_empty() {
                html.push_str("<ul class=\"feedback\">\n");
                for item in items {
                    let class = match item.kind {
                        FeedbackKind::Detailed => "detailed",
                        FeedbackKind::Warning => "warning",
                        FeedbackKind::Tip => "tip",
                        FeedbackKind::Success => "success",
                    };
                    html.push_str(&format!(
                        "<li class=\"{class}\">{}</li>\n",
                        multiline(&item.text)
                    ));
                }
                html.push_str("</ul>\n");
            }
        }
        html.push_str("</article>\n");
    }
    html.push_str("</section>\n");

    page_end(&mut html);
    html
}

/// Generate an HTML page listing a user's history, newest first.
pub fn generate_history_html(entries: &[HistoryEntry], stats: Option<&HistoryStats>) -> String {
    let mut html = String::new();
    page_start(&mut html, "mockview: interview history");

    html.push_str("<header>\n<h1>Interview history</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">{} interviews</p>\n",
        entries.len()
    ));
    html.push_str("</header>\n");

    if let Some(stats) = stats {
        html.push_str("<section class=\"dashboard\">\n<h2>Summary</h2>\n");
        html.push_str("<table class=\"summary\">\n<tbody>\n");
        html.push_str(&format!(
            "<tr><th>Average score</th><td>{:.1}</td></tr>\n",
            stats.average_score
        ));
        html.push_str(&format!(
            "<tr><th>Best score</th><td>{}</td></tr>\n",
            stats.best_score
        ));
        if let Some(trend) = stats.trend {
            html.push_str(&format!("<tr><th>Trend</th><td>{trend}</td></tr>\n"));
        }
        let grades = Grade::all()
            .iter()
            .map(|g| format!("{g}: {}", stats.grades.get(g).copied().unwrap_or(0)))
            .collect::<Vec<_>>()
            .join(" | ");
        html.push_str(&format!("<tr><th>Grades</th><td>{grades}</td></tr>\n"));
        html.push_str("</tbody></table>\n");
        html.push_str(&generate_score_chart(entries));
        html.push_str("</section>\n");
    }

    html.push_str("<section class=\"results\">\n");
    if entries.is_empty() {
        html.push_str("<p>No interviews yet.</p>\n");
    } else {
        html.push_str("<table class=\"results-table\">\n");
        html.push_str("<thead><tr><th>Date</th><th>Role</th><th>Level</th><th>Difficulty</th><th>Score</th><th>Grade</th><th>Time</th></tr></thead>\n");
        html.push_str("<tbody>\n");
        for e in entries {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td class=\"{}\">{}</td><td>{}</td></tr>\n",
                e.date.format("%Y-%m-%d"),
                html_escape(&e.job_role),
                e.job_level,
                e.difficulty,
                e.score,
                grade_class(e.grade),
                e.grade,
                html_escape(&e.time),
            ));
        }
        html.push_str("</tbody></table>\n");
    }
    html.push_str("</section>\n");

    page_end(&mut html);
    html
}

/// Horizontal bars, one per attempt, oldest at the top.
fn generate_score_chart(entries: &[HistoryEntry]) -> String {
    let bar_height = 24;
    let max_width = 400;
    let padding = 8;
    let label_width = 120;

    let total_height = entries.len() * (bar_height + padding) + padding;
    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, entry) in entries.iter().rev().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let width = entry.score.min(100) as usize * max_width / 100;
        let color = match entry.grade {
            Grade::A => "#22c55e",
            Grade::B => "#3b82f6",
            Grade::C => "#eab308",
            Grade::F => "#ef4444",
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"13\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            entry.date.format("%b %d")
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{}</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            entry.score
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

fn write_file(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write HTML report to {}", path.display()))
}

/// Write an interview report page to a file.
pub fn write_interview_html(report: &InterviewReport, path: &Path) -> Result<()> {
    write_file(path, &generate_interview_html(report))
}

/// Write a history page to a file.
pub fn write_history_html(
    entries: &[HistoryEntry],
    stats: Option<&HistoryStats>,
    path: &Path,
) -> Result<()> {
    write_file(path, &generate_history_html(entries, stats))
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --muted: #6b7280; --a: #dcfce7; --b: #dbeafe; --c: #fef9c3; --f: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --a: #064e3b; --b: #1e3a8a; --c: #713f12; --f: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0 auto; max-width: 56rem; padding: 2rem; background: var(--bg); color: var(--fg); line-height: 1.5; }
h1, h2 { margin-top: 2rem; }
.meta { color: var(--muted); }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
.score { display: inline-flex; flex-direction: column; align-items: center; padding: 1rem 2rem; border-radius: 12px; }
.score .value { font-size: 3rem; font-weight: bold; }
.grade-a { background: var(--a); }
.grade-b { background: var(--b); }
.grade-c { background: var(--c); }
.grade-f { background: var(--f); }
.answer { border-top: 1px solid var(--border); padding: 1rem 0; }
.question { font-weight: 600; }
blockquote { margin: 0.5rem 0; padding: 0.5rem 1rem; border-left: 4px solid var(--border); }
.points { color: var(--muted); font-size: 0.85rem; }
.feedback li { margin: 0.25rem 0; }
.feedback .warning { color: #b45309; }
.feedback .success { color: #15803d; }
svg { margin: 1rem 0; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mockview_core::grade::classify;
    use mockview_core::model::{
        Difficulty, FeedbackItem, InterviewConfig, JobLevel, QUESTION_COUNT,
    };
    use mockview_core::questions::QuestionSet;
    use mockview_core::session::InterviewSession;
    use mockview_core::statistics::HistoryStats;

    fn make_test_report() -> InterviewReport {
        let config = InterviewConfig {
            job_role: "<script>Ops</script> Lead".into(),
            job_level: JobLevel::Mid,
            difficulty: Difficulty::Medium,
        };
        let mut session =
            InterviewSession::new(config, QuestionSet::fallback(Difficulty::Medium, JobLevel::Mid))
                .unwrap();
        for i in 0..QUESTION_COUNT {
            session
                .submit_answer(
                    format!("Answer {i}: I & my team shipped it"),
                    vec![FeedbackItem::new(FeedbackKind::Warning, "Too short")],
                )
                .unwrap();
        }
        session.add_elapsed(600);
        let outcome = session.finalize().unwrap();
        InterviewReport::new(&session, outcome, "Line one\nLine two".into(), 20, None)
    }

    fn entry(score: u32, role: &str) -> HistoryEntry {
        HistoryEntry {
            id: uuid::Uuid::new_v4(),
            job_role: role.into(),
            job_level: JobLevel::Entry,
            difficulty: Difficulty::Easy,
            score,
            grade: classify(score),
            date: Utc::now(),
            time: "4:10".into(),
            answers_count: 10,
        }
    }

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(
            html_escape(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#x27;&amp;&#x27;&lt;/a&gt;"
        );
    }

    #[test]
    fn interview_html_contains_required_elements() {
        let report = make_test_report();
        let html = generate_interview_html(&report);

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains(&format!("Grade {}", report.grade)));
        assert!(html.contains(report.grade.label()));
        assert!(html.contains("Line one<br>"));
        assert!(html.contains("Too short"));
        assert!(html.contains(&html_escape(&report.questions.questions[0])));
    }

    #[test]
    fn interview_html_escapes_user_text() {
        let html = generate_interview_html(&make_test_report());
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;Ops&lt;/script&gt; Lead"));
        assert!(html.contains("I &amp; my team"));
    }

    #[test]
    fn history_html_lists_entries_and_stats() {
        let entries = vec![entry(92, "Baker"), entry(45, "<b>Chef</b>")];
        let stats = HistoryStats::from_entries(&entries);
        let html = generate_history_html(&entries, stats.as_ref());

        assert!(html.contains("2 interviews"));
        assert!(html.contains("Baker"));
        assert!(html.contains("&lt;b&gt;Chef&lt;/b&gt;"));
        assert!(html.contains("Best score</th><td>92"));
        assert!(html.contains("<svg"));
    }

    #[test]
    fn empty_history_html() {
        let html = generate_history_html(&[], None);
        assert!(html.contains("No interviews yet."));
        assert!(!html.contains("<svg"));
    }

    #[test]
    fn html_report_write_to_file() {
        let report = make_test_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports/report.html");

        write_interview_html(&report, &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));

        let history_path = dir.path().join("history.html");
        write_history_html(&[entry(70, "Nurse")], None, &history_path).unwrap();
        assert!(std::fs::read_to_string(&history_path)
            .unwrap()
            .contains("Nurse"));
    }
}
