//! Per-answer feedback: wrapping model output, and the local heuristic
//! used when the model is unavailable.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::{word_count, AnswerFeedback, FeedbackItem, FeedbackKind};

/// Shown when the model answered with no text at all.
pub const EMPTY_MODEL_FEEDBACK: &str = "Feedback generation in progress...";

/// Shown when grade feedback could not be generated.
pub const GRADE_FEEDBACK_UNAVAILABLE: &str =
    "Unable to generate detailed feedback at this time. Please review your answers and try again.";

const BRIEF_WORDS: usize = 50;
const THOROUGH_WORDS: usize = 150;

fn metric_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\d+%|\d+ [a-z]+|increased|decreased|improved").expect("static regex")
    })
}

/// Wrap model-written coaching text as a single `detailed` item.
pub fn detailed_feedback(text: &str) -> AnswerFeedback {
    let text = if text.trim().is_empty() {
        EMPTY_MODEL_FEEDBACK
    } else {
        text.trim()
    };
    vec![FeedbackItem::new(FeedbackKind::Detailed, text)]
}

/// Whether the answer shows any sign of situation/task/result structure.
pub fn has_star_structure(answer: &str) -> bool {
    let lower = answer.to_lowercase();
    ["situation", "task", "result"]
        .iter()
        .any(|w| lower.contains(w))
}

/// Whether the answer names an example or a measurable outcome.
pub fn has_specifics(answer: &str) -> bool {
    let lower = answer.to_lowercase();
    ["example", "specifically", "for instance"]
        .iter()
        .any(|w| lower.contains(w))
        || metric_pattern().is_match(answer)
}

/// Rule-based feedback for one answer.
pub fn heuristic_feedback(answer: &str, job_role: &str) -> AnswerFeedback {
    let role = job_role.trim();
    let words = word_count(answer.trim());
    let mut items = Vec::new();

    if words < BRIEF_WORDS {
        items.push(FeedbackItem::new(
            FeedbackKind::Warning,
            format!(
                "Your answer was brief ({words} words). Hiring managers for {role} roles expect \
                 detailed, comprehensive answers. Aim for 150-250 words (2-3 minutes speaking)."
            ),
        ));
        items.push(FeedbackItem::new(
            FeedbackKind::Tip,
            format!(
                "WHAT TO SAY INSTEAD: Include specific examples of tools, technologies, or \
                 methodologies you've used in {role} work. Mention measurable outcomes and your \
                 specific role in achieving them."
            ),
        ));
    } else if words >= THOROUGH_WORDS {
        items.push(FeedbackItem::new(
            FeedbackKind::Success,
            "Excellent answer length - comprehensive and detailed.",
        ));
    }

    if !has_star_structure(answer) {
        items.push(FeedbackItem::new(
            FeedbackKind::Warning,
            "GAP: Your answer lacks clear structure. Hiring managers look for organized, \
             story-driven responses.",
        ));
        items.push(FeedbackItem::new(
            FeedbackKind::Tip,
            "WHAT TO SAY INSTEAD: Structure your answer with the STAR method: Situation \
             (context), Task (your responsibility), Action (the steps you took and the skills \
             you used), Result (measurable outcomes).",
        ));
    }

    if !has_specifics(answer) {
        items.push(FeedbackItem::new(
            FeedbackKind::Warning,
            format!(
                "GAP: Missing specific examples and metrics. {role} hiring managers want to \
                 hear concrete evidence of your skills."
            ),
        ));
        items.push(FeedbackItem::new(
            FeedbackKind::Tip,
            format!(
                "WHAT TO SAY INSTEAD: Mention specific tools, technologies, or frameworks used \
                 in {role} work. Include measurable results (e.g. \"reduced processing time by \
                 30%\", \"led a team of 8\"). Name actual projects, clients, or initiatives."
            ),
        ));
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(items: &[FeedbackItem]) -> Vec<FeedbackKind> {
        items.iter().map(|i| i.kind).collect()
    }

    #[test]
    fn detailed_feedback_wraps_text() {
        let items = detailed_feedback("  STRENGTHS: clear  ");
        assert_eq!(items, vec![FeedbackItem::new(FeedbackKind::Detailed, "STRENGTHS: clear")]);
        assert_eq!(detailed_feedback("   ")[0].text, EMPTY_MODEL_FEEDBACK);
    }

    #[test]
    fn brief_unstructured_answer_gets_all_warnings() {
        let items = heuristic_feedback("I like computers", "Backend Engineer");
        assert_eq!(
            kinds(&items),
            vec![
                FeedbackKind::Warning,
                FeedbackKind::Tip,
                FeedbackKind::Warning,
                FeedbackKind::Tip,
                FeedbackKind::Warning,
                FeedbackKind::Tip,
            ]
        );
        assert!(items[0].text.contains("brief (3 words)"));
        assert!(items[0].text.contains("Backend Engineer roles"));
    }

    #[test]
    fn long_structured_specific_answer_only_gets_praise() {
        let filler = vec!["delivery"; 150].join(" ");
        let answer = format!(
            "The situation was tight. For example we cut latency 40% as a result. {filler}"
        );
        let items = heuristic_feedback(&answer, "SRE");
        assert_eq!(kinds(&items), vec![FeedbackKind::Success]);
    }

    #[test]
    fn mid_length_answer_gets_no_length_item() {
        let answer = vec!["word"; 60].join(" ") + " result example";
        assert!(heuristic_feedback(&answer, "QA").is_empty());
    }

    #[test]
    fn metrics_count_as_specifics() {
        assert!(has_specifics("We grew revenue 25%"));
        assert!(has_specifics("I managed 8 Engineers"));
        assert!(has_specifics("Throughput IMPROVED a lot"));
        assert!(!has_specifics("I did good work on things"));
    }

    #[test]
    fn star_detection() {
        assert!(has_star_structure("My TASK was clear"));
        assert!(has_star_structure("The results were good"));
        assert!(!has_star_structure("I wrote code"));
    }
}
