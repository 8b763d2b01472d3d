//! The `mockview score` command: score a set of answers without an interview.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use mockview_core::grade::{classify, Grade};
use mockview_core::model::Difficulty;
use mockview_core::scoring::ScoreBreakdown;

#[derive(Serialize)]
struct ScoreOutput<'a> {
    score: u32,
    grade: Grade,
    label: &'a str,
    breakdown: &'a ScoreBreakdown,
}

pub fn execute(answers_path: &Path, difficulty: Difficulty, elapsed: u64, json: bool) -> Result<()> {
    let content = std::fs::read_to_string(answers_path)
        .with_context(|| format!("failed to read answers from {}", answers_path.display()))?;
    let answers: Vec<String> = serde_json::from_str(&content)
        .context("answers file must be a JSON array of strings")?;

    let breakdown = ScoreBreakdown::compute(&answers, difficulty, elapsed)?;
    let grade = classify(breakdown.score);

    if json {
        let output = ScoreOutput {
            score: breakdown.score,
            grade,
            label: grade.label(),
            breakdown: &breakdown,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_breakdown(&breakdown);
    println!("\nScore: {}/100", breakdown.score);
    println!("Grade: {grade} ({})", grade.label());
    println!("{}", grade.summary());
    Ok(())
}

fn print_breakdown(breakdown: &ScoreBreakdown) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Answer", "Words", "Length", "Detail", "Personal", "Points"]);
    for (i, points) in breakdown.answers.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(points.words),
            Cell::new(points.length),
            Cell::new(points.detail),
            Cell::new(points.personal),
            Cell::new(points.total()),
        ]);
    }
    println!("{table}");
    println!(
        "Pacing: {:.0}s per answer, +{}",
        breakdown.average_secs_per_answer, breakdown.time_bonus
    );
    println!(
        "Subtotal {} x {:.2} ({} difficulty)",
        breakdown.subtotal, breakdown.multiplier, breakdown.difficulty
    );
}
