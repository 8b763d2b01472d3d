//! The `mockview history` command.

use std::path::PathBuf;

use anyhow::Result;

use mockview_core::model::HistoryEntry;
use mockview_core::statistics::HistoryStats;
use mockview_report::write_history_html;

use crate::app::{App, GlobalArgs, Screen};

pub fn execute(global: &GlobalArgs, html: Option<PathBuf>) -> Result<()> {
    let mut app = App::load(global)?;
    let user = app.require_user()?;
    app.goto(Screen::History)?;

    let entries = app.history.load(&user.email)?;
    let stats = HistoryStats::from_entries(&entries);

    if entries.is_empty() {
        println!("No interviews yet. Run `mockview start --role <ROLE>` to begin.");
    } else {
        print_table(&entries);
        if let Some(stats) = &stats {
            print_stats(stats);
        }
    }

    if let Some(path) = html {
        write_history_html(&entries, stats.as_ref(), &path)?;
        eprintln!("HTML history: {}", path.display());
    }

    app.goto(Screen::Home)?;
    Ok(())
}

fn print_table(entries: &[HistoryEntry]) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec![
        "Date",
        "Role",
        "Level",
        "Difficulty",
        "Score",
        "Grade",
        "Time",
    ]);

    for e in entries {
        table.add_row(vec![
            Cell::new(e.date.format("%Y-%m-%d")),
            Cell::new(&e.job_role),
            Cell::new(e.job_level),
            Cell::new(e.difficulty),
            Cell::new(e.score),
            Cell::new(format!("{} ({})", e.grade, e.grade.label())),
            Cell::new(&e.time),
        ]);
    }

    println!("{table}");
}

fn print_stats(stats: &HistoryStats) {
    println!(
        "\n{} interviews | average {:.1} | best {} | latest {}",
        stats.attempts, stats.average_score, stats.best_score, stats.latest_score
    );
    if let Some(trend) = stats.trend {
        println!("Trend: {trend}");
    }
}
