//! The `mockview start` and `mockview resume` commands.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};

use mockview_core::coach::Coach;
use mockview_core::grade::{estimate_hire_chance, ThreadRandom};
use mockview_core::model::{AnswerFeedback, Difficulty, FeedbackKind, InterviewConfig, JobLevel};
use mockview_core::questions::{QuestionSet, QuestionSource};
use mockview_core::report::InterviewReport;
use mockview_core::session::{InterviewSession, SavedProgress};
use mockview_report::write_interview_html;
use mockview_store::User;

use crate::app::{App, GlobalArgs, Screen};

const QUIT_COMMAND: &str = ":quit";

/// Where the finished report goes.
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Defaults to `<data_dir>/reports`.
    pub report_dir: Option<PathBuf>,
    /// Also write an HTML page next to the JSON report.
    pub html: bool,
}

pub async fn start(
    global: &GlobalArgs,
    role: String,
    level: JobLevel,
    difficulty: Difficulty,
    options: ReportOptions,
) -> Result<()> {
    let mut app = App::load(global)?;
    let user = app.require_user()?;
    if app.progress.load(&user.email)?.is_some() {
        eprintln!("Note: starting a new interview replaces your unfinished one.");
    }

    let config = InterviewConfig {
        job_role: role.trim().to_string(),
        job_level: level,
        difficulty,
    };

    app.goto(Screen::Loading)?;
    let coach = app.coach();
    eprintln!(
        "Preparing your {} interview ({}, {} difficulty)...",
        config.job_role, config.job_level, config.difficulty
    );
    let questions = coach.generate_questions(&config).await;
    if questions.source == QuestionSource::Fallback {
        tracing::info!("using questions from the built-in bank");
    }

    let session = match begin_session(&app, &user, config, questions) {
        Ok(session) => session,
        Err(e) => {
            app.goto(Screen::Home)?;
            return Err(e);
        }
    };
    app.goto(Screen::Interview)?;
    run(&mut app, &coach, &user, session, &options).await
}

/// Create the session and save it before the first question is asked.
fn begin_session(
    app: &App,
    user: &User,
    config: InterviewConfig,
    questions: QuestionSet,
) -> Result<InterviewSession> {
    let session = InterviewSession::new(config, questions)?;
    app.progress
        .save(&user.email, &session.snapshot())
        .context("failed to save interview progress")?;
    Ok(session)
}

pub async fn resume(global: &GlobalArgs, options: ReportOptions) -> Result<()> {
    let mut app = App::load(global)?;
    let user = app.require_user()?;
    let progress = app
        .progress
        .load(&user.email)?
        .context("no unfinished interview to resume")?;
    let session = InterviewSession::restore(progress).context("saved interview is unusable")?;

    app.goto(Screen::Interview)?;
    let coach = app.coach();
    println!(
        "Resuming your {} interview at question {} of {}.",
        session.config().job_role,
        session.current_index() + 1,
        session.question_count()
    );
    run(&mut app, &coach, &user, session, &options).await
}

async fn run(
    app: &mut App,
    coach: &Coach,
    user: &User,
    mut session: InterviewSession,
    options: &ReportOptions,
) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    let progress = app.progress.clone();
    let mut save = |snapshot: &SavedProgress| -> Result<()> {
        progress
            .save(&user.email, snapshot)
            .context("failed to save interview progress")
    };

    match ask_questions(coach, &mut session, &mut input, &mut out, &mut save).await? {
        Completion::Quit => {
            save(&session.snapshot())?;
            app.goto(Screen::Home)?;
            println!(
                "\nProgress saved ({} of {} answered). Run `mockview resume` to continue.",
                session.answers().len(),
                session.question_count()
            );
            Ok(())
        }
        Completion::Finished => {
            app.goto(Screen::Results)?;
            finish(app, coach, user, &session, options).await
        }
    }
}

/// How the question loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Completion {
    Finished,
    Quit,
}

/// One submission read from the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
enum AnswerInput {
    Text(String),
    Quit,
}

/// Read lines until a blank line or end of input.
///
/// `:quit` on the first line, or end of input before any line, means quit.
fn read_answer<R: BufRead>(input: &mut R) -> io::Result<AnswerInput> {
    let mut lines: Vec<String> = Vec::new();
    let mut saw_input = false;
    loop {
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            if !saw_input {
                return Ok(AnswerInput::Quit);
            }
            break;
        }
        saw_input = true;
        let line = line.trim_end_matches(['\n', '\r']);
        if lines.is_empty() && line.trim() == QUIT_COMMAND {
            return Ok(AnswerInput::Quit);
        }
        if line.trim().is_empty() {
            break;
        }
        lines.push(line.to_string());
    }
    Ok(AnswerInput::Text(lines.join("\n")))
}

fn print_feedback<W: Write>(out: &mut W, feedback: &AnswerFeedback) -> io::Result<()> {
    for item in feedback {
        let label = match item.kind {
            FeedbackKind::Detailed => "Coach",
            FeedbackKind::Warning => "Warning",
            FeedbackKind::Tip => "Tip",
            FeedbackKind::Success => "Nice",
        };
        writeln!(out, "[{label}] {}", item.text)?;
    }
    Ok(())
}

/// Ask every remaining question, collecting answers and feedback.
///
/// `save` receives a snapshot after each answer that leaves the interview
/// unfinished.
async fn ask_questions<R, W>(
    coach: &Coach,
    session: &mut InterviewSession,
    input: &mut R,
    out: &mut W,
    save: &mut dyn FnMut(&SavedProgress) -> Result<()>,
) -> Result<Completion>
where
    R: BufRead,
    W: Write,
{
    let clock = Instant::now();
    let mut accounted = 0u64;

    while let Some(question) = session.current_question().map(str::to_owned) {
        writeln!(
            out,
            "\nQuestion {} of {}:\n{question}",
            session.current_index() + 1,
            session.question_count()
        )?;
        writeln!(out, "(End your answer with a blank line, or type {QUIT_COMMAND} to save and exit.)")?;
        out.flush()?;

        let answer = match read_answer(input)? {
            AnswerInput::Quit => {
                session.add_elapsed(clock.elapsed().as_secs() - accounted);
                return Ok(Completion::Quit);
            }
            AnswerInput::Text(text) => text,
        };
        if let Err(e) = session.validate_answer(&answer) {
            writeln!(out, "{e}")?;
            continue;
        }

        let feedback = coach
            .answer_feedback(session.config(), &question, &answer)
            .await;
        writeln!(out)?;
        print_feedback(out, &feedback)?;

        let now = clock.elapsed().as_secs();
        session.add_elapsed(now - accounted);
        accounted = now;
        session.submit_answer(answer, feedback)?;

        if !session.is_complete() {
            save(&session.snapshot())?;
        }
    }

    Ok(Completion::Finished)
}

async fn finish(
    app: &mut App,
    coach: &Coach,
    user: &User,
    session: &InterviewSession,
    options: &ReportOptions,
) -> Result<()> {
    let outcome = session.finalize()?;
    let (score, grade) = (outcome.score, outcome.grade);

    println!("\nInterview complete!");
    println!("Score: {score}/100");
    println!("Grade: {grade} ({})", grade.label());
    println!("{}", grade.summary());
    let hire_chance = estimate_hire_chance(score, &mut ThreadRandom);
    println!("Estimated hire chance: {hire_chance}%");

    let grade_feedback = coach
        .grade_feedback(grade, score, session.config(), session.answers())
        .await;
    let report = InterviewReport::new(
        session,
        outcome,
        grade_feedback.text,
        hire_chance,
        Some(user.email.clone()),
    );
    println!("Total time: {}", report.elapsed_display());
    println!("\nCoaching:\n{}", report.grade_feedback);

    app.history
        .record(&user.email, report.history_entry())
        .context("failed to record interview history")?;
    app.progress.clear(&user.email)?;

    let dir = options
        .report_dir
        .clone()
        .unwrap_or_else(|| app.reports_dir());
    let stem = format!("interview-{}", report.created_at.format("%Y-%m-%dT%H%M%S"));
    let json_path = dir.join(format!("{stem}.json"));
    report.save_json(&json_path)?;
    eprintln!("\nReport saved to: {}", json_path.display());
    if options.html {
        let html_path = dir.join(format!("{stem}.html"));
        write_interview_html(&report, &html_path)?;
        eprintln!("HTML report: {}", html_path.display());
    }

    app.goto(Screen::Home)?;
    Ok(())
}
