//! Interactive terminal rendition of the editor flow.
//!
//! Mirrors the session state machine one-to-one: each loop iteration renders
//! the current step, collects one action, and applies it. All guard
//! refusals come back from the session as errors and are shown as notices —
//! the UI never enforces a rule itself, except the final-submission
//! confirmation, which by design lives with the user and not the machine.

use crate::catalog::{self, EssayType};
use crate::client::{FeedbackClient, HttpFeedbackClient};
use crate::error::CoachError;
use crate::feedback::{CategoryFeedback, FinalAssessment};
use crate::session::{EditorSession, Step, SUBMIT_WORD_MINIMUM};
use anyhow::Result;
use console::style;
use dialoguer::{Confirm, Input, Select};
use std::io::{self, BufRead};
use strum::IntoEnumIterator;

const CONFIRM_SUBMISSION: &str = "Are you ready to submit your essay for final assessment? \
     You can still check your progress if you want to make more improvements first.";

pub async fn run_write_flow(base_url: &str) -> Result<()> {
    let client = HttpFeedbackClient::new(base_url);
    let mut session = EditorSession::new();

    println!();
    println!("  {}", style("essaycoach").white().bold());
    println!("  {}", style("Pick a type, pick a topic, start writing.").dim());

    loop {
        let keep_going = match session.step() {
            Step::TypeSelection => select_type(&mut session)?,
            Step::TopicSelection => select_topic(&mut session)?,
            Step::Writing => writing_menu(&mut session, &client).await?,
        };
        if !keep_going {
            return Ok(());
        }
    }
}

/// Type-selection step. Returns false to quit.
fn select_type(session: &mut EditorSession) -> Result<bool> {
    let types: Vec<EssayType> = EssayType::iter().collect();
    let mut items: Vec<String> = types
        .iter()
        .map(|t| {
            let info = t.info();
            format!("{} — {}", info.title, info.description)
        })
        .collect();
    items.push("Quit".into());

    let idx = Select::new()
        .with_prompt("  What kind of essay do you want to write?")
        .items(&items)
        .default(0)
        .interact()?;

    let Some(&chosen) = types.get(idx) else {
        return Ok(false);
    };

    let info = chosen.info();
    println!();
    println!("  {}", style(info.title).white().bold());
    for tip in info.tips {
        println!("    • {tip}");
    }
    println!();

    session.choose_type(chosen)?;
    Ok(true)
}

/// Topic-selection step. Returns false to quit (never — back goes up a step).
fn select_topic(session: &mut EditorSession) -> Result<bool> {
    let Some(essay_type) = session.essay_type() else {
        // The machine guarantees a type here; bail defers to its guard.
        session.back().ok();
        return Ok(true);
    };

    let topics = catalog::suggested_for(essay_type);
    let mut items: Vec<String> = topics
        .iter()
        .map(|t| format!("{} — {}", t.title, t.description))
        .collect();
    items.push("Write about your own topic".into());
    items.push("← Back to essay types".into());

    let idx = Select::new()
        .with_prompt("  Choose your topic")
        .items(&items)
        .default(0)
        .interact()?;

    if let Some(topic) = topics.get(idx) {
        session.choose_topic(topic.title)?;
        return Ok(true);
    }

    if idx == topics.len() {
        let custom: String = Input::new()
            .with_prompt("  Enter your custom topic")
            .allow_empty(true)
            .interact_text()?;
        if let Err(e) = session.choose_topic(&custom) {
            println!("  {} {e}", style("!").yellow().bold());
        }
        return Ok(true);
    }

    session.back()?;
    Ok(true)
}

/// Writing step: one menu round. Returns false to quit.
async fn writing_menu(
    session: &mut EditorSession,
    client: &dyn FeedbackClient,
) -> Result<bool> {
    println!();
    println!(
        "  {}  {}",
        style(session.topic().unwrap_or("(no topic)")).white().bold(),
        style(format!(
            "{} words • {} characters",
            session.word_count(),
            session.char_count()
        ))
        .dim()
    );

    if session.is_submitted() {
        let items = ["Start a new essay", "Quit"];
        let idx = Select::new().items(&items).default(1).interact()?;
        if idx == 0 {
            session.reset();
            return Ok(true);
        }
        return Ok(false);
    }

    let items = [
        "Write (replace the draft)",
        "Check my progress",
        "Final submission",
        "← Back to topics",
        "Quit",
    ];
    let idx = Select::new().items(&items).default(0).interact()?;

    match idx {
        0 => {
            let text = read_draft()?;
            if let Err(e) = session.set_draft(&text) {
                notice(&e.to_string());
            } else {
                println!(
                    "  {} words, {} characters. Write at least 50 words to check your progress, or 100 for final submission.",
                    session.word_count(),
                    session.char_count()
                );
            }
        }
        1 => match session.check_progress(client).await {
            Ok(feedback) => {
                render_categories("Progress Feedback", &feedback.categories);
            }
            Err(e) => render_request_error(&e),
        },
        2 => {
            // Word-count guard comes before the confirmation prompt, so a
            // too-short draft never asks the question.
            if session.word_count() < SUBMIT_WORD_MINIMUM {
                notice(&format!(
                    "Please write at least {SUBMIT_WORD_MINIMUM} words before final submission."
                ));
                return Ok(true);
            }
            let confirmed = Confirm::new()
                .with_prompt(format!("  {CONFIRM_SUBMISSION}"))
                .default(false)
                .interact()?;
            if !confirmed {
                return Ok(true);
            }
            match session.final_submit(client).await {
                Ok(assessment) => render_assessment(assessment),
                Err(e) => render_request_error(&e),
            }
        }
        3 => {
            if let Err(e) = session.back() {
                notice(&e.to_string());
            }
        }
        _ => return Ok(false),
    }

    Ok(true)
}

/// Reads a multi-line draft from stdin, terminated by a lone `.` line.
fn read_draft() -> Result<String> {
    println!(
        "  {}",
        style("Write your essay. End with a single '.' on its own line.").dim()
    );
    let stdin = io::stdin();
    let mut lines = Vec::new();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim() == "." {
            break;
        }
        lines.push(line);
    }
    Ok(lines.join("\n"))
}

fn notice(message: &str) {
    println!("  {} {message}", style("!").yellow().bold());
}

fn render_request_error(error: &CoachError) {
    match error {
        CoachError::Session(e) => notice(&e.to_string()),
        _ => notice(&format!(
            "Failed to get feedback — {error}. Please make sure the server is running."
        )),
    }
}

fn render_categories(heading: &str, categories: &[CategoryFeedback]) {
    println!();
    println!("  {}", style(heading).white().bold());
    for entry in categories {
        println!("    {}", style(entry.category.to_string()).cyan().bold());
        for suggestion in &entry.suggestions {
            println!("      • {suggestion}");
        }
    }
    println!();
}

fn render_assessment(assessment: &FinalAssessment) {
    println!();
    println!("  {}", style("Essay Submitted!").green().bold());
    println!(
        "  {} {}",
        style("Overall score:").white().bold(),
        style(format!("{}/100", assessment.overall_score)).green()
    );
    println!("  {}", assessment.summary);
    render_categories("Final Assessment", &assessment.categories);
    println!(
        "  {}",
        style("Your essay is now read-only. You can start a new essay at any time.").dim()
    );
}
