//! The `signquiz play` command: an interactive terminal front end for the
//! attempt controller.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use signquiz_core::attempt::AttemptController;
use signquiz_core::model::{letter_position, option_letter, OptionId, QuestionRef};

use crate::config::load_config_from;

pub fn execute(
    catalog_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let catalog = config.load_catalog(catalog_path.as_deref())?;
    let mut controller = AttemptController::new(Arc::new(catalog));

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(&mut controller, stdin.lock(), &mut stdout.lock(), json)
}

/// A line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    /// Pick the option at this position.
    Choose(usize),
    Next,
    Back,
    Reset,
    Help,
    Quit,
    Unknown(String),
}

fn parse_input(line: &str) -> Input {
    let word = line.trim().to_lowercase();
    match word.as_str() {
        "n" | "next" | "finish" => Input::Next,
        "p" | "prev" | "back" => Input::Back,
        "r" | "reset" | "retry" => Input::Reset,
        "h" | "help" | "?" => Input::Help,
        "q" | "quit" | "exit" => Input::Quit,
        _ => {
            let mut chars = word.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => match letter_position(c) {
                    Some(position) => Input::Choose(position),
                    None => Input::Unknown(word),
                },
                _ => Input::Unknown(word),
            }
        }
    }
}

/// Drive `controller` from `input` until quit or end of input.
fn run_session<R: BufRead, W: Write>(
    controller: &mut AttemptController,
    input: R,
    out: &mut W,
    json: bool,
) -> Result<()> {
    render(controller, out)?;

    for line in input.lines() {
        let line = line.context("failed to read input")?;
        let command = parse_input(&line);
        if command == Input::Quit {
            break;
        }

        let was_completed = controller.is_completed();
        let redraw = handle(controller, command, out)?;

        if json && !was_completed && controller.is_completed() {
            if let Some(report) = controller.report() {
                writeln!(out, "{}", report.to_json()?)?;
            }
        }
        if redraw {
            render(controller, out)?;
        }
    }

    writeln!(out, "Bye.")?;
    Ok(())
}

/// Apply one input. Returns whether the screen should be redrawn.
fn handle<W: Write>(
    controller: &mut AttemptController,
    command: Input,
    out: &mut W,
) -> Result<bool> {
    match command {
        Input::Choose(position) => {
            if controller.is_completed() {
                writeln!(out, "Results are final. Press r to try again.")?;
                return Ok(false);
            }
            let target = controller
                .current_question()
                .and_then(|q| q.option_at(position).map(|id| (q.number(), id)));
            match target {
                Some((question, option)) => Ok(controller.select_option(question, option)),
                None => {
                    writeln!(out, "No option {}.", option_letter(position))?;
                    Ok(false)
                }
            }
        }
        Input::Next if controller.is_completed() => {
            if controller.advance_quiz() {
                return Ok(true);
            }
            let view = controller.view();
            if !view.has_next_quiz {
                writeln!(out, "That was the last quiz.")?;
            } else {
                writeln!(
                    out,
                    "Score at least {} correct to unlock the next quiz.",
                    view.required_correct
                )?;
            }
            Ok(false)
        }
        Input::Next => Ok(controller.advance()),
        Input::Back => {
            if controller.retreat() {
                return Ok(true);
            }
            if controller.is_completed() {
                writeln!(out, "Results are final. Press r to try again.")?;
            } else {
                writeln!(out, "Already at the first question.")?;
            }
            Ok(false)
        }
        Input::Reset => Ok(controller.reset()),
        Input::Help => {
            write_help(out)?;
            Ok(false)
        }
        Input::Unknown(word) => {
            writeln!(out, "Unknown command '{word}'. Type h for help.")?;
            Ok(false)
        }
        Input::Quit => Ok(false),
    }
}

fn render<W: Write>(controller: &AttemptController, out: &mut W) -> Result<()> {
    if controller.is_completed() {
        render_results(controller, out)
    } else {
        render_question(controller, out)
    }
}

fn render_question<W: Write>(controller: &AttemptController, out: &mut W) -> Result<()> {
    let quiz = controller.quiz();
    let view = controller.view();

    writeln!(out)?;
    writeln!(out, "== {} [{}] ==", quiz.title, quiz.difficulty)?;
    if !quiz.description.is_empty() {
        writeln!(out, "{}", quiz.description)?;
    }
    writeln!(
        out,
        "Q{}/{} | Quiz {}/{} | {}%",
        view.question_index + 1,
        view.question_count,
        view.quiz_index + 1,
        view.quiz_count,
        view.progress_pct
    )?;

    let Some(question) = controller.current_question() else {
        return Ok(());
    };
    let marker = |id: OptionId| {
        if view.current_selection == Some(id) {
            '>'
        } else {
            ' '
        }
    };

    match question {
        QuestionRef::ImageChoice(q) => {
            writeln!(out, "Question {}: {}", q.q_no, q.q_text)?;
            for (position, option) in q.options.iter().enumerate() {
                writeln!(
                    out,
                    " {} {}) {}  ({})",
                    marker(option.id),
                    option_letter(position),
                    option.name,
                    controller.catalog().image_for(option)
                )?;
            }
        }
        QuestionRef::SignChoice(q) => {
            writeln!(out, "Question {}: which gloss is signed here?", q.q_no)?;
            writeln!(out, "  [sign: {}]", q.question_image)?;
            for (position, option) in q.options.iter().enumerate() {
                writeln!(
                    out,
                    " {} {}) {}",
                    marker(option.id),
                    option_letter(position),
                    option.name
                )?;
            }
        }
    }

    let last = option_letter(question.option_count().saturating_sub(1)).to_ascii_lowercase();
    let next = if view.is_last_question { "finish" } else { "next" };
    writeln!(out, "[a-{last}] choose | n {next} | p back | r reset | q quit")?;
    Ok(())
}

fn render_results<W: Write>(controller: &AttemptController, out: &mut W) -> Result<()> {
    let view = controller.view();
    let tally = view.tally;

    writeln!(out)?;
    writeln!(out, "== Results: {} ==", view.quiz_title)?;
    writeln!(out, "{}/{} correct", tally.correct, tally.total)?;

    let mut table = Table::new();
    table.set_header(vec!["Correct", "Wrong", "Unanswered", "Total"]);
    table.add_row(vec![
        Cell::new(tally.correct),
        Cell::new(tally.wrong),
        Cell::new(tally.unanswered),
        Cell::new(tally.total),
    ]);
    writeln!(out, "{table}")?;

    if !view.gate_passed {
        writeln!(
            out,
            "Score at least {} correct to unlock the next quiz.",
            view.required_correct
        )?;
    } else if view.has_next_quiz {
        writeln!(out, "Next quiz unlocked.")?;
    } else {
        writeln!(out, "You finished the last quiz.")?;
    }

    writeln!(out, "r try again | n next quiz | q quit")?;
    Ok(())
}

fn write_help<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "Commands (n, p, r, h and q take precedence over option letters):")?;
    writeln!(out, "  a, b, c, ...  choose an option")?;
    writeln!(out, "  n             next question, finish, or next quiz on the results screen")?;
    writeln!(out, "  p             previous question")?;
    writeln!(out, "  r             reset the attempt / try again")?;
    writeln!(out, "  q             quit")?;
    Ok(())
}
