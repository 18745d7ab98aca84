use crate::infra::{load_config, parse_date, parse_position, parse_status};
use chrono::NaiveDate;
use clap::Args;
use interview_tracker::error::AppError;
use interview_tracker::interviews::{
    CsvRecordStore, FormAction, InterviewSession, InterviewStatus, Position, RecordCollection,
    RecordStore, StatusCounts, COLUMNS,
};
use interview_tracker::telemetry;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct SubmitArgs {
    /// Candidate name
    #[arg(long, default_value = "")]
    pub(crate) name: String,
    /// Position interviewed for
    #[arg(long, default_value = "...", value_parser = parse_position)]
    pub(crate) position: Position,
    /// Interview outcome
    #[arg(long, default_value = "...", value_parser = parse_status)]
    pub(crate) status: InterviewStatus,
    /// Interviewer name
    #[arg(long, default_value = "")]
    pub(crate) interviewer: String,
    /// Date of interview (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) date: Option<NaiveDate>,
    /// Interview round
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub(crate) round: u32,
    /// Question asked; repeat for several questions
    #[arg(long = "question")]
    pub(crate) questions: Vec<String>,
    /// Answer given; paired with questions by position
    #[arg(long = "answer")]
    pub(crate) answers: Vec<String>,
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    /// Destination file (defaults to stdout)
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

fn open_session(
    data_file: Option<PathBuf>,
) -> Result<InterviewSession<CsvRecordStore>, AppError> {
    let config = load_config(data_file)?;
    telemetry::init(&config.telemetry)?;
    let store = Arc::new(CsvRecordStore::new(config.storage.data_file));
    Ok(InterviewSession::start(store)?)
}

pub(crate) fn run_submit(args: SubmitArgs, data_file: Option<PathBuf>) -> Result<(), AppError> {
    let mut session = open_session(data_file)?;
    fill_form(&mut session, args);

    if session.handle(FormAction::Submit)?.is_some() {
        println!("Interview details added successfully!");
    }
    Ok(())
}

fn fill_form<S: RecordStore>(session: &mut InterviewSession<S>, args: SubmitArgs) {
    let SubmitArgs {
        name,
        position,
        status,
        interviewer,
        date,
        round,
        questions,
        answers,
    } = args;

    let form = session.form_mut();
    form.name = name;
    form.position = position;
    form.status = status;
    form.interviewer_name = interviewer;
    if let Some(date) = date {
        form.interview_date = date;
    }
    form.set_round(round);

    let count = questions.len().max(answers.len());
    form.set_question_count(count);
    let mut answers = answers.into_iter();
    let mut questions = questions.into_iter();
    for index in 0..count {
        let question = questions.next().unwrap_or_default();
        let answer = answers.next().unwrap_or_default();
        form.set_entry(index, question, answer);
    }
}

pub(crate) fn run_list(data_file: Option<PathBuf>) -> Result<(), AppError> {
    let session = open_session(data_file)?;
    let stdout = io::stdout();
    render_table(&mut stdout.lock(), session.records())?;
    Ok(())
}

pub(crate) fn run_summary(data_file: Option<PathBuf>) -> Result<(), AppError> {
    let session = open_session(data_file)?;
    let stdout = io::stdout();
    render_summary(&mut stdout.lock(), &session.summary())?;
    Ok(())
}

pub(crate) fn run_export(args: ExportArgs, data_file: Option<PathBuf>) -> Result<(), AppError> {
    let session = open_session(data_file)?;
    let text = session.export_csv()?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, text)?;
            println!(
                "Exported {} interviews to {}",
                session.records().len(),
                path.display()
            );
        }
        None => io::stdout().write_all(text.as_bytes())?,
    }
    Ok(())
}

pub(crate) fn run_clear(data_file: Option<PathBuf>) -> Result<(), AppError> {
    let mut session = open_session(data_file)?;
    session.clear_data()?;
    println!("Interview data cleared");
    Ok(())
}

fn render_table<W: Write>(out: &mut W, records: &RecordCollection) -> io::Result<()> {
    writeln!(out, "Interview Data")?;
    writeln!(out, "{}", COLUMNS.join(" | "))?;

    if records.is_empty() {
        writeln!(out, "(no interviews recorded)")?;
        return Ok(());
    }

    for record in records {
        writeln!(
            out,
            "{} | {} | {} | {} | {} | {} | {} | {}",
            record.name,
            record.position,
            record.status,
            record.interviewer_name,
            record.interview_date,
            record.round,
            record.questions,
            record.answers
        )?;
    }
    Ok(())
}

fn render_summary<W: Write>(out: &mut W, counts: &StatusCounts) -> io::Result<()> {
    writeln!(out, "Metrics")?;
    writeln!(out, "Total Entries: {}", counts.total_entries)?;
    for entry in counts.chart() {
        writeln!(out, "- {}: {}", entry.label, entry.count)?;
    }
    Ok(())
}
