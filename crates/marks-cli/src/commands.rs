//! Command implementations.

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span};

use marks_ingest::{LoadOptions, load_plan, read_sheet};
use marks_model::MarkSheet;
use marks_notify::{DryRunMailer, MessageTemplate, OutboxMailer, send_batch};
use marks_select::{Selection, SelectionSession, apply_plan};

use crate::cli::{NotifyArgs, SheetArgs};
use crate::summary::apply_table_style;
use crate::types::{DispatchStatus, NotifyResult, StudentSummary};

fn load(args: &SheetArgs) -> Result<MarkSheet> {
    let options = LoadOptions {
        sort_students: args.sort_students,
        sort_topics: args.sort_topics,
    };
    read_sheet(&args.file, options)
        .with_context(|| format!("load grade sheet {}", args.file.display()))
}

pub fn run_notify(args: &NotifyArgs) -> Result<NotifyResult> {
    let span = info_span!("notify", file = %args.sheet.file.display());
    let _guard = span.enter();

    let sheet = load(&args.sheet)?;

    let mut session = SelectionSession::new(&sheet);
    match &args.plan {
        Some(path) => {
            let plan = load_plan(path).context("load selection plan")?;
            apply_plan(&mut session, &plan).context("apply selection plan")?;
        }
        None => {
            info!("no selection plan given, selecting every mark");
            session.select_all();
        }
    }
    let selection = session.validate();

    let mut template = MessageTemplate::default();
    if let Some(signature) = &args.signature {
        template.signature.clone_from(signature);
    }

    let dry_run = !args.no_dry_run;
    let report = if dry_run {
        let mut mailer = DryRunMailer;
        send_batch(&sheet, &selection, &mut mailer, &template)
    } else {
        let mut mailer = OutboxMailer::create(&args.outbox)
            .with_context(|| format!("create outbox {}", args.outbox.display()))?;
        send_batch(&sheet, &selection, &mut mailer, &template)
    };

    let students = student_summaries(&sheet, &selection, &report);
    Ok(NotifyResult {
        dry_run,
        outbox: args.no_dry_run.then(|| args.outbox.clone()),
        students,
        report,
    })
}

fn student_summaries(
    sheet: &MarkSheet,
    selection: &Selection,
    report: &marks_notify::BatchReport,
) -> Vec<StudentSummary> {
    (0..sheet.student_count())
        .map(|student| {
            let marked = (0..sheet.topic_count())
                .filter(|&topic| sheet.has_mark(student, topic))
                .count();
            let announced = (0..sheet.topic_count())
                .filter(|&topic| {
                    sheet.has_mark(student, topic) && selection.is_selected(student, topic)
                })
                .count();
            let status = if report.sent.iter().any(|sent| sent.student == student) {
                DispatchStatus::Sent
            } else if report
                .failures
                .iter()
                .any(|failure| failure.student == student)
            {
                DispatchStatus::Failed
            } else {
                DispatchStatus::Skipped
            };
            StudentSummary {
                name: sheet.student(student).to_string(),
                surname: sheet.surname(student).to_string(),
                email: sheet.email(student).to_string(),
                announced,
                marked,
                status,
            }
        })
        .collect()
}

pub fn run_topics(args: &SheetArgs) -> Result<()> {
    let sheet = load(args)?;
    let mut table = Table::new();
    table.set_header(vec!["Topic", "Mean", "Highest", "Lowest", "Marks"]);
    apply_table_style(&mut table);
    for topic in 0..sheet.topic_count() {
        let name = if sheet.topic(topic).is_empty() {
            "(no header)".to_string()
        } else {
            sheet.topic(topic).to_string()
        };
        let marks = (0..sheet.student_count())
            .filter(|&student| sheet.has_mark(student, topic))
            .count();
        table.add_row(vec![
            name,
            sheet.mean(topic).to_string(),
            sheet.highest(topic).to_string(),
            sheet.lowest(topic).to_string(),
            marks.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_roster(args: &SheetArgs) -> Result<()> {
    let sheet = load(args)?;
    let mut table = Table::new();
    table.set_header(vec!["Student", "Surname", "Email", "Marks"]);
    apply_table_style(&mut table);
    for student in 0..sheet.student_count() {
        let name = if sheet.student(student).is_empty() {
            "(no name)".to_string()
        } else {
            sheet.student(student).to_string()
        };
        let marks = (0..sheet.topic_count())
            .filter(|&topic| sheet.has_mark(student, topic))
            .count();
        table.add_row(vec![
            name,
            sheet.surname(student).to_string(),
            sheet.email(student).to_string(),
            marks.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}
