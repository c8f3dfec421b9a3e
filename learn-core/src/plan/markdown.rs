//! Markdown export of a plan ("learning hub" document)

use std::fmt::Write as _;

use super::model::{Plan, Subject};

/// Markdown only has six heading levels
const MAX_HEADING_LEVEL: usize = 6;

/// Anchor id for a heading: lowercase, spaces replaced by dashes
pub fn anchor_name(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

/// Render a plan as a Markdown document with a linked table of contents
///
/// `model` is mentioned under the title when known.
pub fn plan_markdown(plan: &Plan, model: Option<&str>) -> String {
    let root = &plan.subject;
    let mut out = String::new();

    let _ = writeln!(out, "# Learning Hub: {}", root.subject);
    if let Some(model) = model {
        let _ = writeln!(out, "(generated with {})", model);
    }
    out.push('\n');

    if !plan.goal.trim().is_empty() {
        let _ = writeln!(out, "> {}\n", plan.goal.trim());
    }

    write_toc(&mut out, root, 0);
    out.push('\n');

    write_subject(&mut out, root, 1);

    let mut doc = out.trim().to_string();
    doc.push('\n');
    doc
}

fn write_toc(out: &mut String, subject: &Subject, level: usize) {
    let _ = writeln!(
        out,
        "{}* [{}](#{})",
        "  ".repeat(level),
        subject.subject,
        anchor_name(&subject.subject)
    );
    for child in &subject.subjects {
        write_toc(out, child, level + 1);
    }
}

fn write_subject(out: &mut String, subject: &Subject, level: usize) {
    let hashes = "#".repeat(level.min(MAX_HEADING_LEVEL));
    let _ = writeln!(
        out,
        "{} {}<a id='{}'></a>",
        hashes,
        subject.subject,
        anchor_name(&subject.subject)
    );
    if let Some(description) = subject.description() {
        let _ = writeln!(out, "{}\n", description);
    }
    if let Some(reason) = subject.reason() {
        let _ = writeln!(out, "{}\n", reason);
    }

    for child in &subject.subjects {
        write_subject(out, child, level + 1);
    }

    let section = "#".repeat((level + 1).min(MAX_HEADING_LEVEL));
    if !subject.resources.is_empty() {
        let _ = writeln!(
            out,
            "{} Resources<a id='{}'></a>",
            section,
            anchor_name(&format!("{}_resources", subject.subject))
        );
        for resource in &subject.resources {
            let _ = writeln!(out, "* {}: {}", resource.title, resource.description);
        }
        out.push('\n');
    }
    if !subject.exercises.is_empty() {
        let _ = writeln!(
            out,
            "{} Exercises<a id='{}'></a>",
            section,
            anchor_name(&format!("{}_exercises", subject.subject))
        );
        for exercise in &subject.exercises {
            let _ = writeln!(out, "* {}", exercise.description);
        }
        out.push('\n');
    }
}
