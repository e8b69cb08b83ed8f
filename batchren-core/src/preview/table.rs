use crate::matcher::MatchCode;
use crate::scanner::{FileReport, Plan};
use comfy_table::{Cell, Color, ColumnConstraint, ContentArrangement, Table, Width};
use std::io::{self, IsTerminal};

fn fixed_constraints() -> Vec<ColumnConstraint> {
    vec![
        ColumnConstraint::Absolute(Width::Fixed(50)), // File
        ColumnConstraint::Absolute(Width::Fixed(8)),  // Code
        ColumnConstraint::Absolute(Width::Fixed(50)), // New name
    ]
}

/// What the "New name" column shows for a report.
fn outcome_text(report: &FileReport) -> String {
    if report.code.is_blocked() {
        "(blocked)".to_string()
    } else if report.suggested.to_lowercase() == report.file.to_lowercase() {
        "(unchanged)".to_string()
    } else {
        format!("→ {}", report.suggested)
    }
}

fn code_color(code: MatchCode) -> Color {
    match code {
        MatchCode::Identical => Color::Green,
        MatchCode::NumericOnly => Color::Yellow,
        MatchCode::Blocked => Color::Red,
    }
}

/// Render plan as a table with optional fixed column widths
pub fn render_table(plan: &Plan, use_color: bool, fixed_table_width: bool) -> String {
    let mut table = Table::new();

    if fixed_table_width || !io::stdout().is_terminal() {
        table.set_content_arrangement(ContentArrangement::Disabled);
        table.set_constraints(fixed_constraints());
    } else {
        table.set_content_arrangement(ContentArrangement::Dynamic);
    }

    // Force styling even in non-TTY environments when colors are explicitly requested
    if use_color {
        table.enforce_styling();
        table.set_header(vec![
            Cell::new("File").fg(Color::Cyan),
            Cell::new("Code").fg(Color::Cyan),
            Cell::new("New name").fg(Color::Cyan),
        ]);
    } else {
        table.set_header(vec!["File", "Code", "New name"]);
    }

    for report in &plan.reports {
        let new_name = outcome_text(report);
        if use_color {
            let name_color = if report.code.is_blocked() {
                Color::DarkGrey
            } else {
                Color::Magenta
            };
            table.add_row(vec![
                Cell::new(&report.file),
                Cell::new(report.code.to_string()).fg(code_color(report.code)),
                Cell::new(&new_name).fg(name_color),
            ]);
        } else {
            table.add_row(vec![
                report.file.as_str(),
                report.code.to_string().as_str(),
                new_name.as_str(),
            ]);
        }
    }

    let stats = &plan.stats;
    let totals = format!(
        "{} to rename, {} blocked, {} unchanged",
        stats.planned, stats.blocked, stats.discarded
    );

    if use_color {
        table.add_row(vec![
            Cell::new("─────────").fg(Color::DarkGrey),
            Cell::new("────").fg(Color::DarkGrey),
            Cell::new("─────────").fg(Color::DarkGrey),
        ]);
        table.add_row(vec![
            Cell::new("TOTALS").fg(Color::Cyan),
            Cell::new(stats.candidates.to_string()).fg(Color::Yellow),
            Cell::new(totals).fg(Color::White),
        ]);
    } else {
        table.add_row(vec!["─────────", "────", "─────────"]);
        table.add_row(vec!["TOTALS", stats.candidates.to_string().as_str(), totals.as_str()]);
    }

    table.to_string()
}
