use crate::matcher::MatchCode;
use crate::scanner::Plan;
use nu_ansi_term::{Color as AnsiColor, Style};
use std::fmt::Write;

/// Render the per-file diagnostics collected while planning
pub fn render_diagnostics(plan: &Plan, use_color: bool) -> String {
    let mut output = String::new();

    for report in &plan.reports {
        let header = format!("{} [code {}]", report.file, report.code);
        if use_color {
            let color = match report.code {
                MatchCode::Identical => AnsiColor::Green,
                MatchCode::NumericOnly => AnsiColor::Yellow,
                MatchCode::Blocked => AnsiColor::Red,
            };
            writeln!(output, "{}", color.bold().paint(header)).unwrap();
        } else {
            writeln!(output, "{}", header).unwrap();
        }

        let dim = Style::new().dimmed();
        for line in &report.diagnostics {
            if use_color {
                writeln!(output, "  {}", dim.paint(line)).unwrap();
            } else {
                writeln!(output, "  {}", line).unwrap();
            }
        }
    }

    output
}
