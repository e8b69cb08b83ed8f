mod diagnostics;
mod json;
mod summary;
mod table;

pub use diagnostics::render_diagnostics;
pub use json::render_json;
pub use summary::render_summary;
pub use table::render_table;

use crate::scanner::Plan;
use anyhow::Result;
use std::io::{self, IsTerminal, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preview {
    Table,
    Summary,
    Json,
    None,
}

impl std::str::FromStr for Preview {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "summary" => Ok(Self::Summary),
            "json" => Ok(Self::Json),
            "none" => Ok(Self::None),
            _ => Err(format!("Invalid preview format: {}", s)),
        }
    }
}

/// Determine whether to use colors based on explicit preference or terminal detection
pub fn should_use_color_with_detector<F>(use_color: Option<bool>, is_terminal: F) -> bool
where
    F: Fn() -> bool,
{
    match use_color {
        Some(explicit_color) => explicit_color,
        None => is_terminal(),
    }
}

pub fn should_use_color(use_color: Option<bool>) -> bool {
    should_use_color_with_detector(use_color, || io::stdout().is_terminal())
}

/// Render the plan in the specified format
pub fn render_plan(plan: &Plan, format: Preview, use_color: Option<bool>) -> String {
    render_plan_with_fixed_width(plan, format, use_color, false)
}

pub fn render_plan_with_fixed_width(
    plan: &Plan,
    format: Preview,
    use_color: Option<bool>,
    fixed_width: bool,
) -> String {
    let use_color = should_use_color(use_color);

    match format {
        Preview::Table => format!("{}\n", render_table(plan, use_color, fixed_width)),
        Preview::Summary => render_summary(plan),
        Preview::Json => render_json(plan),
        Preview::None => String::new(),
    }
}

/// Write plan preview to stdout
pub fn write_preview(plan: &Plan, format: Preview, use_color: Option<bool>) -> Result<()> {
    let output = render_plan(plan, format, use_color);
    let mut stdout = io::stdout();
    write!(stdout, "{}", output)?;
    stdout.flush()?;
    Ok(())
}
