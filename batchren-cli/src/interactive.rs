//! Interactive mode: ask for a directory, then patterns, until the user quits.
//!
//! The session is a loop over [`State`]; every prompt reads one line and end
//! of input always leads to [`State::Exit`].

use anyhow::{Context, Result};
use batchren_core::preview::should_use_color;
use batchren_core::{
    apply_operation, plan_operation, render_diagnostics, render_plan, resolve_directory,
    OutputFormatter, Plan, RenameOptions,
};
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Debug)]
enum State {
    SelectDirectory,
    Preview(PathBuf),
    Confirm(Box<Plan>),
    Menu(PathBuf),
    Exit,
}

pub struct Session<'a, R, W> {
    input: R,
    output: W,
    options: &'a RenameOptions,
    verbose: bool,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(input: R, output: W, options: &'a RenameOptions, verbose: bool) -> Self {
        Self {
            input,
            output,
            options,
            verbose,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        writeln!(
            self.output,
            "batchren: rename files by pattern. Press Ctrl-D at any prompt to quit."
        )?;

        let mut state = State::SelectDirectory;
        loop {
            state = match state {
                State::SelectDirectory => self.select_directory()?,
                State::Preview(dir) => self.preview(dir)?,
                State::Confirm(plan) => self.confirm(*plan)?,
                State::Menu(dir) => self.menu(dir)?,
                State::Exit => return Ok(()),
            };
        }
    }

    /// `None` at end of input
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush().context("Failed to flush output")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read user input")?;
        if read == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn select_directory(&mut self) -> Result<State> {
        let Some(answer) = self.prompt("Directory [.]: ")? else {
            return Ok(State::Exit);
        };
        let dir = if answer.is_empty() {
            PathBuf::from(".")
        } else {
            PathBuf::from(answer)
        };

        match resolve_directory(&dir) {
            Ok(resolved) => Ok(State::Preview(resolved)),
            Err(e) => {
                writeln!(self.output, "Error: {e:#}")?;
                Ok(State::SelectDirectory)
            },
        }
    }

    fn preview(&mut self, dir: PathBuf) -> Result<State> {
        let Some(pattern) = self.prompt("Pattern: ")? else {
            return Ok(State::Exit);
        };
        if pattern.is_empty() {
            return Ok(State::Menu(dir));
        }
        let Some(replacement) = self.prompt("Replacement: ")? else {
            return Ok(State::Exit);
        };

        let plan = match plan_operation(&dir, &pattern, &replacement, &self.options.plan) {
            Ok(plan) => plan,
            Err(e) => {
                writeln!(self.output, "Error: {e:#}")?;
                return Ok(State::Menu(dir));
            },
        };

        write!(
            self.output,
            "{}",
            render_plan(&plan, self.options.preview, self.options.use_color)
        )?;
        if self.verbose {
            let use_color = should_use_color(self.options.use_color);
            write!(self.output, "{}", render_diagnostics(&plan, use_color))?;
        }

        if plan.is_empty() {
            writeln!(
                self.output,
                "Nothing to rename for '{}' -> '{}'",
                pattern, replacement
            )?;
            return Ok(State::Menu(dir));
        }
        if self.options.dry_run {
            writeln!(self.output, "Dry run: no files were renamed")?;
            return Ok(State::Menu(dir));
        }

        Ok(State::Confirm(Box::new(plan)))
    }

    fn confirm(&mut self, plan: Plan) -> Result<State> {
        let dir = plan.directory.clone();

        if !self.options.assume_yes {
            let question = format!("Rename {} files? [y/N]: ", plan.entries.len());
            let Some(answer) = self.prompt(&question)? else {
                return Ok(State::Exit);
            };
            if !matches!(answer.to_lowercase().as_str(), "y" | "yes") {
                writeln!(self.output, "Aborted.")?;
                return Ok(State::Menu(dir));
            }
        }

        match apply_operation(&plan, &self.options.apply) {
            Ok(result) => write!(self.output, "{}", result.format_summary())?,
            Err(e) => writeln!(self.output, "Error: {e:#}")?,
        }

        Ok(State::Menu(dir))
    }

    fn menu(&mut self, dir: PathBuf) -> Result<State> {
        let Some(choice) =
            self.prompt("[p] another pattern  [d] another directory  [q] quit: ")?
        else {
            return Ok(State::Exit);
        };

        match choice.to_lowercase().as_str() {
            "p" | "pattern" => Ok(State::Preview(dir)),
            "d" | "directory" => Ok(State::SelectDirectory),
            "q" | "quit" | "exit" => Ok(State::Exit),
            _ => {
                writeln!(self.output, "Please enter p, d or q.")?;
                Ok(State::Menu(dir))
            },
        }
    }
}
