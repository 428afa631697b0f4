use crate::cli::DriverConfig;
use queens_core::{HillClimber, SearchStatus, StepKind, StepResult, Termination};
use serde::Serialize;
use std::io::{self, Write};
use std::time::Duration;

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickAction {
    Continue,
    Stop(Termination),
}

/// One line of `--json` output
#[derive(Serialize)]
struct TickRecord<'a> {
    tick: usize,
    step: Option<&'a StepResult>,
    status: &'a SearchStatus,
}

/// Driver state: the engine plus output settings
pub struct App {
    engine: HillClimber,
    config: DriverConfig,
    ticks: usize,
}

impl App {
    pub fn new(engine: HillClimber, config: DriverConfig) -> Self {
        Self {
            engine,
            config,
            ticks: 0,
        }
    }

    pub fn engine(&self) -> &HillClimber {
        &self.engine
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Ticks that called `step`
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// Advance the search by one step and print the result.
    ///
    /// A solved board stops without stepping; a step that cannot move stops
    /// as a local minimum.
    pub fn tick<W: Write>(&mut self, out: &mut W) -> io::Result<TickAction> {
        if self.engine.is_solved() {
            self.render(out, None)?;
            return Ok(TickAction::Stop(Termination::Solved));
        }

        self.ticks += 1;
        let result = self.engine.step();
        self.render(out, Some(&result))?;

        Ok(match result.kind {
            StepKind::Improved | StepKind::Sideways if self.engine.is_solved() => {
                TickAction::Stop(Termination::Solved)
            }
            StepKind::Improved | StepKind::Sideways => TickAction::Continue,
            StepKind::Stuck => TickAction::Stop(Termination::Stuck),
            StepKind::Solved => TickAction::Stop(Termination::Solved),
        })
    }

    /// One manual tick. A board that is already solved was fully reported by
    /// the initial render, so nothing more is printed.
    pub fn single_step<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if !self.engine.is_solved() {
            self.tick(out)?;
        }
        Ok(())
    }

    /// Tick until the search stops or `max_steps` ticks have run, calling
    /// `wait` with the configured interval between ticks.
    ///
    /// Expects the initial state to have been rendered already.
    pub fn drive<W, F>(&mut self, out: &mut W, mut wait: F) -> io::Result<Termination>
    where
        W: Write,
        F: FnMut(Duration),
    {
        loop {
            out.flush()?;
            if self.engine.is_solved() {
                return Ok(Termination::Solved);
            }
            if self.ticks >= self.config.max_steps {
                return Ok(Termination::StepLimit);
            }
            if let TickAction::Stop(termination) = self.tick(out)? {
                return Ok(termination);
            }
            if self.ticks < self.config.max_steps {
                wait(self.config.interval);
            }
        }
    }

    /// Print the current state without stepping
    pub fn render_initial<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.render(out, None)
    }

    fn render<W: Write>(&self, out: &mut W, step: Option<&StepResult>) -> io::Result<()> {
        let status = self.engine.status();

        if self.config.json {
            let record = TickRecord {
                tick: self.ticks,
                step,
                status: &status,
            };
            serde_json::to_writer(&mut *out, &record)?;
            writeln!(out)?;
            return Ok(());
        }

        match step.and_then(|s| s.mv.map(|mv| (s.kind, mv))) {
            Some((kind, mv)) => writeln!(
                out,
                "[{:>4}] {:<8} {:<24} {}",
                self.ticks,
                kind.to_string(),
                mv.to_string(),
                status
            )?,
            None => writeln!(out, "[{:>4}] {}", self.ticks, status)?,
        }
        if self.config.show_board {
            writeln!(out, "{}", status.placement)?;
        }
        Ok(())
    }
}
