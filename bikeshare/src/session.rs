//! The prompt → load → report loop.

use std::io::{BufRead, Write};

use anyhow::Context;
use bikesharelib::{load_data, City, CityRegistry, DayFilter, FilterSelection, MonthFilter};
use tracing::info;

use crate::prompt::Prompter;
use crate::render::{self, OutputMode};

/// Filters chosen on the command line before the session starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Preset {
    pub city: Option<City>,
    pub month: Option<MonthFilter>,
    pub day: Option<DayFilter>,
}

impl Preset {
    /// The full selection, if every filter was given.
    pub fn complete(&self) -> Option<FilterSelection> {
        Some(
            FilterSelection::new(self.city?)
                .month(self.month?)
                .day(self.day?),
        )
    }
}

/// Runs passes until the user declines to restart.
pub struct Session<'a> {
    registry: &'a CityRegistry,
    preset: Preset,
    output_mode: OutputMode,
}

impl<'a> Session<'a> {
    pub fn new(registry: &'a CityRegistry, preset: Preset, output_mode: OutputMode) -> Self {
        Self {
            registry,
            preset,
            output_mode,
        }
    }

    /// Drive the session over `prompter`.
    ///
    /// With a complete preset this is a single pass with no prompts. Load
    /// failures end the session with an error.
    pub fn run<R: BufRead, W: Write>(&self, prompter: &mut Prompter<R, W>) -> anyhow::Result<()> {
        if let Some(selection) = self.preset.complete() {
            return self.pass(prompter.output(), &selection);
        }

        info!("session started");
        loop {
            let selection =
                prompter.get_filters(self.preset.city, self.preset.month, self.preset.day)?;
            let Some(selection) = selection else {
                info!("input closed, stopping");
                break;
            };

            self.pass(prompter.output(), &selection)?;

            if !prompter.ask_restart()? {
                break;
            }
        }
        info!("session stopped");
        Ok(())
    }

    fn pass<W: Write>(&self, out: &mut W, selection: &FilterSelection) -> anyhow::Result<()> {
        let table = load_data(self.registry, selection).with_context(|| {
            format!(
                "could not load trip data for {}",
                selection.city.display_name()
            )
        })?;
        info!(
            city = selection.city.key(),
            month = selection.month.as_str(),
            day = selection.day.as_str(),
            trips = table.len(),
            "loaded selection"
        );
        render::report(out, &table, self.output_mode)?;
        out.flush()?;
        Ok(())
    }
}
