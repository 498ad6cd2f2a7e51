//! Interactive collection of the city, month and day filters.

use std::io::{self, BufRead, Write};

use bikesharelib::calendar::title_case;
use bikesharelib::{City, DayFilter, FilterSelection, MonthFilter};

const CITY_PROMPT: &str = "\nPlease specify the city in which you want to view the data!\n\
                           Chicago, New York City or Washington (mandatory but not case sensitive): ";
const MONTH_PROMPT: &str = "\nPlease specify a month, use 'all' for all months: ";
const DAY_PROMPT: &str = "\nPlease specify a workday, use 'all' for all workdays: ";
const RESTART_PROMPT: &str = "\nWould you like to restart? Enter yes or no.\n";

/// Line-based question/answer over any reader and writer.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writer the prompts go to, shared with the reporters.
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Read one line without its terminator. `None` once input is closed.
    ///
    /// Invalid UTF-8 is replaced rather than rejected so it fails validation
    /// like any other unknown answer.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&line);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Ask until the lowercased answer is one of `allowed`.
    ///
    /// Echoes the accepted value in title case. Returns `None` if input
    /// closes before a valid answer arrives.
    pub fn ask(
        &mut self,
        prompt: &str,
        error: &str,
        allowed: &[&str],
    ) -> io::Result<Option<String>> {
        loop {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;

            let Some(answer) = self.read_line()? else {
                writeln!(self.output)?;
                return Ok(None);
            };
            let answer = answer.to_lowercase();

            if allowed.contains(&answer.as_str()) {
                writeln!(self.output, "You have selected: {}!", title_case(&answer))?;
                return Ok(Some(answer));
            }
            writeln!(self.output, "{error}")?;
        }
    }

    /// Print the greeting and ask for any filter not already chosen.
    pub fn get_filters(
        &mut self,
        city: Option<City>,
        month: Option<MonthFilter>,
        day: Option<DayFilter>,
    ) -> io::Result<Option<FilterSelection>> {
        writeln!(self.output, "{}", "=".repeat(40))?;
        writeln!(self.output, "Hello! Let's explore some US bikeshare data!")?;

        let city = match city {
            Some(city) => self.echo(city.key(), city)?,
            None => {
                let keys: Vec<&str> = City::ALL.iter().map(|c| c.key()).collect();
                self.ask(CITY_PROMPT, "Please specify a valid city!", &keys)?
                    .and_then(|key| City::from_key(&key))
            }
        };
        let Some(city) = city else { return Ok(None) };

        let month = match month {
            Some(month) => self.echo(month.as_str(), month)?,
            None => self
                .ask(
                    MONTH_PROMPT,
                    "Please specify a valid month!",
                    &MonthFilter::allowed(),
                )?
                .and_then(|m| MonthFilter::parse(&m)),
        };
        let Some(month) = month else { return Ok(None) };

        let day = match day {
            Some(day) => self.echo(day.as_str(), day)?,
            None => self
                .ask(DAY_PROMPT, "Please specify a valid day!", &DayFilter::allowed())?
                .and_then(|d| DayFilter::parse(&d)),
        };
        let Some(day) = day else { return Ok(None) };

        writeln!(self.output, "{}", "-".repeat(40))?;
        Ok(Some(FilterSelection::new(city).month(month).day(day)))
    }

    /// Whether the user wants another pass. Only an exact "yes" counts.
    pub fn ask_restart(&mut self) -> io::Result<bool> {
        write!(self.output, "{RESTART_PROMPT}")?;
        self.output.flush()?;
        Ok(self
            .read_line()?
            .is_some_and(|answer| answer.to_lowercase() == "yes"))
    }

    fn echo<T>(&mut self, name: &str, value: T) -> io::Result<Option<T>> {
        writeln!(self.output, "You have selected: {}!", title_case(name))?;
        Ok(Some(value))
    }
}
