//! Console data entry: prompts for subjects, warns on overlaps, loads saved sets

use anyhow::Result;
use std::io::{BufRead, Write};

use crate::schedule::{has_conflict, parse_time_range, DayRow, ScheduleEntry, ScheduleSet};
use crate::store::SetStore;

/// What a finished session produced
#[derive(Debug, Default)]
pub struct SessionOutcome {
    /// Set number typed by the user; `None` when the set came from history
    /// or input ended before a number was given
    pub set_number: Option<u32>,
    pub set: ScheduleSet,
}

pub struct Session<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `text` and read one trimmed line. `None` on end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn ask_yes(&mut self, text: &str) -> Result<Option<bool>> {
        Ok(self.prompt(text)?.map(|answer| answer.eq_ignore_ascii_case("y")))
    }

    /// Full flow: offer history first, otherwise collect a new set
    pub fn run(&mut self, store: &SetStore) -> Result<SessionOutcome> {
        let mut set = ScheduleSet::new();
        if self.ask_yes("Want to run from history? (y/n) ")? == Some(true) {
            self.load_from_history(store, &mut set)?;
            return Ok(SessionOutcome {
                set_number: None,
                set,
            });
        }

        let Some(set_number) = self.ask_set_number()? else {
            return Ok(SessionOutcome::default());
        };

        self.collect_entries(&mut set)?;
        Ok(SessionOutcome {
            set_number: Some(set_number),
            set,
        })
    }

    /// List saved sets, ask for one by name and load it over `set`.
    /// A missing or unreadable file is reported and leaves `set` empty.
    pub fn load_from_history(&mut self, store: &SetStore, set: &mut ScheduleSet) -> Result<()> {
        let names = store.list()?;
        if names.is_empty() {
            writeln!(self.output, "No saved sets found.")?;
        } else {
            writeln!(self.output, "Available saved sets:")?;
            for name in &names {
                writeln!(self.output, "{}", name)?;
            }
        }

        let Some(file_name) = self.prompt("Enter file name (e.g., set1.txt): ")? else {
            set.replace(ScheduleSet::new());
            return Ok(());
        };

        match store.load(&file_name) {
            Ok(loaded) => {
                set.replace(loaded);
                writeln!(self.output, "Data loaded successfully from {}", file_name)?;
            }
            Err(e) => {
                set.replace(ScheduleSet::new());
                tracing::warn!(file = %file_name, error = %e, "could not load set");
                writeln!(self.output, "Could not load {}: {}", file_name, e)?;
            }
        }
        Ok(())
    }

    fn ask_set_number(&mut self) -> Result<Option<u32>> {
        loop {
            let Some(answer) = self.prompt("Enter set number for this data: ")? else {
                return Ok(None);
            };
            match answer.parse::<u32>() {
                Ok(number) => return Ok(Some(number)),
                Err(_) => writeln!(self.output, "\"{}\" is not a set number.", answer)?,
            }
        }
    }

    /// Ask for a time range until one parses; saved lines are comma-separated
    fn ask_time_range(&mut self) -> Result<Option<String>> {
        loop {
            let Some(time) = self.prompt("Time (00.00-00.00): ")? else {
                return Ok(None);
            };
            if time.contains(',') {
                writeln!(self.output, "A time cannot contain ','.")?;
                continue;
            }
            match parse_time_range(&time) {
                Ok(_) => return Ok(Some(time)),
                Err(e) => writeln!(self.output, "Invalid time: {}", e)?,
            }
        }
    }

    /// Ask for a day until one without a comma is given
    fn ask_day(&mut self) -> Result<Option<String>> {
        loop {
            let Some(day) = self.prompt("Day(ex.mon): ")? else {
                return Ok(None);
            };
            if !day.contains(',') {
                return Ok(Some(day));
            }
            writeln!(self.output, "A day cannot contain ','.")?;
        }
    }

    /// Prompt for entries until the user declines to add more or input ends.
    /// Overlaps only warn; answering "y" inserts the entry regardless.
    pub fn collect_entries(&mut self, set: &mut ScheduleSet) -> Result<()> {
        loop {
            let Some(subject) = self.prompt("Subject: ")? else {
                return Ok(());
            };
            let Some(time) = self.ask_time_range()? else {
                return Ok(());
            };
            let Some(day) = self.ask_day()? else {
                return Ok(());
            };

            if !DayRow::is_known(&day) {
                writeln!(self.output, "Unknown day \"{}\", it will be shown in the MON row.", day)?;
            }

            let conflict = has_conflict(set.entries(), &day, &time)?;
            let add = if conflict {
                tracing::debug!(%day, %time, "time conflict detected");
                writeln!(
                    self.output,
                    "Warning: Time conflict detected! This time slot overlaps with an existing subject on {}",
                    day.to_uppercase()
                )?;
                match self.ask_yes("Do you still want to add this subject? (y/n): ")? {
                    Some(answer) => answer,
                    None => return Ok(()),
                }
            } else {
                true
            };

            if add {
                set.push(ScheduleEntry::new(subject, time, day));
            }

            match self.prompt("More subjects? (y/n): ")? {
                Some(answer) if answer.eq_ignore_ascii_case("n") => return Ok(()),
                Some(_) => {}
                None => return Ok(()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_entries(script: &str) -> (ScheduleSet, String) {
        let mut output = Vec::new();
        let mut set = ScheduleSet::new();
        Session::new(Cursor::new(script.as_bytes()), &mut output)
            .collect_entries(&mut set)
            .unwrap();
        (set, String::from_utf8(output).unwrap())
    }

    #[test]
    fn collects_until_no_more() {
        let (set, _) = run_entries(
            "Math\n09.00-10.00\nmon\ny\n\
             Physics\n10.00-11.30\nMON\nn\n",
        );
        assert_eq!(set.len(), 2);
        assert_eq!(set.entries()[1], ScheduleEntry::new("Physics", "10.00-11.30", "MON"));
    }

    #[test]
    fn declined_conflict_is_not_added() {
        let (set, output) = run_entries(
            "Math\n09.00-10.00\nmon\ny\n\
             Chem\n09.30-10.30\nMon\nn\nn\n",
        );
        assert_eq!(set.len(), 1);
        assert!(output.contains("overlaps with an existing subject on MON"));
    }

    #[test]
    fn accepted_conflict_is_added() {
        let (set, _) = run_entries(
            "Math\n09.00-10.00\nmon\ny\n\
             Chem\n09.30-10.30\nmon\ny\nn\n",
        );
        assert_eq!(set.len(), 2);
        assert_eq!(set.entries()[1].subject(), "Chem");
    }

    #[test]
    fn malformed_time_is_asked_again() {
        let (set, output) = run_entries("Math\n9-10\n09.00-10.00\ntue\nn\n");
        assert_eq!(set.entries(), &[ScheduleEntry::new("Math", "09.00-10.00", "tue")]);
        assert!(output.contains("Invalid time"));
    }

    #[test]
    fn day_with_comma_is_asked_again() {
        let (set, output) = run_entries("Math\n09.00-10.00\nmon,tue\ntue\nn\n");
        assert_eq!(set.entries(), &[ScheduleEntry::new("Math", "09.00-10.00", "tue")]);
        assert!(output.contains("A day cannot contain ','"));
    }

    #[test]
    fn time_with_comma_is_asked_again() {
        let (set, output) = run_entries("Math\n09.00-10.00-a,b\n09.00-10.00\nmon\nn\n");
        assert_eq!(set.entries()[0].time_range(), "09.00-10.00");
        assert!(output.contains("A time cannot contain ','"));
    }

    #[test]
    fn end_of_input_stops_collection() {
        let (set, _) = run_entries("Math\n09.00-10.00\nmon\n");
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn unknown_day_is_accepted_with_note() {
        let (set, output) = run_entries("Math\n09.00-10.00\nsomeday\nn\n");
        assert_eq!(set.entries()[0].day(), "someday");
        assert!(output.contains("MON row"));
    }

    #[test]
    fn run_reads_set_number_then_entries() {
        let dir = tempfile::tempdir().unwrap();
        let store = SetStore::new(dir.path());
        let mut output = Vec::new();
        let outcome = Session::new(
            Cursor::new("n\nabc\n7\nMath\n09.00-10.00\nmon\nn\n".as_bytes()),
            &mut output,
        )
        .run(&store)
        .unwrap();

        assert_eq!(outcome.set_number, Some(7));
        assert_eq!(outcome.set.len(), 1);
        assert!(String::from_utf8(output).unwrap().contains("not a set number"));
    }

    #[test]
    fn run_from_history_loads_named_set() {
        let dir = tempfile::tempdir().unwrap();
        let store = SetStore::new(dir.path());
        let saved = ScheduleSet::from_entries(vec![ScheduleEntry::new("Art", "13.00-14.00", "fri")]);
        store.save(1, &saved).unwrap();

        let mut output = Vec::new();
        let outcome = Session::new(Cursor::new("y\nset1.txt\n".as_bytes()), &mut output)
            .run(&store)
            .unwrap();

        assert_eq!(outcome.set_number, None);
        assert_eq!(outcome.set, saved);
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Available saved sets:\nset1.txt\n"));
    }

    #[test]
    fn history_load_replaces_existing_entries() {
        let dir = tempfile::tempdir().unwrap();
        let store = SetStore::new(dir.path());
        let saved = ScheduleSet::from_entries(vec![ScheduleEntry::new("Art", "13.00-14.00", "fri")]);
        store.save(2, &saved).unwrap();

        let mut set = ScheduleSet::from_entries(vec![ScheduleEntry::new("Old", "08.00-09.00", "mon")]);
        let mut output = Vec::new();
        Session::new(Cursor::new("set2.txt\n".as_bytes()), &mut output)
            .load_from_history(&store, &mut set)
            .unwrap();

        assert_eq!(set, saved);
    }

    #[test]
    fn missing_history_file_gives_empty_set() {
        let dir = tempfile::tempdir().unwrap();
        let store = SetStore::new(dir.path());
        let mut output = Vec::new();
        let outcome = Session::new(Cursor::new("y\nset4.txt\n".as_bytes()), &mut output)
            .run(&store)
            .unwrap();

        assert!(outcome.set.is_empty());
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("No saved sets found."));
        assert!(output.contains("Could not load set4.txt"));
    }
}
