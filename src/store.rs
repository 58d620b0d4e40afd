use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::schedule::{ScheduleEntry, ScheduleSet};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("saved set {0} not found")]
    NotFound(String),
    #[error("line {line} of {file} is not \"subject,time,day\": {text:?}")]
    MalformedLine {
        file: String,
        line: usize,
        text: String,
    },
    #[error("\"{subject}\" has a ',' in {value:?} and cannot be saved")]
    CommaInField { subject: String, value: String },
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

/// Flat-file storage of schedule sets: one `set<N>.txt` per set,
/// one `subject,time,day` line per entry.
pub struct SetStore {
    dir: PathBuf,
}

impl SetStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file_name(set_number: u32) -> String {
        format!("set{}.txt", set_number)
    }

    /// Write the whole set, replacing any earlier file with the same number.
    /// Returns the path written.
    pub fn save(&self, set_number: u32, set: &ScheduleSet) -> Result<PathBuf, StoreError> {
        // Loading splits from the right, so only the subject may hold commas
        for entry in set.entries() {
            if let Some(value) = [entry.time_range(), entry.day()].into_iter().find(|v| v.contains(',')) {
                return Err(StoreError::CommaInField {
                    subject: entry.subject().to_string(),
                    value: value.to_string(),
                });
            }
        }

        fs::create_dir_all(&self.dir)
            .map_err(|e| StoreError::io(format!("Failed to create {}", self.dir.display()), e))?;

        let path = self.dir.join(Self::file_name(set_number));
        let contents: String = set
            .entries()
            .iter()
            .map(|e| format!("{},{},{}\n", e.subject(), e.time_range(), e.day()))
            .collect();

        fs::write(&path, contents)
            .map_err(|e| StoreError::io(format!("Failed to write {}", path.display()), e))?;

        tracing::info!(path = %path.display(), entries = set.len(), "saved set");
        Ok(path)
    }

    /// Read a saved set by file name, e.g. "set1.txt".
    pub fn load(&self, file_name: &str) -> Result<ScheduleSet, StoreError> {
        let path = self.dir.join(file_name);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(file_name.to_string()));
            }
            Err(e) => {
                return Err(StoreError::io(format!("Failed to read {}", path.display()), e));
            }
        };

        let mut entries = Vec::new();
        for (index, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let entry = parse_line(line).ok_or_else(|| StoreError::MalformedLine {
                file: file_name.to_string(),
                line: index + 1,
                text: line.to_string(),
            })?;
            entries.push(entry);
        }

        tracing::info!(path = %path.display(), entries = entries.len(), "loaded set");
        Ok(ScheduleSet::from_entries(entries))
    }

    /// Names of saved sets in the data directory, sorted.
    /// A missing directory has no sets.
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        let read_dir = match fs::read_dir(&self.dir) {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StoreError::io(format!("Failed to list {}", self.dir.display()), e));
            }
        };

        let mut names = Vec::new();
        for dir_entry in read_dir {
            let dir_entry = dir_entry
                .map_err(|e| StoreError::io(format!("Failed to list {}", self.dir.display()), e))?;
            if let Some(name) = dir_entry.file_name().to_str() {
                if name.starts_with("set") && name.ends_with(".txt") {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

/// Split "subject,time,day". The last two fields are time and day so a
/// subject may itself contain commas.
fn parse_line(line: &str) -> Option<ScheduleEntry> {
    let mut fields = line.rsplitn(3, ',');
    let day = fields.next()?;
    let time_range = fields.next()?;
    let subject = fields.next()?;
    Some(ScheduleEntry::new(subject, time_range, day))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_set() -> ScheduleSet {
        ScheduleSet::from_entries(vec![
            ScheduleEntry::new("Math", "09.00-10.00", "mon"),
            ScheduleEntry::new("Physics", "10.30-12.00", "TUE"),
            ScheduleEntry::new("Math", "09.30-10.30", "mon"),
        ])
    }

    #[test]
    fn save_writes_comma_joined_lines() {
        let dir = tempfile::tempdir().unwrap();
        let store = SetStore::new(dir.path());
        let path = store.save(1, &sample_set()).unwrap();

        assert_eq!(path, dir.path().join("set1.txt"));
        let contents = fs::read_to_string(path).unwrap();
        assert_eq!(
            contents,
            "Math,09.00-10.00,mon\nPhysics,10.30-12.00,TUE\nMath,09.30-10.30,mon\n"
        );
    }

    #[test]
    fn load_returns_saved_entries_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = SetStore::new(dir.path());
        store.save(2, &sample_set()).unwrap();

        let loaded = store.load("set2.txt").unwrap();
        assert_eq!(loaded, sample_set());
    }

    #[test]
    fn save_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = SetStore::new(dir.path().join("timetable_data"));
        store.save(3, &sample_set()).unwrap();
        assert!(dir.path().join("timetable_data/set3.txt").exists());
    }

    #[test]
    fn save_rejects_comma_in_time_or_day() {
        let dir = tempfile::tempdir().unwrap();
        let store = SetStore::new(dir.path());
        let set = ScheduleSet::from_entries(vec![ScheduleEntry::new("S", "09.00-10.00", "mon,tue")]);
        assert!(matches!(store.save(1, &set), Err(StoreError::CommaInField { .. })));

        let set = ScheduleSet::from_entries(vec![ScheduleEntry::new("S", "09.00-10.00-a,b", "mon")]);
        assert!(matches!(store.save(1, &set), Err(StoreError::CommaInField { .. })));

        assert!(!dir.path().join("set1.txt").exists());
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = SetStore::new(dir.path());
        assert!(matches!(store.load("set9.txt"), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn load_skips_blank_lines_and_keeps_commas_in_subject() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("set4.txt"),
            "Reading, Writing,08.00-09.00,wed\n\nArt,13.00-14.00,fri\n",
        )
        .unwrap();

        let loaded = SetStore::new(dir.path()).load("set4.txt").unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.entries()[0].subject(), "Reading, Writing");
        assert_eq!(loaded.entries()[0].day(), "wed");
    }

    #[test]
    fn load_rejects_short_lines() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("set5.txt"), "Math,09.00-10.00,mon\nbroken\n").unwrap();

        match SetStore::new(dir.path()).load("set5.txt") {
            Err(StoreError::MalformedLine { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected MalformedLine, got {:?}", other),
        }
    }

    #[test]
    fn list_reports_only_set_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = SetStore::new(dir.path());
        store.save(2, &sample_set()).unwrap();
        store.save(1, &sample_set()).unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::write(dir.path().join("set1.bak"), "").unwrap();

        assert_eq!(store.list().unwrap(), vec!["set1.txt", "set2.txt"]);
    }

    #[test]
    fn list_of_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = SetStore::new(dir.path().join("nothing-here"));
        assert!(store.list().unwrap().is_empty());
    }
}
