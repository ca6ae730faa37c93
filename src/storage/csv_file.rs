//! The task file: one CSV record per task, rewritten in full on every save.
//!
//! Layout: `type,is_checked,task_name,time1,time2,tags...`. `time1`/`time2`
//! hold `NA` when the task kind has no such field, and every column from the
//! sixth onward is a tag, so records have varying lengths.

use crate::domain::datetime;
use crate::domain::task::{Task, TaskKind};
use crate::error::TaskBotError;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const HEADER: [&str; 6] = ["type", "is_checked", "task_name", "time1", "time2", "tags"];

const NA: &str = "NA";

/// Stand-in for commas left by older writers that did not quote fields.
const LEGACY_COMMA: char = '\0';

const TAGS_START: usize = 5;

pub struct Storage {
    path: PathBuf,
}

impl Storage {
    /// Open the task file, creating it with a header row if needed.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, TaskBotError> {
        let storage = Self { path: path.into() };
        storage.ensure_file()?;
        Ok(storage)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_file(&self) -> Result<(), TaskBotError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| TaskBotError::storage(&self.path, e))?;
            }
        }

        let is_empty = match fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => true,
            Err(e) => return Err(TaskBotError::storage(&self.path, e)),
        };

        if is_empty {
            debug!(path = %self.path.display(), "creating task file");
            return self.save(&[]);
        }

        let content =
            fs::read_to_string(&self.path).map_err(|e| TaskBotError::storage(&self.path, e))?;
        let header = content.lines().next().unwrap_or_default();
        if header != HEADER.join(",") {
            warn!(
                path = %self.path.display(),
                found = header,
                "task file header does not match the expected layout"
            );
        }
        Ok(())
    }

    /// Read every task from the file, skipping the header row.
    pub fn load(&self) -> Result<Vec<Task>, TaskBotError> {
        let content =
            fs::read_to_string(&self.path).map_err(|e| TaskBotError::storage(&self.path, e))?;

        let mut tasks = Vec::new();
        for (i, line) in content.lines().enumerate().skip(1) {
            if line.trim().is_empty() {
                continue;
            }
            let record = read_line(line).map_err(|e| TaskBotError::storage(&self.path, e))?;
            if let Some(task) = self.decode(&record, i + 1) {
                tasks.push(task);
            }
        }

        debug!(path = %self.path.display(), count = tasks.len(), "loaded tasks");
        Ok(tasks)
    }

    fn decode(&self, record: &StringRecord, line: usize) -> Option<Task> {
        let code = record.get(0).unwrap_or_default();
        if !matches!(code, "T" | "D" | "E") {
            debug!(line, code, "skipping record with unknown task type");
            return None;
        }

        let (Some(checked), Some(name)) = (record.get(1), record.get(2)) else {
            warn!(path = %self.path.display(), line, "skipping truncated record");
            return None;
        };

        let stamp = |col: usize| record.get(col).and_then(datetime::parse_stored);
        let kind = match code {
            "T" => Some(TaskKind::Todo),
            "D" => stamp(3).map(|due| TaskKind::Deadline { due }),
            _ => stamp(3)
                .zip(stamp(4))
                .map(|(start, end)| TaskKind::Event { start, end }),
        };
        let Some(kind) = kind else {
            warn!(path = %self.path.display(), line, "skipping record with bad timestamps");
            return None;
        };

        let tags = record
            .iter()
            .skip(TAGS_START)
            .filter(|t| !t.is_empty())
            .map(restore_commas)
            .collect();

        Some(Task::from_parts(
            restore_commas(name),
            checked == "1",
            kind,
            tags,
        ))
    }

    /// Overwrite the file with the header followed by every task.
    pub fn save(&self, tasks: &[Task]) -> Result<(), TaskBotError> {
        let mut writer = WriterBuilder::new()
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| TaskBotError::storage(&self.path, e))?;

        writer
            .write_record(HEADER)
            .map_err(|e| TaskBotError::storage(&self.path, e))?;
        for task in tasks {
            writer
                .write_record(encode(task))
                .map_err(|e| TaskBotError::storage(&self.path, e))?;
        }
        writer
            .flush()
            .map_err(|e| TaskBotError::storage(&self.path, e))?;

        debug!(path = %self.path.display(), count = tasks.len(), "saved tasks");
        Ok(())
    }
}

fn encode(task: &Task) -> Vec<String> {
    let (time1, time2) = match task.kind() {
        TaskKind::Todo => (NA.to_string(), NA.to_string()),
        TaskKind::Deadline { due } => (datetime::format_stored(due), NA.to_string()),
        TaskKind::Event { start, end } => {
            (datetime::format_stored(start), datetime::format_stored(end))
        }
    };

    let mut fields = vec![
        task.kind().code().to_string(),
        if task.done { "1" } else { "0" }.to_string(),
        task.name.clone(),
        time1,
        time2,
    ];
    fields.extend(task.tags.iter().cloned());
    fields
}

/// Parse one line as CSV, falling back to a plain comma split for lines from
/// older writers that never quoted. Quoted parsing wins only when writing the
/// record back reproduces the line exactly.
fn read_line(line: &str) -> Result<StringRecord, csv::Error> {
    let quoted = parse_line(line, true)?;
    if write_line(&quoted)? == line {
        Ok(quoted)
    } else {
        debug!(line, "reading unquoted record");
        parse_line(line, false)
    }
}

fn parse_line(line: &str, quoting: bool) -> Result<StringRecord, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(quoting)
        .from_reader(line.as_bytes());
    let first = reader.records().next();
    first.unwrap_or_else(|| Ok(StringRecord::new()))
}

fn write_line(record: &StringRecord) -> Result<String, csv::Error> {
    let mut writer = WriterBuilder::new().flexible(true).from_writer(Vec::new());
    writer.write_record(record)?;
    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(text.strip_suffix('\n').unwrap_or(&text).to_string())
}

fn restore_commas(text: &str) -> String {
    text.replace(LEGACY_COMMA, ",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use std::io::Write;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn test_storage() -> (TempDir, Storage) {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().join("tasks.csv")).unwrap();
        (dir, storage)
    }

    fn sample_tasks() -> Vec<Task> {
        let mut deadline = Task::deadline("Submit report".to_string(), at(2024, 5, 1, 23, 59));
        deadline.done = true;
        deadline.tags = vec!["urgent".to_string(), "work".to_string()];
        vec![
            Task::todo("Buy milk".to_string()),
            deadline,
            Task::event(
                "Team sync".to_string(),
                at(2024, 5, 2, 9, 0),
                at(2024, 5, 2, 10, 0),
            )
            .unwrap(),
        ]
    }

    #[test]
    fn new_file_gets_header() {
        let (_dir, storage) = test_storage();
        let content = fs::read_to_string(storage.path()).unwrap();
        assert_eq!(content, "type,is_checked,task_name,time1,time2,tags\n");
        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn creates_missing_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("data").join("tasks.csv");
        Storage::new(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn save_writes_documented_layout() {
        let (_dir, storage) = test_storage();
        storage.save(&sample_tasks()).unwrap();
        let content = fs::read_to_string(storage.path()).unwrap();
        assert_eq!(
            content,
            "type,is_checked,task_name,time1,time2,tags\n\
             T,0,Buy milk,NA,NA\n\
             D,1,Submit report,2024-05-01T23:59:00,NA,urgent,work\n\
             E,0,Team sync,2024-05-02T09:00:00,2024-05-02T10:00:00\n"
        );
    }

    #[test]
    fn roundtrip() {
        let (_dir, storage) = test_storage();
        let tasks = sample_tasks();
        storage.save(&tasks).unwrap();
        assert_eq!(storage.load().unwrap(), tasks);
    }

    #[test]
    fn commas_are_quoted_not_lost() {
        let (_dir, storage) = test_storage();
        let mut task = Task::todo("Buy milk, eggs".to_string());
        task.tags = vec!["a,b".to_string()];
        storage.save(&[task.clone()]).unwrap();
        assert_eq!(storage.load().unwrap(), vec![task]);
    }

    #[test]
    fn existing_file_is_kept() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.csv");
        Storage::new(&path).unwrap().save(&sample_tasks()).unwrap();

        let reopened = Storage::new(&path).unwrap();
        assert_eq!(reopened.load().unwrap().len(), 3);
    }

    #[test]
    fn reads_legacy_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.csv");
        fs::write(
            &path,
            "type,is_checked,task_name,time1,time2,tags\n\
             T,0,milk\0 eggs,NA,NA,\n\
             D,1,report,2024-05-01T23:59,NA,work\n",
        )
        .unwrap();

        let tasks = Storage::new(&path).unwrap().load().unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].name, "milk, eggs");
        assert!(tasks[0].tags.is_empty());
        assert_eq!(
            tasks[1].kind(),
            TaskKind::Deadline {
                due: at(2024, 5, 1, 23, 59)
            }
        );
        assert_eq!(tasks[1].tags, vec!["work"]);
    }

    #[test]
    fn legacy_quotes_are_literal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.csv");
        fs::write(
            &path,
            "type,is_checked,task_name,time1,time2,tags\n\
             T,0,\"quoted\" thing,NA,NA,\n\
             T,0,say \"hi\",NA,NA,x\n",
        )
        .unwrap();

        let storage = Storage::new(&path).unwrap();
        let tasks = storage.load().unwrap();
        assert_eq!(tasks[0].name, "\"quoted\" thing");
        assert_eq!(tasks[1].name, "say \"hi\"");
        assert_eq!(tasks[1].tags, vec!["x"]);

        // Rewriting quotes the names, and they read back unchanged.
        storage.save(&tasks).unwrap();
        assert_eq!(storage.load().unwrap(), tasks);
    }

    #[test]
    fn quoted_names_written_here_are_unquoted_on_load() {
        let (_dir, storage) = test_storage();
        let task = Task::todo("\"quoted\", thing".to_string());
        storage.save(&[task.clone()]).unwrap();
        let content = fs::read_to_string(storage.path()).unwrap();
        assert!(content.contains("\"\"\"quoted\"\", thing\""));
        assert_eq!(storage.load().unwrap(), vec![task]);
    }

    #[test]
    fn header_mismatch_warns_and_continues() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.csv");
        fs::write(&path, "kind,done,name\nT,1,kept,NA,NA\n").unwrap();

        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let storage = tracing::subscriber::with_default(subscriber, || Storage::new(&path))
            .unwrap();

        let output = logs.contents();
        assert!(output.contains("WARN"));
        assert!(output.contains("task file header does not match"));
        assert!(output.contains("kind,done,name"));

        let tasks = storage.load().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].name, "kept");
        assert!(tasks[0].done);
        // The file itself is left as found.
        assert!(fs::read_to_string(&path).unwrap().starts_with("kind,done,name\n"));
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn skips_unknown_and_broken_records() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.csv");
        fs::write(
            &path,
            "type,is_checked,task_name,time1,time2,tags\n\
             X,0,mystery,NA,NA\n\
             D,0,no date,NA,NA\n\
             T\n\
             T,1,kept,NA,NA\n",
        )
        .unwrap();

        let tasks = Storage::new(&path).unwrap().load().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].name, "kept");
        assert!(tasks[0].done);
    }

    #[test]
    fn past_events_are_not_revalidated() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.csv");
        fs::write(
            &path,
            "type,is_checked,task_name,time1,time2,tags\n\
             E,0,odd,2020-01-01T10:00:00,2020-01-01T09:00:00\n",
        )
        .unwrap();

        let tasks = Storage::new(&path).unwrap().load().unwrap();
        assert_eq!(tasks.len(), 1);
    }

    #[test]
    fn load_missing_file_is_fatal() {
        let (_dir, storage) = test_storage();
        fs::remove_file(storage.path()).unwrap();
        let err = storage.load().unwrap_err();
        assert!(!err.is_user_error());
        assert_eq!(err.exit_code(), 2);
    }
}
