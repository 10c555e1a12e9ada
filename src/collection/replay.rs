//! Replaying recorded snapshots from a JSON-lines trace.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use super::{ObservationSource, Snapshot};
use crate::{
    constants::REPLAY_TIMESTAMP,
    reading::{BatteryExtras, ExtraValue},
    utils::error::{BatstatError, Result},
};

/// Reads one snapshot per line. Each line is a JSON object holding a
/// `timestamp` in milliseconds plus the battery extras. Blank lines and lines
/// starting with `#` are skipped.
pub struct ReplaySource {
    lines: Box<dyn Iterator<Item = std::io::Result<String>>>,
    line_number: usize,
}

impl ReplaySource {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|err| {
            BatstatError::InvalidIo(format!("could not open '{}': {err}", path.display()))
        })?;

        Ok(Self::from_reader(BufReader::new(file)))
    }

    pub fn from_reader<R: BufRead + 'static>(reader: R) -> Self {
        Self {
            lines: Box::new(reader.lines()),
            line_number: 0,
        }
    }
}

impl ObservationSource for ReplaySource {
    fn next_snapshot(&mut self) -> Result<Option<Snapshot>> {
        for line in self.lines.by_ref() {
            self.line_number += 1;
            let line = line?;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            return parse_line(self.line_number, line).map(Some);
        }

        Ok(None)
    }

    fn is_paced(&self) -> bool {
        false
    }
}

fn parse_line(line_number: usize, line: &str) -> Result<Snapshot> {
    let mut extras: BatteryExtras = serde_json::from_str(line)
        .map_err(|err| BatstatError::replay(line_number, err.to_string()))?;

    let timestamp_millis = match extras.remove(REPLAY_TIMESTAMP) {
        Some(ExtraValue::Int(timestamp)) => u64::try_from(timestamp)
            .map_err(|_| BatstatError::replay(line_number, "'timestamp' cannot be negative"))?,
        Some(_) => {
            return Err(BatstatError::replay(
                line_number,
                "'timestamp' must be a whole number of milliseconds",
            ));
        }
        None => return Err(BatstatError::replay(line_number, "missing 'timestamp'")),
    };

    Ok(Snapshot::new(timestamp_millis, extras))
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use super::*;
    use crate::constants::*;

    fn source(trace: &str) -> ReplaySource {
        ReplaySource::from_reader(Cursor::new(trace.to_string()))
    }

    #[test]
    fn reads_snapshots_in_order() {
        let mut replay = source(indoc::indoc! {r#"
            # unplugged
            {"timestamp": 0, "level": 50, "plugged": 0}

            {"timestamp": 1000, "level": 49, "technology": "Li-ion"}
        "#});

        let first = replay.next_snapshot().unwrap().unwrap();
        assert_eq!(first.timestamp_millis, 0);
        assert_eq!(first.extras.get_int(EXTRA_LEVEL, -1), 50);
        assert!(first.extras.get(REPLAY_TIMESTAMP).is_none());

        let second = replay.next_snapshot().unwrap().unwrap();
        assert_eq!(second.timestamp_millis, 1000);
        assert_eq!(second.extras.get_str(EXTRA_TECHNOLOGY), Some("Li-ion"));

        assert_eq!(replay.next_snapshot().unwrap(), None);
        assert_eq!(replay.next_snapshot().unwrap(), None);
        assert!(!replay.is_paced());
    }

    #[test]
    fn bad_lines_name_the_line() {
        let mut replay = source("{\"timestamp\": 0}\n\n{\"level\": 3}\n");
        replay.next_snapshot().unwrap();

        assert_eq!(
            replay.next_snapshot(),
            Err(BatstatError::replay(3, "missing 'timestamp'"))
        );
    }

    #[test]
    fn rejects_bad_timestamps() {
        assert!(matches!(
            source("{\"timestamp\": -5}").next_snapshot(),
            Err(BatstatError::Replay { line: 1, .. })
        ));
        assert!(matches!(
            source("{\"timestamp\": \"noon\"}").next_snapshot(),
            Err(BatstatError::Replay { line: 1, .. })
        ));
        assert!(matches!(
            source("not json").next_snapshot(),
            Err(BatstatError::Replay { line: 1, .. })
        ));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            ReplaySource::open(Path::new("./does/not/exist.jsonl")),
            Err(BatstatError::InvalidIo(_))
        ));
    }
}
