use std::{
    fs::{OpenOptions, create_dir_all},
    io,
    path::PathBuf,
};

use log::debug;
use serde::Serialize;

/// One visited cell and its position in the traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TraversalRecord {
    pub index: u64,
    pub x: i32,
    pub y: i32,
}

/// Appends traversals as `index,x,y` rows to CSV files under a base directory.
#[derive(Debug, Clone)]
pub struct CsvRecorder {
    base_path: PathBuf,
}

impl CsvRecorder {
    pub fn new(base_path: impl Into<PathBuf>) -> CsvRecorder {
        CsvRecorder {
            base_path: base_path.into(),
        }
    }

    /// Path the recorder writes `subpath` to, with a `.csv` extension.
    pub fn path_for(&self, subpath: impl Into<PathBuf>) -> PathBuf {
        let mut path = self.base_path.clone();
        path.push(subpath.into());
        if path.extension().is_none_or(|ext| ext != "csv") {
            let mut name = path.file_name().unwrap_or_default().to_os_string();
            name.push(".csv");
            path.set_file_name(name);
        }
        path
    }

    /// Appends `cells` to the file at `subpath`, returning how many rows were written.
    pub fn record(
        &self,
        subpath: impl Into<PathBuf>,
        cells: impl IntoIterator<Item = (i32, i32)>,
    ) -> Result<u64, io::Error> {
        let path = self.path_for(subpath);
        if let Some(parent) = path.parent() {
            create_dir_all(parent)?;
        }
        debug!("recording traversal to {}", path.display());
        let file = OpenOptions::new().append(true).create(true).open(path)?;
        write_records(file, cells)
    }
}

/// Writes `cells` as headerless `index,x,y` rows to any writer.
pub fn write_records(
    writer: impl io::Write,
    cells: impl IntoIterator<Item = (i32, i32)>,
) -> Result<u64, io::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    let mut count = 0;
    for (index, (x, y)) in (0u64..).zip(cells) {
        writer.serialize(TraversalRecord { index, x, y })?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}

#[cfg(test)]
mod test {
    use std::{fs, path::PathBuf, time::SystemTime};

    use super::{CsvRecorder, write_records};
    use crate::{fast_spiral::FastSpiral, region::Region};

    #[test]
    fn test_write_records() {
        let region = Region::new(0, 0, 2, 0).unwrap();
        let mut out = Vec::new();
        let count = write_records(&mut out, FastSpiral::new(region)).unwrap();
        assert_eq!(count, 3);
        assert_eq!(String::from_utf8(out).unwrap(), "0,1,0\n1,2,0\n2,0,0\n");
    }

    #[test]
    fn test_path_for() {
        let recorder = CsvRecorder::new("runs");
        assert_eq!(recorder.path_for("a"), PathBuf::from("runs/a.csv"));
        assert_eq!(recorder.path_for("a.csv"), PathBuf::from("runs/a.csv"));
        assert_eq!(recorder.path_for("b/c.txt"), PathBuf::from("runs/b/c.txt.csv"));
    }

    #[test]
    fn test_record_appends() {
        let nanos = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("tile-spiral-csv-{nanos}"));
        let recorder = CsvRecorder::new(&dir);
        assert_eq!(recorder.record("nested/run", [(4, 5)]).unwrap(), 1);
        assert_eq!(recorder.record("nested/run", [(6, 7)]).unwrap(), 1);
        let contents = fs::read_to_string(dir.join("nested/run.csv")).unwrap();
        assert_eq!(contents, "0,4,5\n0,6,7\n");
        let _ = fs::remove_dir_all(dir);
    }
}
