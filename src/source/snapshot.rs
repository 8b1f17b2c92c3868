use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use tracing::info;

use super::SourceError;
use crate::github::PullRequestRecord;

/// Read a JSON array of records written by [`save_records`].
pub fn load_records(path: &Path) -> Result<Vec<PullRequestRecord>, SourceError> {
    let file = File::open(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records: Vec<PullRequestRecord> =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| SourceError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    info!(path = %path.display(), count = records.len(), "Loaded snapshot");
    Ok(records)
}

pub fn save_records(path: &Path, records: &[PullRequestRecord]) -> Result<(), SourceError> {
    let io_err = |source: std::io::Error| SourceError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
    serde_json::to_writer_pretty(&mut writer, records).map_err(|source| SourceError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(io_err)?;

    info!(path = %path.display(), count = records.len(), "Saved snapshot");
    Ok(())
}
