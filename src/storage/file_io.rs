//! JSON persistence helpers
//!
//! `profiles.json` is rewritten whole on every registry mutation, so writes
//! go to a sibling temp file that is renamed over the target.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::SwapperError;

fn storage_error(action: &str, path: &Path, err: impl std::fmt::Display) -> SwapperError {
    SwapperError::Storage(format!("Failed to {} {}: {}", action, path.display(), err))
}

/// Read a JSON document; a missing file yields `T::default()`
pub fn read_json<T, P>(path: P) -> Result<T, SwapperError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => return Err(storage_error("open", path, e)),
    };

    serde_json::from_reader(BufReader::new(file)).map_err(|e| storage_error("parse", path, e))
}

/// Replace `path` with the pretty-printed JSON of `data`
///
/// Readers see either the old document or the new one, never a torn write.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), SwapperError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| storage_error("create", parent, e))?;
    }

    let temp_path = path.with_extension("json.tmp");
    let write_temp = || -> Result<(), SwapperError> {
        let file = File::create(&temp_path).map_err(|e| storage_error("create", &temp_path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, data)
            .map_err(|e| storage_error("serialize", &temp_path, e))?;
        writer
            .flush()
            .and_then(|_| writer.get_ref().sync_all())
            .map_err(|e| storage_error("sync", &temp_path, e))
    };

    write_temp()
        .and_then(|_| fs::rename(&temp_path, path).map_err(|e| storage_error("replace", path, e)))
        .map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            e
        })
}
