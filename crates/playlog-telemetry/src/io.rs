//! CSV I/O and atomic file operations

use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

fn create_parent(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Create a CSV file containing only `header` if it does not exist yet
pub fn ensure_csv(path: &Path, header: &[&str]) -> std::io::Result<()> {
    if path.exists() {
        return Ok(());
    }
    write_csv::<()>(path, header, &[])
}

/// Append one row to a CSV file, writing `header` first when the file is new or empty
pub fn append_csv<T: Serialize>(path: &Path, header: &[&str], record: &T) -> std::io::Result<()> {
    create_parent(path)?;

    let mut file = OpenOptions::new()
        .create(true)
        .read(true)
        .append(true)
        .open(path)?;
    let needs_header = file.metadata()?.len() == 0;
    if !needs_header && !ends_with_newline(&mut file)? {
        // Previous write was cut off; start the new row on its own line
        file.write_all(b"\n")?;
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    if needs_header {
        writer.write_record(header)?;
    }
    writer.serialize(record)?;
    writer.flush()?;
    Ok(())
}

fn ends_with_newline(file: &mut File) -> std::io::Result<bool> {
    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

/// Read all rows from a CSV file, skipping rows that fail to deserialize
pub fn read_csv<T: for<'de> Deserialize<'de>>(path: &Path) -> std::io::Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut reader = csv::Reader::from_path(path)?;
    let records = reader
        .deserialize()
        .filter_map(|row| row.ok()) // Skip malformed rows
        .collect();
    Ok(records)
}

/// Read all rows from a CSV file, failing on the first malformed row
pub fn read_csv_strict<T: for<'de> Deserialize<'de>>(path: &Path) -> std::io::Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut reader = csv::Reader::from_path(path)?;
    let records = reader.deserialize().collect::<Result<Vec<T>, csv::Error>>()?;
    Ok(records)
}

/// Rewrite a CSV file with `header` followed by `records`, atomically
pub fn write_csv<T: Serialize>(path: &Path, header: &[&str], records: &[T]) -> std::io::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(header)?;
    for record in records {
        writer.serialize(record)?;
    }
    let data = writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    atomic_write(path, &data)
}

/// Write data atomically using temp file + rename
pub fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    create_parent(path)?;

    let temp_path = path.with_extension("tmp");
    std::fs::write(&temp_path, data)?;
    std::fs::rename(temp_path, path)?;
    Ok(())
}
