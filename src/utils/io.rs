use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use thiserror::Error;
use serde::{Serialize, de::DeserializeOwned};

/// Error type for I/O operations
#[derive(Error, Debug)]
pub enum IoError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),
    #[error("IO error: {0}")]
    StdIo(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),
}

fn not_found_or(path: &Path, e: std::io::Error) -> IoError {
    if e.kind() == std::io::ErrorKind::NotFound {
        IoError::FileNotFound(path.to_path_buf())
    } else {
        IoError::StdIo(e)
    }
}

/// Reads a file to string with proper error handling
pub fn read_to_string(path: impl AsRef<Path>) -> Result<String, IoError> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|e| not_found_or(path, e))
}

/// Reads a newline-delimited file into whitespace-trimmed lines.
///
/// `\n`, `\r\n` and a lone `\r` all end a line. A trailing line ending does
/// not produce an extra empty line.
pub fn read_trimmed_lines(path: impl AsRef<Path>) -> Result<Vec<String>, IoError> {
    let contents = read_to_string(path)?.replace("\r\n", "\n").replace('\r', "\n");
    Ok(contents.lines().map(|line| line.trim().to_string()).collect())
}

/// Writes string to file, creating parent directories if needed
pub fn write_string(
    path: impl AsRef<Path>,
    contents: impl AsRef<str>
) -> Result<(), IoError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents.as_ref())?;
    Ok(())
}

/// Serializes data to a binary file using bincode
pub fn serialize_to_file<T: Serialize>(
    path: impl AsRef<Path>,
    data: &T,
) -> Result<(), IoError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    bincode::serialize_into(writer, data)?;
    Ok(())
}

/// Deserializes data from a binary file using bincode
pub fn deserialize_from_file<T: DeserializeOwned>(
    path: impl AsRef<Path>,
) -> Result<T, IoError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| not_found_or(path, e))?;
    let reader = BufReader::new(file);
    let data = bincode::deserialize_from(reader)?;
    Ok(data)
}

/// All regular files in `dir` with the given extension, sorted by path
pub fn get_files_with_extension(
    dir: impl AsRef<Path>,
    extension: &str,
) -> Result<Vec<PathBuf>, IoError> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(IoError::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() {
            if let Some(ext) = path.extension() {
                if ext == extension {
                    files.push(path);
                }
            }
        }
    }
    files.sort();
    Ok(files)
}
