//! Filesystem modification times.

use crate::error::{BuildError, Result};
use colored::*;
use std::fs;
use std::path::Path;
use std::time::SystemTime;

/// Last-modified instant of a file, or `Unknown` when it could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stamp {
    Known(SystemTime),
    Unknown,
}

impl Stamp {
    pub fn is_known(&self) -> bool {
        matches!(self, Stamp::Known(_))
    }

    /// Strictly newer. Equal instants are not newer; an unknown side never compares.
    pub fn is_newer_than(&self, other: &Stamp) -> Option<bool> {
        match (self, other) {
            (Stamp::Known(a), Stamp::Known(b)) => Some(a > b),
            _ => None,
        }
    }
}

pub fn read(path: &Path) -> Result<SystemTime> {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .map_err(|source| BuildError::TimestampUnavailable {
            path: path.to_path_buf(),
            source,
        })
}

/// Like [`read`] but never fails: the error is printed and `Unknown` returned.
pub fn observe(path: &Path) -> Stamp {
    match read(path) {
        Ok(time) => Stamp::Known(time),
        Err(e) => {
            println!("{} {}", "!".yellow(), e);
            Stamp::Unknown
        }
    }
}
