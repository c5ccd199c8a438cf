//! Source and artifact discovery.
//!
//! Units are keyed by their path relative to the source root, without the
//! extension and with `/` separators, so `src/net/socket.cpp` becomes
//! `net/socket` and compiles to `<obj>/net/socket.o`. Artifacts are found by
//! walking the artifact root the same way, which keeps the two maps
//! comparable by name.

use crate::error::{BuildError, Result};
use crate::timestamp::{self, Stamp};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const SOURCE_EXT: &str = "cpp";
pub const ARTIFACT_EXT: &str = "o";
pub const STATIC_LIB_EXT: &str = "a";

/// One translation unit and its object file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub name: String,
    pub source: PathBuf,
    pub artifact: PathBuf,
    pub source_stamp: Stamp,
    /// `None` when no artifact exists yet.
    pub artifact_stamp: Option<Stamp>,
}

#[derive(Debug, Clone, Default)]
pub struct Inventory {
    /// Discovery order; drives compile and link order.
    pub units: Vec<Unit>,
    pub sources: BTreeMap<String, Stamp>,
    pub artifacts: BTreeMap<String, Stamp>,
}

pub fn artifact_path(artifact_root: &Path, name: &str, artifact_ext: &str) -> PathBuf {
    artifact_root.join(format!("{}.{}", name, artifact_ext))
}

/// Relative path of `path` under `root`, extension stripped, `/`-joined.
pub fn unit_name(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?.with_extension("");
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

fn files_with_extension(root: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|e| e == ext) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

pub fn build_inventory(
    source_root: &Path,
    artifact_root: &Path,
    source_ext: &str,
    artifact_ext: &str,
) -> Result<Inventory> {
    if !source_root.is_dir() {
        return Err(BuildError::DirectoryNotFound(source_root.to_path_buf()));
    }

    let mut inventory = Inventory::default();

    // A missing artifact root just means nothing has been built yet.
    if artifact_root.is_dir() {
        for path in files_with_extension(artifact_root, artifact_ext)? {
            if let Some(name) = unit_name(artifact_root, &path) {
                inventory.artifacts.insert(name, timestamp::observe(&path));
            }
        }
    }

    for path in files_with_extension(source_root, source_ext)? {
        let Some(name) = unit_name(source_root, &path) else {
            continue;
        };
        let source_stamp = timestamp::observe(&path);
        inventory.sources.insert(name.clone(), source_stamp);
        inventory.units.push(Unit {
            artifact: artifact_path(artifact_root, &name, artifact_ext),
            artifact_stamp: inventory.artifacts.get(&name).copied(),
            source: path,
            source_stamp,
            name,
        });
    }

    Ok(inventory)
}

/// Every static library under `lib_root`, recursively, in sorted order.
pub fn static_libraries(lib_root: &Path) -> Result<Vec<PathBuf>> {
    if !lib_root.is_dir() {
        return Err(BuildError::DirectoryNotFound(lib_root.to_path_buf()));
    }
    files_with_extension(lib_root, STATIC_LIB_EXT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_unit_name_nested() {
        let root = Path::new("/p/src");
        assert_eq!(
            unit_name(root, Path::new("/p/src/net/socket.cpp")).as_deref(),
            Some("net/socket")
        );
        assert_eq!(
            unit_name(root, Path::new("/p/src/main.cpp")).as_deref(),
            Some("main")
        );
        assert_eq!(unit_name(root, Path::new("/elsewhere/main.cpp")), None);
    }

    #[test]
    fn test_missing_source_root() {
        let dir = tempfile::tempdir().unwrap();
        let err = build_inventory(
            &dir.path().join("src"),
            &dir.path().join("obj"),
            SOURCE_EXT,
            ARTIFACT_EXT,
        )
        .unwrap_err();
        assert!(matches!(err, BuildError::DirectoryNotFound(_)));
    }

    #[test]
    fn test_sources_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        touch(&src.join("b.cpp"));
        touch(&src.join("a.cpp"));
        touch(&src.join("util.hpp"));
        touch(&src.join("notes.txt"));

        let inv =
            build_inventory(&src, &dir.path().join("obj"), SOURCE_EXT, ARTIFACT_EXT).unwrap();
        let names: Vec<&str> = inv.units.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert!(inv.artifacts.is_empty());
        assert_eq!(inv.units[0].artifact, dir.path().join("obj").join("a.o"));
        assert_eq!(inv.units[0].artifact_stamp, None);
        assert!(inv.units[0].source_stamp.is_known());
    }

    #[test]
    fn test_same_stem_in_subdirectories_stays_distinct() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        let obj = dir.path().join("obj");
        touch(&src.join("socket.cpp"));
        touch(&src.join("net").join("socket.cpp"));

        let inv = build_inventory(&src, &obj, SOURCE_EXT, ARTIFACT_EXT).unwrap();
        assert_eq!(inv.units.len(), 2);
        assert_eq!(inv.sources.len(), 2);
        assert!(inv.sources.contains_key("socket"));
        assert!(inv.sources.contains_key("net/socket"));
        let nested = inv.units.iter().find(|u| u.name == "net/socket").unwrap();
        assert_eq!(nested.artifact, obj.join("net/socket.o"));
    }

    #[test]
    fn test_artifacts_matched_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        let obj = dir.path().join("obj");
        touch(&src.join("main.cpp"));
        touch(&src.join("net").join("socket.cpp"));
        touch(&obj.join("main.o"));
        touch(&obj.join("net").join("socket.o"));
        touch(&obj.join("orphan.o"));
        touch(&obj.join("main.d"));

        let inv = build_inventory(&src, &obj, SOURCE_EXT, ARTIFACT_EXT).unwrap();
        assert_eq!(inv.artifacts.len(), 3);
        assert!(inv.artifacts.contains_key("orphan"));
        assert!(inv.units.iter().all(|u| u.artifact_stamp.is_some()));
    }

    #[test]
    fn test_static_libraries_recursive() {
        let dir = tempfile::tempdir().unwrap();
        let lib = dir.path().join("lib");
        touch(&lib.join("libz.a"));
        touch(&lib.join("vendor").join("libfoo.a"));
        touch(&lib.join("libbar.so"));

        let libs = static_libraries(&lib).unwrap();
        assert_eq!(
            libs,
            vec![lib.join("libz.a"), lib.join("vendor").join("libfoo.a")]
        );
    }
}
