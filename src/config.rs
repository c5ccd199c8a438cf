//! Configuration file parsing (`build.toml`).
//!
//! A project is described by three tables:
//!
//! ```toml
//! [project]
//! name = "app"
//! type = "executable"
//!
//! [compiler]
//! cc = "g++"
//! ldflags = []
//! libs = []
//! debug = { cdefs = ["-DDEBUG"], cflags = ["-g"] }
//! release = { cdefs = ["-DNDEBUG"], cflags = ["-O2"] }
//!
//! [paths]
//! bin = "bin"
//! obj = "obj"
//! src = "src"
//! include = "include"
//! lib = "lib"
//! ```
//!
//! [`BuildConfig::resolve`] turns the parsed file plus a [`Profile`] into the
//! [`ResolvedConfig`] the build core works from.

use crate::error::{BuildError, Result};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const CONFIG_FILE: &str = "build.toml";

#[derive(Deserialize, Debug, Clone)]
pub struct BuildConfig {
    pub project: ProjectConfig,
    pub compiler: CompilerConfig,
    pub paths: PathsConfig,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ProjectConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ProjectKind,
}

/// What the link step produces. `type = "executable"` selects an executable,
/// any other value a shared library.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(from = "String")]
pub enum ProjectKind {
    Executable,
    SharedLibrary,
}

impl From<String> for ProjectKind {
    fn from(value: String) -> Self {
        if value == "executable" {
            ProjectKind::Executable
        } else {
            ProjectKind::SharedLibrary
        }
    }
}

impl ProjectKind {
    pub fn output_extension(&self) -> &'static str {
        match self {
            ProjectKind::Executable => std::env::consts::EXE_SUFFIX,
            ProjectKind::SharedLibrary => std::env::consts::DLL_SUFFIX,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct CompilerConfig {
    pub cc: String,
    pub ldflags: Vec<String>,
    pub libs: Vec<String>,
    pub debug: ProfileFlags,
    pub release: ProfileFlags,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct ProfileFlags {
    pub cdefs: Vec<String>,
    pub cflags: Vec<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PathsConfig {
    pub bin: PathBuf,
    pub obj: PathBuf,
    pub src: PathBuf,
    pub include: PathBuf,
    pub lib: PathBuf,
}

/// Build profile selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    #[default]
    Debug,
    Release,
}

impl Profile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Debug => "debug",
            Profile::Release => "release",
        }
    }

    /// Subdirectory under `paths.bin` and `paths.obj` holding this profile's outputs.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Profile::Debug => "DEBUG",
            Profile::Release => "RELEASE",
        }
    }
}

impl FromStr for Profile {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "debug" => Ok(Profile::Debug),
            "release" => Ok(Profile::Release),
            other => Err(BuildError::InvalidProfileArgument(other.to_string())),
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the build needs for one invocation, with paths made absolute
/// against the project root and the profile already applied.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub name: String,
    pub kind: ProjectKind,
    pub profile: Profile,
    pub root: PathBuf,
    pub cc: String,
    pub cflags: Vec<String>,
    pub cdefs: Vec<String>,
    pub libs: Vec<String>,
    pub ldflags: Vec<String>,
    pub src_dir: PathBuf,
    pub include_dir: PathBuf,
    pub lib_dir: PathBuf,
    pub bin_dir: PathBuf,
    pub obj_dir: PathBuf,
}

impl ResolvedConfig {
    /// Path of the linked binary: `<bin>/<PROFILE>/<name><ext>`.
    pub fn output_path(&self) -> PathBuf {
        self.bin_dir
            .join(format!("{}{}", self.name, self.kind.output_extension()))
    }
}

impl BuildConfig {
    pub fn flags(&self, profile: Profile) -> &ProfileFlags {
        match profile {
            Profile::Debug => &self.compiler.debug,
            Profile::Release => &self.compiler.release,
        }
    }

    pub fn resolve(&self, root: &Path, profile: Profile) -> ResolvedConfig {
        let flags = self.flags(profile);
        ResolvedConfig {
            name: self.project.name.clone(),
            kind: self.project.kind,
            profile,
            root: root.to_path_buf(),
            cc: self.compiler.cc.clone(),
            cflags: flags.cflags.clone(),
            cdefs: flags.cdefs.clone(),
            libs: self.compiler.libs.clone(),
            ldflags: self.compiler.ldflags.clone(),
            src_dir: root.join(&self.paths.src),
            include_dir: root.join(&self.paths.include),
            lib_dir: root.join(&self.paths.lib),
            bin_dir: root.join(&self.paths.bin).join(profile.dir_name()),
            obj_dir: root.join(&self.paths.obj).join(profile.dir_name()),
        }
    }
}

// --- Load Config ---
pub fn load_config(path: &Path) -> Result<BuildConfig> {
    if !path.exists() {
        return Err(BuildError::ConfigNotFound(path.to_path_buf()));
    }
    let config_str = fs::read_to_string(path).map_err(|source| BuildError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&config_str).map_err(|source| BuildError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Directory that relative `[paths]` entries are resolved against.
pub fn project_root(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
