//! Compile and link command assembly.
//!
//! Commands are explicit argument vectors handed straight to the process
//! spawner; nothing here goes through a shell or runs anything.

use super::inventory::Unit;
use crate::config::ResolvedConfig;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(&mut self, arg: impl Into<String>) -> &mut Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn path(&mut self, path: &Path) -> &mut Self {
        self.arg(path.to_string_lossy())
    }

    /// Value following the first `-o`, i.e. the file this command writes.
    pub fn output(&self) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == "-o")
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }

    /// Program followed by its arguments, as a JSON-friendly list.
    pub fn to_argv(&self) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().cloned())
            .collect()
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// `cc <cflags> -c -o <artifact> <source> <cdefs> -I<include>`
pub fn compile_command(config: &ResolvedConfig, unit: &Unit) -> CommandLine {
    let mut cmd = CommandLine::new(&config.cc);
    cmd.args(&config.cflags)
        .arg("-c")
        .arg("-o")
        .path(&unit.artifact)
        .path(&unit.source)
        .args(&config.cdefs)
        .arg(format!("-I{}", config.include_dir.display()));
    cmd
}

/// Links every unit's artifact, not only the ones rebuilt this run.
pub fn link_command(
    config: &ResolvedConfig,
    units: &[Unit],
    static_libs: &[PathBuf],
) -> CommandLine {
    let mut cmd = CommandLine::new(&config.cc);
    cmd.args(&config.cflags).arg("-o").path(&config.output_path());
    for unit in units {
        cmd.path(&unit.artifact);
    }
    cmd.arg(format!("-I{}", config.include_dir.display()))
        .arg(format!("-L{}", config.lib_dir.display()));
    for lib in static_libs {
        cmd.path(lib);
    }
    cmd.args(&config.cdefs)
        .args(&config.libs)
        .args(&config.ldflags);
    cmd
}
