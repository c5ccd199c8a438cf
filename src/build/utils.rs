use super::inventory::Unit;
use super::command;
use crate::config::ResolvedConfig;
use crate::error::{BuildError, PathRole, Result};
use colored::*;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

pub const COMPILE_COMMANDS_FILE: &str = "compile_commands.json";

// --- Helper: Required Directories ---
pub fn check_required_dirs(config: &ResolvedConfig) -> Result<()> {
    let required = [
        (PathRole::Src, &config.src_dir),
        (PathRole::Include, &config.include_dir),
        (PathRole::Lib, &config.lib_dir),
    ];
    for (role, path) in required {
        if !path.is_dir() {
            return Err(BuildError::RequiredDirectoryMissing {
                role,
                path: path.clone(),
            });
        }
    }
    Ok(())
}

// --- Helper: Create Output Directory ---
/// Returns whether the directory had to be created.
pub fn ensure_dir(label: &str, path: &Path) -> Result<bool> {
    if path.is_dir() {
        return Ok(false);
    }
    println!(
        "{} [{}] {} directory not found",
        "!".yellow(),
        label,
        path.display()
    );
    fs::create_dir_all(path).map_err(|source| BuildError::CreateDir {
        path: path.to_path_buf(),
        source,
    })?;
    println!("   {} {} path created", "✓".green(), label);
    Ok(true)
}

/// `path` relative to the project root when it lives under it.
pub fn display_path<'a>(config: &ResolvedConfig, path: &'a Path) -> std::path::Display<'a> {
    path.strip_prefix(&config.root).unwrap_or(path).display()
}

// --- Helper: compile_commands.json ---
pub fn write_compile_commands(config: &ResolvedConfig, units: &[Unit]) -> Result<PathBuf> {
    let directory = config.root.to_string_lossy().to_string();
    let entries: Vec<serde_json::Value> = units
        .iter()
        .map(|unit| {
            json!({
                "directory": directory,
                "arguments": command::compile_command(config, unit).to_argv(),
                "file": unit.source.to_string_lossy(),
                "output": unit.artifact.to_string_lossy(),
            })
        })
        .collect();

    let json_str = serde_json::to_string_pretty(&entries)
        .map_err(|e| BuildError::CompileCommands(e.to_string()))?;
    let path = config.root.join(COMPILE_COMMANDS_FILE);
    fs::write(&path, json_str).map_err(|e| BuildError::CompileCommands(e.to_string()))?;
    Ok(path)
}
