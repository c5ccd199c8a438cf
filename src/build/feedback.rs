use colored::*;

/// Turns raw compiler/linker stderr into a hint about which `build.toml` key to look at.
pub struct FeedbackAnalyzer;

impl FeedbackAnalyzer {
    pub fn analyze(output: &str) -> Option<String> {
        // Entry point missing while linking an executable
        if output.contains("undefined reference to `main'")
            || output.contains("entry point must be defined")
        {
            return Some(format!(
                "The link step found no {} function.\nAdd one, or set {} in [project] to build a shared library.",
                "main()".bold().yellow(),
                "type = \"library\"".bold().green()
            ));
        }

        // Unresolved symbols from a library that was never linked
        if output.contains("undefined reference to")
            || output.contains("Undefined symbols")
            || output.contains("LNK2019")
        {
            return Some(format!(
                "It looks like a {} error.\nCheck {} in [compiler] and the static libraries under [paths] {}.",
                "Linker".bold().red(),
                "libs".bold().yellow(),
                "lib".bold().yellow()
            ));
        }

        if (output.contains("fatal error: ") && output.contains("No such file or directory"))
            || output.contains("file not found")
        {
            return Some(format!(
                "It looks like a {} error.\nHeaders are searched in [paths] {}; anything else needs an -I entry in {}.",
                "Missing Header".bold().red(),
                "include".bold().yellow(),
                "cflags".bold().yellow()
            ));
        }

        if output.contains("failed to execute") {
            return Some(format!(
                "The compiler could not be started. Check {} in [compiler].",
                "cc".bold().yellow()
            ));
        }

        None
    }
}
