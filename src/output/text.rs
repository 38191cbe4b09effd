use std::collections::BTreeSet;
use std::fmt::Write;

use crate::collector::ScanError;
use crate::error::Result;

use super::{OutputFormatter, ansi, sorted};

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Auto-detect: use colors if stdout is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    Always,
    Never,
}

/// One record per line, in report order, followed by a summary.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
        }
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        format!("{color}{text}{}", ansi::RESET)
    }

    fn format_record(&self, error: &ScanError) -> String {
        let color = if error.code().is_io() {
            ansi::YELLOW
        } else {
            ansi::RED
        };
        let code = self.colorize(error.code().as_str(), color);

        let mut line = String::new();
        if !error.file().is_empty() {
            let _ = write!(line, "{}:", error.file());
            if error.line() > 0 {
                let _ = write!(line, "{}:{}:", error.line(), error.column());
            }
            line.push(' ');
        }
        let _ = write!(line, "{code}: {}", error.details());
        line
    }

    fn format_summary(&self, errors: &[ScanError]) -> String {
        if errors.is_empty() {
            return self.colorize("No issues found", ansi::GREEN);
        }
        let files: BTreeSet<&str> = errors
            .iter()
            .map(ScanError::file)
            .filter(|file| !file.is_empty())
            .collect();
        let count = self.colorize(&errors.len().to_string(), ansi::RED);
        format!(
            "Summary: {count} {} found in {} {}",
            plural(errors.len(), "issue", "issues"),
            files.len(),
            plural(files.len(), "file", "files"),
        )
    }
}

const fn plural(n: usize, one: &'static str, many: &'static str) -> &'static str {
    if n == 1 { one } else { many }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, errors: &[ScanError]) -> Result<String> {
        let mut output = String::new();
        for error in sorted(errors) {
            output.push_str(&self.format_record(error));
            output.push('\n');
        }
        if !errors.is_empty() {
            output.push('\n');
        }
        output.push_str(&self.format_summary(errors));
        output.push('\n');
        Ok(output)
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
