// VMTrans - A translator from stack-based VM code to Hack assembly
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Translator configuration.
//!
//! Every option comes from the command line; [`TranslatorConfig`] is the
//! value the CLI lowers its arguments into before handing them to the driver.

use crate::codegen::constants::DEFAULT_ENTRY_FUNCTION;

/// When to emit the bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum BootstrapMode {
    /// Only when translating a directory.
    #[default]
    Auto,
    /// Always, even for a single file.
    Always,
    /// Never.
    Never,
}

impl BootstrapMode {
    /// Whether the bootstrap applies to an input that is (or is not) a
    /// directory.
    pub fn applies(&self, is_directory: bool) -> bool {
        match self {
            BootstrapMode::Auto => is_directory,
            BootstrapMode::Always => true,
            BootstrapMode::Never => false,
        }
    }
}

/// Options for one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatorConfig {
    /// Function the bootstrap calls.
    pub entry_function: String,
    /// When to emit the bootstrap.
    pub bootstrap: BootstrapMode,
    /// Whether to precede each command's code with a `// command` line.
    pub emit_comments: bool,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            entry_function: DEFAULT_ENTRY_FUNCTION.to_string(),
            bootstrap: BootstrapMode::Auto,
            emit_comments: true,
        }
    }
}

impl TranslatorConfig {
    /// Set the entry function.
    pub fn with_entry(mut self, entry: impl Into<String>) -> Self {
        self.entry_function = entry.into();
        self
    }

    /// Set the bootstrap mode.
    pub fn with_bootstrap(mut self, mode: BootstrapMode) -> Self {
        self.bootstrap = mode;
        self
    }

    /// Enable or disable source comments.
    pub fn with_comments(mut self, enabled: bool) -> Self {
        self.emit_comments = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TranslatorConfig::default();
        assert_eq!(config.entry_function, "Sys.init");
        assert_eq!(config.bootstrap, BootstrapMode::Auto);
        assert!(config.emit_comments);
    }

    #[test]
    fn test_bootstrap_mode() {
        assert!(BootstrapMode::Auto.applies(true));
        assert!(!BootstrapMode::Auto.applies(false));
        assert!(BootstrapMode::Always.applies(false));
        assert!(!BootstrapMode::Never.applies(true));
    }

    #[test]
    fn test_builder() {
        let config = TranslatorConfig::default()
            .with_entry("Main.main")
            .with_bootstrap(BootstrapMode::Never)
            .with_comments(false);
        assert_eq!(config.entry_function, "Main.main");
        assert_eq!(config.bootstrap, BootstrapMode::Never);
        assert!(!config.emit_comments);
    }
}
