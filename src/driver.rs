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

//! Build driver.
//!
//! Collects the `.vm` files of an input path, translates them in order with
//! one shared [`CodeGenerator`] and hands back the complete program.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::ast::{Command, Spanned};
use crate::codegen::{CodeGenerator, Instruction};
use crate::config::TranslatorConfig;
use crate::error::{format_error, TranslateError};
use crate::parser;

/// Extension of VM source files.
pub const VM_EXTENSION: &str = "vm";

/// Errors that can occur while running a build.
#[derive(Debug, Error)]
pub enum DriverError {
    /// A directory without any `.vm` file.
    #[error("No .vm files found in {0}")]
    NoSources(PathBuf),

    /// The input is neither a `.vm` file nor a directory.
    #[error("Input must be a .vm file or a directory: {0}")]
    InvalidInput(PathBuf),

    /// An input could not be read.
    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The output could not be written.
    #[error("Cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A source file failed to translate.
    #[error("{file}: {error}")]
    Translate {
        /// Name of the file, for diagnostics.
        file: String,
        /// Full text of the file, for diagnostics.
        source_text: String,
        #[source]
        error: TranslateError,
    },

    /// The file watcher failed.
    #[error("File watch error: {0}")]
    Watch(String),
}

impl DriverError {
    /// Render the error for the terminal.
    ///
    /// Translation errors are shown with their source context.
    pub fn render(&self) -> String {
        match self {
            DriverError::Translate {
                file,
                source_text,
                error,
            } => format_error(error, source_text, Some(file.as_str())),
            other => format!("error: {}\n", other),
        }
    }

    /// Whether fixing the VM sources can clear this error.
    ///
    /// Watch mode keeps running after such errors and stops on any other.
    pub fn is_source_error(&self) -> bool {
        matches!(self, DriverError::Translate { .. })
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            DriverError::Translate { .. } => 1,
            DriverError::NoSources(_) | DriverError::InvalidInput(_) => 2,
            DriverError::Read { .. } | DriverError::Write { .. } | DriverError::Watch(_) => 3,
        }
    }
}

/// A VM source file loaded into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Display name, e.g. `Main.vm`.
    pub name: String,
    /// File contents.
    pub text: String,
}

impl SourceFile {
    /// Create a source file from its name and contents.
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Read a source file from disk.
    pub fn read(path: &Path) -> Result<Self, DriverError> {
        let text = std::fs::read_to_string(path).map_err(|source| DriverError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { name, text })
    }

    /// Parse the file into commands.
    pub fn parse(&self) -> Result<Vec<Spanned<Command>>, DriverError> {
        parser::parse_source(&self.text).map_err(|error| self.error(error))
    }

    fn error(&self, error: TranslateError) -> DriverError {
        DriverError::Translate {
            file: self.name.clone(),
            source_text: self.text.clone(),
            error,
        }
    }
}

/// The result of a build.
#[derive(Debug, Clone)]
pub struct Translation {
    /// The complete program.
    pub instructions: Vec<Instruction>,
    /// Names of the translated files, in translation order.
    pub files: Vec<String>,
}

/// Find the source files of an input path.
///
/// A `.vm` file stands for itself. A directory stands for every `.vm` file
/// directly inside it, sorted by name.
pub fn collect_sources(path: &Path) -> Result<Vec<PathBuf>, DriverError> {
    if path.is_dir() {
        let entries = std::fs::read_dir(path).map_err(|source| DriverError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut sources = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| DriverError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            let file = entry.path();
            if file.is_file() && has_vm_extension(&file) {
                sources.push(file);
            }
        }

        if sources.is_empty() {
            return Err(DriverError::NoSources(path.to_path_buf()));
        }
        sources.sort();
        Ok(sources)
    } else if has_vm_extension(path) {
        if !path.exists() {
            return Err(DriverError::Read {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "file not found"),
            });
        }
        Ok(vec![path.to_path_buf()])
    } else {
        Err(DriverError::InvalidInput(path.to_path_buf()))
    }
}

fn has_vm_extension(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(VM_EXTENSION)
}

/// Translate in-memory sources as one program.
///
/// The bootstrap is emitted first when `with_bootstrap` is set. Files are
/// translated in the given order; each one sets the static scope for its own
/// commands.
pub fn translate_sources(
    sources: &[SourceFile],
    config: &TranslatorConfig,
    with_bootstrap: bool,
) -> Result<Vec<Instruction>, DriverError> {
    let mut generator = CodeGenerator::new().with_comments(config.emit_comments);
    let mut instructions = Vec::new();

    if with_bootstrap {
        let code = generator
            .bootstrap(&config.entry_function)
            .map_err(|error| DriverError::Translate {
                file: "<bootstrap>".to_string(),
                source_text: String::new(),
                error,
            })?;
        instructions.extend(code);
    }

    for source in sources {
        let commands = source.parse()?;
        log::debug!("Translating {} ({} commands)", source.name, commands.len());

        generator.set_file_name(&source.name);
        let code = generator
            .translate_all(&commands)
            .map_err(|error| source.error(error))?;
        instructions.extend(code);
    }

    log::debug!(
        "Emitted {} instructions ({} comparison labels, {} return labels)",
        instructions.len(),
        generator.labels().comparisons_issued(),
        generator.labels().calls_issued()
    );
    Ok(instructions)
}

/// Translate a `.vm` file or a directory of them.
pub fn translate_path(path: &Path, config: &TranslatorConfig) -> Result<Translation, DriverError> {
    let paths = collect_sources(path)?;
    let sources = paths
        .iter()
        .map(|p| SourceFile::read(p))
        .collect::<Result<Vec<_>, _>>()?;

    let with_bootstrap = config.bootstrap.applies(path.is_dir());
    log::debug!(
        "Translating {} file(s) from {}, bootstrap {}",
        sources.len(),
        path.display(),
        if with_bootstrap { "on" } else { "off" }
    );

    let instructions = translate_sources(&sources, config, with_bootstrap)?;
    Ok(Translation {
        instructions,
        files: sources.into_iter().map(|s| s.name).collect(),
    })
}

/// Write a translation to `path`.
pub fn write_translation(translation: &Translation, path: &Path) -> Result<(), DriverError> {
    crate::output::write_output(&translation.instructions, path).map_err(|source| {
        DriverError::Write {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BootstrapMode;
    use crate::error::ErrorCode;
    use std::fs;
    use tempfile::TempDir;

    fn no_comments() -> TranslatorConfig {
        TranslatorConfig::default().with_comments(false)
    }

    #[test]
    fn test_only_translate_errors_are_source_errors() {
        let translate = translate_sources(
            &[SourceFile::new("Main.vm", "pop pointer 2\n")],
            &no_comments(),
            false,
        )
        .unwrap_err();
        assert!(translate.is_source_error());
        assert_eq!(translate.exit_code(), 1);

        let invalid = DriverError::InvalidInput(PathBuf::from("notes.txt"));
        assert!(!invalid.is_source_error());
        assert_eq!(invalid.exit_code(), 2);
        assert!(!DriverError::NoSources(PathBuf::from("empty")).is_source_error());
        let missing = collect_sources(Path::new("/nonexistent/Missing.vm")).unwrap_err();
        assert!(!missing.is_source_error());
        assert_eq!(missing.exit_code(), 3);
    }

    #[test]
    fn test_collect_sources_sorted() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("Sys.vm"), "").unwrap();
        fs::write(temp_dir.path().join("Main.vm"), "").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "").unwrap();

        let sources = collect_sources(temp_dir.path()).unwrap();
        let names: Vec<_> = sources
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["Main.vm", "Sys.vm"]);
    }

    #[test]
    fn test_collect_sources_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let err = collect_sources(temp_dir.path()).unwrap_err();
        assert!(matches!(err, DriverError::NoSources(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_collect_sources_rejects_other_files() {
        let err = collect_sources(Path::new("program.asm")).unwrap_err();
        assert!(matches!(err, DriverError::InvalidInput(_)));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = collect_sources(Path::new("/nonexistent/Main.vm")).unwrap_err();
        assert!(matches!(err, DriverError::Read { .. }));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_translate_sources_qualifies_statics_per_file() {
        let sources = [
            SourceFile::new("A.vm", "push static 0\n"),
            SourceFile::new("B.vm", "push static 0\n"),
        ];
        let code = translate_sources(&sources, &no_comments(), false).unwrap();
        assert!(code.contains(&Instruction::at_symbol("A.0")));
        assert!(code.contains(&Instruction::at_symbol("B.0")));
    }

    #[test]
    fn test_bootstrap_comes_first() {
        let sources = [SourceFile::new("Sys.vm", "function Sys.init 0\n")];
        let code = translate_sources(&sources, &no_comments(), true).unwrap();
        assert_eq!(code[0], Instruction::at(256));
    }

    #[test]
    fn test_translate_error_keeps_source_context() {
        let sources = [SourceFile::new("Bad.vm", "push constant 1\npop temp 11\n")];
        let err = translate_sources(&sources, &no_comments(), false).unwrap_err();
        match &err {
            DriverError::Translate { file, error, .. } => {
                assert_eq!(file, "Bad.vm");
                assert_eq!(error.code, ErrorCode::TempIndexOutOfRange);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(err.render().contains("--> Bad.vm:2:1"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_translate_path_directory() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("Sys.vm"),
            "function Sys.init 0\nlabel HALT\ngoto HALT\n",
        )
        .unwrap();
        fs::write(
            temp_dir.path().join("Main.vm"),
            "function Main.main 0\npush constant 1\nreturn\n",
        )
        .unwrap();

        let translation = translate_path(temp_dir.path(), &no_comments()).unwrap();
        assert_eq!(translation.files, ["Main.vm", "Sys.vm"]);
        assert_eq!(translation.instructions[0], Instruction::at(256));
    }

    #[test]
    fn test_translate_path_single_file_has_no_bootstrap() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("Simple.vm");
        fs::write(&file, "push constant 1\n").unwrap();

        let translation = translate_path(&file, &no_comments()).unwrap();
        assert_eq!(translation.instructions[0], Instruction::at(1));

        let forced = translate_path(
            &file,
            &no_comments().with_bootstrap(BootstrapMode::Always),
        )
        .unwrap();
        assert_eq!(forced.instructions[0], Instruction::at(256));
    }
}
