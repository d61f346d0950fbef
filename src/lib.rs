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

//! VMTrans Library
//!
//! This library translates programs for a stack-based virtual machine into
//! assembly for the 16-bit Hack computer.
//!
//! # Modules
//!
//! - [`error`] - Error types and error reporting
//! - [`lexer`] - Tokenization of VM source
//! - [`parser`] - Parsing tokens into commands
//! - [`ast`] - VM command definitions
//! - [`codegen`] - Hack assembly generation
//! - [`config`] - Translator options
//! - [`driver`] - Multi-file builds
//! - [`output`] - Assembly file writing
//! - [`watcher`] - Re-translation on file changes
//!
//! # Example
//!
//! ```no_run
//! use vmtrans::{config::TranslatorConfig, driver, output};
//! use std::path::Path;
//!
//! fn build(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
//!     let translation = driver::translate_path(input, &TranslatorConfig::default())?;
//!     output::write_output(&translation.instructions, &output::default_output_path(input))?;
//!     Ok(())
//! }
//! ```

pub mod ast;
pub mod codegen;
pub mod config;
pub mod driver;
pub mod error;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod watcher;

// Re-export commonly used types
pub use ast::{ArithmeticOp, Command, Segment, Spanned};
pub use codegen::{CodeGenerator, Instruction};
pub use config::{BootstrapMode, TranslatorConfig};
pub use error::{format_error, ErrorCode, Result, SourceLocation, Span, TranslateError};
pub use lexer::Token;

/// The version of the translator.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of the translator.
pub const NAME: &str = "VMTrans";

/// Translate the source of a single VM file.
///
/// `file_name` qualifies the file's `static` symbols. No bootstrap is
/// emitted.
///
/// # Example
///
/// ```
/// let code = vmtrans::translate("push constant 7\npush constant 8\nadd\n", "Main").unwrap();
/// let text = vmtrans::output::render(&code);
/// assert!(text.contains("M=D+M"));
/// ```
pub fn translate(source: &str, file_name: &str) -> Result<Vec<Instruction>> {
    let commands = parser::parse_source(source)?;
    codegen::generate(&commands, file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "VMTrans");
    }

    #[test]
    fn test_translate_reports_first_error() {
        let err = translate("push constant 1\npop constant 0\n", "Main").unwrap_err();
        assert_eq!(err.code, ErrorCode::CannotPopConstant);
    }
}
