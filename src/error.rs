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

//! Error types for the VM translator.
//!
//! This module defines all error types used throughout the translator,
//! including lexical, syntax and code generation errors.

use std::ops::Range;
use thiserror::Error;

/// A source span representing a range in the source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Get the length of this span.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Merge two spans into one that covers both.
    pub fn merge(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

/// Error codes for the translator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Lexical errors (E001-E020)
    InvalidCharacter,
    IntegerTooLarge,

    // Syntax errors (E100-E105)
    UnknownCommand,
    UnknownSegment,
    MissingOperand,
    UnexpectedOperand,
    ExpectedInteger,
    InvalidSymbol,

    // Code generation errors (E200-E207)
    InvalidPointerIndex,
    TempIndexOutOfRange,
    CannotPopConstant,
    ConstantOutOfRange,
    MissingFileName,
    MisplacedBootstrap,
    InvalidFileName,
    InvalidEntryName,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl ErrorCode {
    /// Get the numeric code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::InvalidCharacter => "E001",
            ErrorCode::IntegerTooLarge => "E020",

            ErrorCode::UnknownCommand => "E100",
            ErrorCode::UnknownSegment => "E101",
            ErrorCode::MissingOperand => "E102",
            ErrorCode::UnexpectedOperand => "E103",
            ErrorCode::ExpectedInteger => "E104",
            ErrorCode::InvalidSymbol => "E105",

            ErrorCode::InvalidPointerIndex => "E200",
            ErrorCode::TempIndexOutOfRange => "E201",
            ErrorCode::CannotPopConstant => "E202",
            ErrorCode::ConstantOutOfRange => "E203",
            ErrorCode::MissingFileName => "E204",
            ErrorCode::MisplacedBootstrap => "E205",
            ErrorCode::InvalidFileName => "E206",
            ErrorCode::InvalidEntryName => "E207",
        }
    }
}

/// A translation error with source location.
#[derive(Debug, Clone, Error)]
#[error("[{code}] {message}")]
pub struct TranslateError {
    /// The error code.
    pub code: ErrorCode,
    /// The error message.
    pub message: String,
    /// The source span where the error occurred.
    pub span: Span,
    /// Optional hint for fixing the error.
    pub hint: Option<String>,
}

impl TranslateError {
    /// Create a new translation error.
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        Self {
            code,
            message: message.into(),
            span,
            hint: None,
        }
    }

    /// Add a hint to this error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Get the error code string.
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }
}

/// Result type for translator operations.
pub type Result<T> = std::result::Result<T, TranslateError>;

/// Source location with line and column information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// The content of the line.
    pub line_content: String,
}

impl SourceLocation {
    /// Calculate line and column from a byte offset in source code.
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        let before = &source[..offset];

        let line = before.chars().filter(|&c| c == '\n').count() + 1;

        let last_newline = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = before[last_newline..].chars().count() + 1;

        let line_end = source[offset..]
            .find('\n')
            .map(|i| offset + i)
            .unwrap_or(source.len());
        let line_content = source[last_newline..line_end]
            .trim_end_matches('\r')
            .to_string();

        Self {
            line,
            column,
            line_content,
        }
    }
}

/// Format an error with source context.
pub fn format_error(error: &TranslateError, source: &str, filename: Option<&str>) -> String {
    let loc = SourceLocation::from_offset(source, error.span.start);
    let filename = filename.unwrap_or("<input>");

    let mut output = String::new();

    output.push_str(&format!("error[{}]: {}\n", error.code_str(), error.message));
    output.push_str(&format!("  --> {}:{}:{}\n", filename, loc.line, loc.column));

    let line_num_width = loc.line.to_string().len();
    output.push_str(&format!("{:>width$} |\n", "", width = line_num_width));
    output.push_str(&format!(
        "{:>width$} | {}\n",
        loc.line,
        loc.line_content,
        width = line_num_width
    ));

    // Underline the error span
    let underline_start = loc.column - 1;
    let underline_len = error
        .span
        .len()
        .max(1)
        .min(loc.line_content.len().saturating_sub(underline_start).max(1));
    output.push_str(&format!(
        "{:>width$} | {:>start$}{}\n",
        "",
        "",
        "^".repeat(underline_len),
        width = line_num_width,
        start = underline_start
    ));

    if let Some(hint) = &error.hint {
        output.push_str(&format!(
            "{:>width$} = hint: {}\n",
            "",
            hint,
            width = line_num_width
        ));
    }

    output
}
