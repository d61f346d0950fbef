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

//! Command parsing.
//!
//! Every VM command occupies exactly one line: a command word followed by
//! zero, one or two operands depending on the command.

use super::helpers::ParserHelpers;
use super::Parser;
use crate::ast::{ArithmeticOp, Command, Segment, Spanned};
use crate::error::{ErrorCode, Result, Span, TranslateError};
use crate::lexer::Token;

/// The command words understood by the parser, for error hints.
const COMMAND_WORDS: &str = "push, pop, add, sub, neg, eq, gt, lt, and, or, not, \
                             label, goto, if-goto, function, call, return";

/// Trait for command parsing operations.
pub trait CommandParser {
    /// Parse one command line, including its terminating newline.
    fn parse_command(&mut self) -> Result<Spanned<Command>>;

    /// Parse a segment name.
    fn parse_segment(&mut self, command: &str) -> Result<Segment>;

    /// Parse a label or function name.
    fn parse_symbol(&mut self, command: &str) -> Result<String>;

    /// Parse an unsigned 16-bit integer operand.
    fn parse_integer(&mut self, what: &str, command: &str) -> Result<u16>;

    /// Expect the end of the current line.
    fn expect_line_end(&mut self, command: &str) -> Result<()>;
}

impl CommandParser for Parser<'_> {
    fn parse_command(&mut self) -> Result<Spanned<Command>> {
        let line = self.line;
        let (token, start) = self
            .advance()
            .ok_or_else(|| self.missing_operand("a command", "end of file"))?;

        let word = match token {
            Token::Word(word) => word,
            other => {
                return Err(TranslateError::new(
                    ErrorCode::UnknownCommand,
                    format!("Expected a command, found {}", other),
                    start,
                )
                .with_hint(format!("valid commands are: {}", COMMAND_WORDS)));
            }
        };

        let command = match word.as_str() {
            "push" | "pop" => {
                let segment = self.parse_segment(&word)?;
                let index = self.parse_integer("an index", &word)?;
                if word == "push" {
                    Command::Push(segment, index)
                } else if segment == Segment::Constant {
                    return Err(TranslateError::new(
                        ErrorCode::CannotPopConstant,
                        format!("Cannot pop into the constant segment ('pop constant {}')", index),
                        start.merge(&self.previous_span()),
                    )
                    .with_hint("use 'pop temp 0' to discard the top of the stack"));
                } else {
                    Command::Pop(segment, index)
                }
            }
            "label" => Command::Label(self.parse_symbol(&word)?),
            "goto" => Command::Goto(self.parse_symbol(&word)?),
            "if-goto" => Command::IfGoto(self.parse_symbol(&word)?),
            "function" => {
                let name = self.parse_symbol(&word)?;
                let n_locals = self.parse_integer("a local count", &word)?;
                Command::Function { name, n_locals }
            }
            "call" => {
                let name = self.parse_symbol(&word)?;
                let n_args = self.parse_integer("an argument count", &word)?;
                Command::Call { name, n_args }
            }
            "return" => Command::Return,
            other => match ArithmeticOp::from_keyword(other) {
                Some(op) => Command::Arithmetic(op),
                None => {
                    return Err(TranslateError::new(
                        ErrorCode::UnknownCommand,
                        format!("Unknown command '{}'", other),
                        start,
                    )
                    .with_hint(format!("valid commands are: {}", COMMAND_WORDS)));
                }
            },
        };

        let span = start.merge(&self.previous_span());
        self.expect_line_end(&word)?;

        Ok(Spanned::new(command, span, line))
    }

    fn parse_segment(&mut self, command: &str) -> Result<Segment> {
        if self.at_line_end() {
            return Err(self.missing_operand("a segment", command));
        }
        let (token, span) = self
            .advance()
            .ok_or_else(|| self.missing_operand("a segment", command))?;

        token
            .as_word()
            .and_then(Segment::from_keyword)
            .ok_or_else(|| {
                TranslateError::new(
                    ErrorCode::UnknownSegment,
                    format!("Unknown segment {}", token),
                    span,
                )
                .with_hint(
                    "valid segments are: constant, local, argument, this, that, temp, pointer, static, sp",
                )
            })
    }

    fn parse_symbol(&mut self, command: &str) -> Result<String> {
        if self.at_line_end() {
            return Err(self.missing_operand("a name", command));
        }
        let (token, span) = self
            .advance()
            .ok_or_else(|| self.missing_operand("a name", command))?;

        match token {
            Token::Word(name) if is_valid_symbol(&name) => Ok(name),
            Token::Word(name) => Err(TranslateError::new(
                ErrorCode::InvalidSymbol,
                format!("Invalid name '{}'", name),
                span,
            )
            .with_hint("names may contain letters, digits, '_', '.', '$' and ':'")),
            other => Err(TranslateError::new(
                ErrorCode::InvalidSymbol,
                format!("Expected a name after '{}', found {}", command, other),
                span,
            )
            .with_hint("names must not start with a digit")),
        }
    }

    fn parse_integer(&mut self, what: &str, command: &str) -> Result<u16> {
        if self.at_line_end() {
            return Err(self.missing_operand(what, command));
        }
        let (token, span) = self
            .advance()
            .ok_or_else(|| self.missing_operand(what, command))?;

        match token {
            Token::Integer(value) => u16::try_from(value).map_err(|_| {
                TranslateError::new(
                    ErrorCode::IntegerTooLarge,
                    format!("Integer {} does not fit in 16 bits", value),
                    span,
                )
            }),
            other => Err(TranslateError::new(
                ErrorCode::ExpectedInteger,
                format!("Expected {} after '{}', found {}", what, command, other),
                span,
            )),
        }
    }

    fn expect_line_end(&mut self, command: &str) -> Result<()> {
        match self.peek() {
            None => Ok(()),
            Some(Token::Newline) => {
                self.advance();
                Ok(())
            }
            Some(extra) => {
                let message = format!("Unexpected operand {} after '{}'", extra, command);
                let span = self.peek_span().unwrap_or_else(|| self.previous_span());
                Err(TranslateError::new(ErrorCode::UnexpectedOperand, message, span))
            }
        }
    }
}

/// Check that a name is usable as an assembly symbol.
///
/// Applies to parsed labels and function names as well as names the
/// translator builds itself from file names and the entry function.
pub(crate) fn is_valid_symbol(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '$' | ':'))
}
