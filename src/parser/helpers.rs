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

//! Parser helper methods for token stream navigation and error handling.
//!
//! This module provides utility methods for the parser including:
//! - Token stream navigation (peek, advance)
//! - Line boundary checks
//! - Error creation

use super::Parser;
use crate::error::{ErrorCode, Span, TranslateError};
use crate::lexer::Token;

/// Trait for parser helper operations.
pub trait ParserHelpers<'a> {
    /// Check if we've reached the end of the token stream.
    fn is_at_end(&self) -> bool;

    /// Peek at the current token without advancing.
    fn peek(&self) -> Option<&Token>;

    /// Peek at the current token's span.
    fn peek_span(&self) -> Option<Span>;

    /// Get the previous token's span (for error reporting).
    fn previous_span(&self) -> Span;

    /// Advance to the next token and return the current one.
    fn advance(&mut self) -> Option<(Token, Span)>;

    /// Check if the current token ends a line (or the input).
    fn at_line_end(&self) -> bool;

    /// Skip newlines, counting lines as they pass.
    fn skip_newlines(&mut self);

    /// Create an error for an operand missing after the previous token.
    fn missing_operand(&self, what: &str, command: &str) -> TranslateError;
}

impl<'a> ParserHelpers<'a> for Parser<'a> {
    fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position).map(|(t, _)| t)
    }

    fn peek_span(&self) -> Option<Span> {
        self.tokens.get(self.position).map(|(_, s)| *s)
    }

    fn previous_span(&self) -> Span {
        if self.position > 0 {
            self.tokens[self.position - 1].1
        } else if !self.tokens.is_empty() {
            self.tokens[0].1
        } else {
            Span::new(0, 0)
        }
    }

    fn advance(&mut self) -> Option<(Token, Span)> {
        let result = self.tokens.get(self.position).cloned()?;
        self.position += 1;
        if result.0 == Token::Newline {
            self.line += 1;
        }
        Some(result)
    }

    fn at_line_end(&self) -> bool {
        matches!(self.peek(), None | Some(Token::Newline))
    }

    fn skip_newlines(&mut self) {
        while self.peek() == Some(&Token::Newline) {
            self.advance();
        }
    }

    fn missing_operand(&self, what: &str, command: &str) -> TranslateError {
        let previous = self.previous_span();
        TranslateError::new(
            ErrorCode::MissingOperand,
            format!("Expected {} after '{}'", what, command),
            Span::new(previous.end, previous.end),
        )
    }
}
