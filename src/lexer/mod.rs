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

//! Lexer module for the VM translator.
//!
//! This module tokenizes VM source into a stream of tokens. It handles:
//! - Words (keywords, segment names, labels, function names)
//! - Unsigned decimal literals
//! - Line ends, which delimit commands
//! - `//` comments and blank space, which are skipped

mod tokens;

pub use tokens::Token;

use crate::error::{ErrorCode, Result, Span, TranslateError};
use logos::Logos;

/// Tokenize VM source code.
///
/// Returns the tokens together with their byte spans, or the first lexical
/// error encountered.
pub fn tokenize(source: &str) -> Result<Vec<(Token, Span)>> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(result) = lexer.next() {
        let span = Span::from(lexer.span());
        match result {
            Ok(token) => tokens.push((token, span)),
            Err(()) => return Err(lexical_error(lexer.slice(), span)),
        }
    }

    Ok(tokens)
}

/// Classify a slice the lexer could not turn into a token.
fn lexical_error(slice: &str, span: Span) -> TranslateError {
    if !slice.is_empty() && slice.bytes().all(|b| b.is_ascii_digit()) {
        return TranslateError::new(
            ErrorCode::IntegerTooLarge,
            format!("Integer literal '{}' is too large", slice),
            span,
        );
    }

    let c = slice.chars().next().unwrap_or('?');
    TranslateError::new(
        ErrorCode::InvalidCharacter,
        format!("Invalid character '{}'", c.escape_default()),
        span,
    )
    .with_hint("comments start with '//'")
}
