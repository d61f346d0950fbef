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

//! Parser module for the VM translator.
//!
//! This module turns a token stream into a sequence of [`Command`]s, one per
//! non-blank source line, each tagged with its source position.
//!
//! # Module Structure
//!
//! - `commands` - Command line parsing (CommandParser trait)
//! - `helpers` - Token stream navigation and error handling (ParserHelpers trait)

pub mod commands;
pub mod helpers;

use commands::CommandParser;
use helpers::ParserHelpers;

use crate::ast::{Command, Spanned};
use crate::error::{Result, Span};
use crate::lexer::{tokenize, Token};

/// The parser state.
pub struct Parser<'a> {
    /// The token stream to parse.
    pub(crate) tokens: &'a [(Token, Span)],
    /// Current position in the token stream.
    pub(crate) position: usize,
    /// Current line number (1-indexed).
    pub(crate) line: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given token stream.
    pub fn new(tokens: &'a [(Token, Span)]) -> Self {
        Self {
            tokens,
            position: 0,
            line: 1,
        }
    }

    /// Parse all commands in the token stream.
    pub fn parse(&mut self) -> Result<Vec<Spanned<Command>>> {
        let mut commands = Vec::new();

        self.skip_newlines();

        while !self.is_at_end() {
            commands.push(self.parse_command()?);
            self.skip_newlines();
        }

        Ok(commands)
    }
}

/// Parse a token stream into commands.
pub fn parse(tokens: &[(Token, Span)]) -> Result<Vec<Spanned<Command>>> {
    let mut parser = Parser::new(tokens);
    parser.parse()
}

/// Tokenize and parse VM source code.
pub fn parse_source(source: &str) -> Result<Vec<Spanned<Command>>> {
    let tokens = tokenize(source)?;
    parse(&tokens)
}
