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

//! Token definitions for VM source.

use logos::Logos;

/// A token in VM source.
///
/// Keywords are not distinguished from identifiers here: a command's first
/// word decides how the rest of its line is read, so the parser does the
/// classification.
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t\r\f]+")]
#[logos(skip r"//[^\n]*")]
pub enum Token {
    /// End of a source line.
    #[token("\n")]
    Newline,

    /// Unsigned decimal literal.
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<u32>().ok())]
    Integer(u32),

    /// Keyword, segment name, label or function name.
    #[regex(r"[A-Za-z_.$:][A-Za-z0-9_.$:\-]*", |lex| lex.slice().to_string())]
    Word(String),
}

impl Token {
    /// Get a human-readable name for this token kind.
    pub fn name(&self) -> &'static str {
        match self {
            Token::Newline => "newline",
            Token::Integer(_) => "integer",
            Token::Word(_) => "word",
        }
    }

    /// Get the word text, if this token is a word.
    pub fn as_word(&self) -> Option<&str> {
        match self {
            Token::Word(word) => Some(word),
            _ => None,
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Newline => f.write_str("newline"),
            Token::Integer(value) => write!(f, "{}", value),
            Token::Word(word) => write!(f, "'{}'", word),
        }
    }
}
