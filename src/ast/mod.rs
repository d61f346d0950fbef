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

//! Command model for VM programs.
//!
//! This module defines the data structures that represent a parsed VM file:
//! one [`Command`] per source line, each wrapped in a [`Spanned`] carrying its
//! source position.

mod command;
mod segment;

pub use command::*;
pub use segment::*;

use crate::error::Span;

/// A value paired with the source position it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned<T> {
    /// The wrapped value.
    pub node: T,
    /// Byte range in the source file.
    pub span: Span,
    /// Line number (1-indexed).
    pub line: usize,
}

impl<T> Spanned<T> {
    /// Wrap a value with its source position.
    pub fn new(node: T, span: Span, line: usize) -> Self {
        Self { node, span, line }
    }

    /// Wrap a value without a meaningful source position.
    ///
    /// Used for commands synthesized by the translator itself, such as the
    /// bootstrap call.
    pub fn synthetic(node: T) -> Self {
        Self {
            node,
            span: Span::default(),
            line: 0,
        }
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Spanned<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.node.fmt(f)
    }
}
