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

//! Memory segments addressable by `push` and `pop`.

/// A named VM address space.
///
/// Segments are a compile-time tag only; each has its own resolution rule in
/// the code generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Literal values, never backed by memory.
    Constant,
    /// The current function's locals, based at `LCL`.
    Local,
    /// The current function's arguments, based at `ARG`.
    Argument,
    /// Heap window based at `THIS`.
    This,
    /// Heap window based at `THAT`.
    That,
    /// Fixed scratch window starting at RAM[5].
    Temp,
    /// The `THIS`/`THAT` registers themselves.
    Pointer,
    /// File-scoped persistent cells.
    Static,
    /// Cells relative to the stack pointer.
    Sp,
}

impl Segment {
    /// All segments, in declaration order.
    pub const ALL: [Segment; 9] = [
        Segment::Constant,
        Segment::Local,
        Segment::Argument,
        Segment::This,
        Segment::That,
        Segment::Temp,
        Segment::Pointer,
        Segment::Static,
        Segment::Sp,
    ];

    /// Look up a segment by its VM keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.keyword() == keyword)
    }

    /// The keyword used for this segment in VM source.
    pub fn keyword(&self) -> &'static str {
        match self {
            Segment::Constant => "constant",
            Segment::Local => "local",
            Segment::Argument => "argument",
            Segment::This => "this",
            Segment::That => "that",
            Segment::Temp => "temp",
            Segment::Pointer => "pointer",
            Segment::Static => "static",
            Segment::Sp => "sp",
        }
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}
