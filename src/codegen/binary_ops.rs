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

//! Binary operation code generation.
//!
//! This module provides code generation for the two-operand operations:
//! - Addition and subtraction
//! - Bitwise AND and OR
//!
//! Both operands are popped and the result is written in place of the lower
//! one, so the stack shrinks by exactly one cell.

use super::emit::EmitHelpers;
use super::hack::{Comp, Dest};
use super::stack::StackPrimitives;
use super::CodeGenerator;

/// Extension trait for binary operation code generation.
pub trait BinaryOpsEmitter {
    /// Generate a binary operation whose result is `comp`.
    ///
    /// `comp` sees the top operand (y) in D and the one below it (x) in M.
    fn emit_binary_op(&mut self, comp: Comp);
}

impl BinaryOpsEmitter for CodeGenerator {
    fn emit_binary_op(&mut self, comp: Comp) {
        self.emit_load_top_two();
        self.emit_assign(Dest::M, comp);
        self.emit_increment_sp();
    }
}
