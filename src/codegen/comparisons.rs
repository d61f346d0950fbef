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

//! Comparison code generation.
//!
//! `eq`, `gt` and `lt` replace their two operands with a boolean: -1 (all
//! bits set) for true, 0 for false. The result is written optimistically as
//! true and overwritten with false when the jump to the done label is not
//! taken, so each comparison consumes exactly one label.
//!
//! The difference `x - y` is computed in 16 bits and may overflow for
//! operands of opposite sign; no correction is applied.

use super::emit::EmitHelpers;
use super::hack::{Comp, Dest, Jump};
use super::stack::StackPrimitives;
use super::CodeGenerator;

/// Trait for comparison code generation.
pub trait ComparisonEmitter {
    /// Generate a comparison that is true when `x - y` satisfies `jump`.
    fn emit_comparison(&mut self, jump: Jump);
}

impl ComparisonEmitter for CodeGenerator {
    fn emit_comparison(&mut self, jump: Jump) {
        let done = self.labels.next_comparison_label();

        self.emit_load_top_two();
        self.emit_assign(Dest::D, Comp::MMinusD);
        self.emit_dereference_sp();
        self.emit_assign(Dest::M, Comp::MinusOne);
        self.emit_at_symbol(&done);
        self.emit_jump(Comp::D, jump);
        self.emit_dereference_sp();
        self.emit_assign(Dest::M, Comp::Zero);
        self.define_label(&done);
        self.emit_increment_sp();
    }
}
