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

//! Stack primitives.
//!
//! Micro-operations over the single global stack pointer that every other
//! emitter is built from. `SP` always holds the address of the first free
//! cell above the top of the stack.

use super::emit::EmitHelpers;
use super::hack::{registers, Comp, Dest};
use super::CodeGenerator;

/// Trait for stack pointer manipulation.
pub trait StackPrimitives {
    /// `SP--`
    fn emit_decrement_sp(&mut self);

    /// `SP++`
    fn emit_increment_sp(&mut self);

    /// Point A at the cell `SP` refers to.
    fn emit_dereference_sp(&mut self);

    /// Pop the top of the stack into D.
    fn emit_pop_to_d(&mut self);

    /// Push the value in D.
    fn emit_push_d(&mut self);

    /// Set up a binary operation.
    ///
    /// Pops the top operand (y) into D, then points A at the new top (x)
    /// without popping it, so the result can be written in place with `M=`.
    /// SP is left pointing at x; the caller increments it once the result
    /// is stored.
    fn emit_load_top_two(&mut self);
}

impl StackPrimitives for CodeGenerator {
    fn emit_decrement_sp(&mut self) {
        self.emit_at_symbol(registers::SP);
        self.emit_assign(Dest::M, Comp::MMinusOne);
    }

    fn emit_increment_sp(&mut self) {
        self.emit_at_symbol(registers::SP);
        self.emit_assign(Dest::M, Comp::MPlusOne);
    }

    fn emit_dereference_sp(&mut self) {
        self.emit_at_symbol(registers::SP);
        self.emit_assign(Dest::A, Comp::M);
    }

    fn emit_pop_to_d(&mut self) {
        self.emit_decrement_sp();
        self.emit_dereference_sp();
        self.emit_assign(Dest::D, Comp::M);
    }

    fn emit_push_d(&mut self) {
        self.emit_dereference_sp();
        self.emit_assign(Dest::M, Comp::D);
        self.emit_increment_sp();
    }

    fn emit_load_top_two(&mut self) {
        self.emit_pop_to_d();
        self.emit_decrement_sp();
        self.emit_dereference_sp();
    }
}
