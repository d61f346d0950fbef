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

//! Control flow code generation.
//!
//! Label names are emitted exactly as written in the source. They share the
//! program-wide symbol table with function names and generated labels.

use super::emit::EmitHelpers;
use super::hack::{Comp, Jump};
use super::stack::StackPrimitives;
use super::CodeGenerator;

/// Extension trait for branching code generation.
pub trait ControlFlowEmitter {
    /// `label name`
    fn emit_label(&mut self, name: &str);

    /// `goto name`
    fn emit_unconditional_goto(&mut self, name: &str);

    /// `if-goto name`: pop the top of the stack and jump if it is non-zero.
    fn emit_if_goto(&mut self, name: &str);
}

impl ControlFlowEmitter for CodeGenerator {
    fn emit_label(&mut self, name: &str) {
        self.define_label(name);
    }

    fn emit_unconditional_goto(&mut self, name: &str) {
        self.emit_goto(name);
    }

    fn emit_if_goto(&mut self, name: &str) {
        self.emit_pop_to_d();
        self.emit_at_symbol(name);
        self.emit_jump(Comp::D, Jump::JNE);
    }
}
