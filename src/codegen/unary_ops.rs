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

//! Unary operation code generation.
//!
//! `neg` and `not` rewrite the top of the stack in place.

use super::emit::EmitHelpers;
use super::hack::{Comp, Dest};
use super::stack::StackPrimitives;
use super::CodeGenerator;

/// Extension trait for unary operation code generation.
pub trait UnaryOpsEmitter {
    /// Replace the top of the stack with `comp` applied to it (as M).
    fn emit_unary_op(&mut self, comp: Comp);
}

impl UnaryOpsEmitter for CodeGenerator {
    fn emit_unary_op(&mut self, comp: Comp) {
        self.emit_decrement_sp();
        self.emit_dereference_sp();
        self.emit_assign(Dest::M, comp);
        self.emit_increment_sp();
    }
}
