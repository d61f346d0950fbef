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

//! Emit helper methods for code generation.
//!
//! This module provides low-level emission utilities. Every emitter appends
//! to the generator's buffer through these helpers so that a command's
//! output is collected in one place and handed out only once the command
//! has been translated completely.

use super::hack::{Comp, Dest, Instruction, Jump};
use super::CodeGenerator;

/// Extension trait for low-level instruction emission.
pub trait EmitHelpers {
    /// Append an instruction to the buffer.
    fn emit(&mut self, instruction: Instruction);

    /// Append a comment, unless comments are disabled.
    fn emit_comment(&mut self, text: impl Into<String>);

    /// Emit `@value`.
    fn emit_at(&mut self, value: u16);

    /// Emit `@symbol`.
    fn emit_at_symbol(&mut self, symbol: &str);

    /// Emit `dest=comp`.
    fn emit_assign(&mut self, dest: Dest, comp: Comp);

    /// Emit `comp;jump`.
    fn emit_jump(&mut self, comp: Comp, jump: Jump);

    /// Emit `@symbol` followed by `0;JMP`.
    fn emit_goto(&mut self, symbol: &str);

    /// Declare a jump target at the current position.
    fn define_label(&mut self, name: &str);
}

impl EmitHelpers for CodeGenerator {
    fn emit(&mut self, instruction: Instruction) {
        self.code.push(instruction);
    }

    fn emit_comment(&mut self, text: impl Into<String>) {
        if self.emit_comments {
            self.code.push(Instruction::Comment(text.into()));
        }
    }

    fn emit_at(&mut self, value: u16) {
        self.emit(Instruction::at(value));
    }

    fn emit_at_symbol(&mut self, symbol: &str) {
        self.emit(Instruction::at_symbol(symbol));
    }

    fn emit_assign(&mut self, dest: Dest, comp: Comp) {
        self.emit(Instruction::assign(dest, comp));
    }

    fn emit_jump(&mut self, comp: Comp, jump: Jump) {
        self.emit(Instruction::jump(comp, jump));
    }

    fn emit_goto(&mut self, symbol: &str) {
        self.emit_at_symbol(symbol);
        self.emit_jump(Comp::Zero, Jump::JMP);
    }

    fn define_label(&mut self, name: &str) {
        self.emit(Instruction::Label(name.to_string()));
    }
}
