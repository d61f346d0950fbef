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

//! Function code generation.
//!
//! This module implements the calling convention. A call leaves the
//! following frame on the stack, below the callee's locals:
//!
//! ```text
//! ARG  -> argument 0
//!         ...
//!         argument n-1
//!         return address
//!         saved LCL
//!         saved ARG
//!         saved THIS
//!         saved THAT
//! LCL  -> local 0
//! ```
//!
//! `return` walks the frame back from `LCL`, keeping the frame pointer in
//! `R13` and the return address in `R14`. Those two registers are the only
//! scratch cells the generated code uses.

use super::constants::{FRAME_SIZE, MAX_ADDRESS_LITERAL};
use super::emit::EmitHelpers;
use super::hack::{registers, Comp, Dest, Jump};
use super::stack::StackPrimitives;
use super::CodeGenerator;
use crate::ast::{Command, Spanned};
use crate::error::{ErrorCode, Result, TranslateError};

/// Registers saved by a call, in push order.
const SAVED_REGISTERS: [&str; 4] = [
    registers::LCL,
    registers::ARG,
    registers::THIS,
    registers::THAT,
];

/// Extension trait for function code generation.
pub trait FunctionEmitter {
    /// `function name nLocals`: entry label, then zero-initialized locals.
    fn emit_function(&mut self, name: &str, n_locals: u16);

    /// `call name nArgs`
    fn emit_call(
        &mut self,
        name: &str,
        n_args: u16,
        context: &Spanned<Command>,
    ) -> Result<()>;

    /// `return`
    fn emit_return(&mut self);

    /// Copy `*(--R13)` into `register`.
    fn emit_restore_register(&mut self, register: &str);
}

impl FunctionEmitter for CodeGenerator {
    fn emit_function(&mut self, name: &str, n_locals: u16) {
        self.define_label(name);
        for _ in 0..n_locals {
            self.emit_at(0);
            self.emit_assign(Dest::D, Comp::A);
            self.emit_push_d();
        }
    }

    fn emit_call(
        &mut self,
        name: &str,
        n_args: u16,
        context: &Spanned<Command>,
    ) -> Result<()> {
        let offset = n_args as u32 + FRAME_SIZE as u32;
        if offset > MAX_ADDRESS_LITERAL as u32 {
            return Err(TranslateError::new(
                ErrorCode::ConstantOutOfRange,
                format!(
                    "Too many arguments in '{}': at most {} are supported",
                    context.node,
                    MAX_ADDRESS_LITERAL - FRAME_SIZE
                ),
                context.span,
            ));
        }

        let return_label = self.labels.next_call_label();

        self.emit_at_symbol(&return_label);
        self.emit_assign(Dest::D, Comp::A);
        self.emit_push_d();

        for register in SAVED_REGISTERS {
            self.emit_at_symbol(register);
            self.emit_assign(Dest::D, Comp::M);
            self.emit_push_d();
        }

        // ARG = SP - nArgs - 5
        self.emit_at_symbol(registers::SP);
        self.emit_assign(Dest::D, Comp::M);
        self.emit_at(offset as u16);
        self.emit_assign(Dest::D, Comp::DMinusA);
        self.emit_at_symbol(registers::ARG);
        self.emit_assign(Dest::M, Comp::D);

        // LCL = SP
        self.emit_at_symbol(registers::SP);
        self.emit_assign(Dest::D, Comp::M);
        self.emit_at_symbol(registers::LCL);
        self.emit_assign(Dest::M, Comp::D);

        self.emit_goto(name);
        self.define_label(&return_label);
        Ok(())
    }

    fn emit_return(&mut self) {
        // R13 = LCL
        self.emit_at_symbol(registers::LCL);
        self.emit_assign(Dest::D, Comp::M);
        self.emit_at_symbol(registers::FRAME);
        self.emit_assign(Dest::M, Comp::D);

        // R14 = *(frame - 5)
        self.emit_at(FRAME_SIZE);
        self.emit_assign(Dest::A, Comp::DMinusA);
        self.emit_assign(Dest::D, Comp::M);
        self.emit_at_symbol(registers::RETURN_ADDRESS);
        self.emit_assign(Dest::M, Comp::D);

        // *ARG = pop()
        self.emit_pop_to_d();
        self.emit_at_symbol(registers::ARG);
        self.emit_assign(Dest::A, Comp::M);
        self.emit_assign(Dest::M, Comp::D);

        // SP = ARG + 1
        self.emit_at_symbol(registers::ARG);
        self.emit_assign(Dest::D, Comp::MPlusOne);
        self.emit_at_symbol(registers::SP);
        self.emit_assign(Dest::M, Comp::D);

        for register in SAVED_REGISTERS.iter().rev() {
            self.emit_restore_register(register);
        }

        self.emit_at_symbol(registers::RETURN_ADDRESS);
        self.emit_assign(Dest::A, Comp::M);
        self.emit_jump(Comp::Zero, Jump::JMP);
    }

    fn emit_restore_register(&mut self, register: &str) {
        self.emit_at_symbol(registers::FRAME);
        self.emit_assign(Dest::AM, Comp::MMinusOne);
        self.emit_assign(Dest::D, Comp::M);
        self.emit_at_symbol(register);
        self.emit_assign(Dest::M, Comp::D);
    }
}
