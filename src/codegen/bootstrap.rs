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

//! Program bootstrap.
//!
//! The bootstrap initializes the stack pointer and calls the entry function.
//! It runs once, before the code of the first file.

use super::constants::STACK_BASE;
use super::emit::EmitHelpers;
use super::functions::FunctionEmitter;
use super::hack::{registers, Comp, Dest};
use super::CodeGenerator;
use crate::ast::{Command, Spanned};
use crate::error::{ErrorCode, Result, TranslateError};
use crate::parser::commands::is_valid_symbol;

/// Trait for bootstrap code generation.
pub trait BootstrapEmitter {
    /// Emit `SP = 256` followed by `call entry 0`.
    fn emit_bootstrap(&mut self, entry: &str) -> Result<()>;
}

impl BootstrapEmitter for CodeGenerator {
    fn emit_bootstrap(&mut self, entry: &str) -> Result<()> {
        if self.started {
            return Err(TranslateError::new(
                ErrorCode::MisplacedBootstrap,
                "The bootstrap must be emitted once, before any command",
                Default::default(),
            ));
        }
        if !is_valid_symbol(entry) {
            return Err(TranslateError::new(
                ErrorCode::InvalidEntryName,
                format!("Invalid entry function name '{}'", entry),
                Default::default(),
            )
            .with_hint("pass a function name such as 'Sys.init' to --entry"));
        }
        log::debug!("Emitting bootstrap calling '{}'", entry);

        let call = Spanned::synthetic(Command::Call {
            name: entry.to_string(),
            n_args: 0,
        });

        self.emit_comment("bootstrap");
        self.emit_at(STACK_BASE);
        self.emit_assign(Dest::D, Comp::A);
        self.emit_at_symbol(registers::SP);
        self.emit_assign(Dest::M, Comp::D);
        self.emit_comment(call.node.to_string());
        self.emit_call(entry, 0, &call)
    }
}
