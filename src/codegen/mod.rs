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

//! Code generation module for the VM translator.
//!
//! This module turns parsed VM commands into Hack assembly instructions.
//! It handles:
//! - Segment addressing
//! - Stack arithmetic and comparisons
//! - Labels and branching
//! - The function calling convention
//! - Program bootstrap
//!
//! One [`CodeGenerator`] lives for a whole build. It owns the label counters,
//! so generated labels stay unique across every file of a program.

pub mod binary_ops;
pub mod bootstrap;
pub mod comparisons;
pub mod constants;
pub mod control_flow;
pub mod emit;
pub mod functions;
pub mod hack;
pub mod labels;
pub mod segments;
pub mod stack;
pub mod unary_ops;

pub use hack::{Address, Comp, Dest, Instruction, Jump};
pub use labels::LabelAllocator;

use crate::ast::{ArithmeticOp, Command, Spanned};
use crate::error::Result;
use binary_ops::BinaryOpsEmitter;
use bootstrap::BootstrapEmitter;
use comparisons::ComparisonEmitter;
use control_flow::ControlFlowEmitter;
use emit::EmitHelpers;
use functions::FunctionEmitter;
use segments::SegmentAccess;
use unary_ops::UnaryOpsEmitter;

/// The code generator for the Hack platform.
pub struct CodeGenerator {
    /// Instructions of the command currently being translated.
    code: Vec<Instruction>,
    /// Build-global label counters.
    labels: LabelAllocator,
    /// Base name of the file being translated, qualifying `static` symbols.
    current_file: String,
    /// Whether to precede each command's code with a source comment.
    emit_comments: bool,
    /// Whether the bootstrap has been emitted or any command translated.
    started: bool,
    /// Number of commands translated so far.
    commands_translated: usize,
}

impl CodeGenerator {
    /// Create a new code generator.
    pub fn new() -> Self {
        Self {
            code: Vec::new(),
            labels: LabelAllocator::new(),
            current_file: String::new(),
            emit_comments: true,
            started: false,
            commands_translated: 0,
        }
    }

    /// Enable or disable per-command source comments.
    pub fn with_comments(mut self, enabled: bool) -> Self {
        self.emit_comments = enabled;
        self
    }

    /// Set the file whose commands are translated next.
    ///
    /// Accepts a bare name (`Main`), a file name (`Main.vm`) or a path; only
    /// the base name without extension is kept.
    pub fn set_file_name(&mut self, name: &str) {
        let base = name.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(name);
        let base = base.strip_suffix(".vm").unwrap_or(base);
        log::debug!("Switching static scope to '{}'", base);
        self.current_file = base.to_string();
    }

    /// The current file context.
    pub fn file_name(&self) -> &str {
        &self.current_file
    }

    /// The label counters of this build.
    pub fn labels(&self) -> &LabelAllocator {
        &self.labels
    }

    /// Number of commands translated so far.
    pub fn commands_translated(&self) -> usize {
        self.commands_translated
    }

    /// Translate a single command.
    ///
    /// On error nothing of the command is returned. Labels allocated before
    /// the failure stay consumed.
    pub fn translate_command(
        &mut self,
        command: &Spanned<Command>,
    ) -> Result<Vec<Instruction>> {
        log::trace!("line {}: {}", command.line, command.node);
        self.code.clear();
        self.started = true;
        self.emit_comment(command.node.to_string());

        let result = match &command.node {
            Command::Push(segment, index) => self.emit_push(*segment, *index, command),
            Command::Pop(segment, index) => self.emit_pop(*segment, *index, command),
            Command::Arithmetic(op) => {
                self.emit_arithmetic(*op);
                Ok(())
            }
            Command::Label(name) => {
                self.emit_label(name);
                Ok(())
            }
            Command::Goto(name) => {
                self.emit_unconditional_goto(name);
                Ok(())
            }
            Command::IfGoto(name) => {
                self.emit_if_goto(name);
                Ok(())
            }
            Command::Function { name, n_locals } => {
                self.emit_function(name, *n_locals);
                Ok(())
            }
            Command::Call { name, n_args } => self.emit_call(name, *n_args, command),
            Command::Return => {
                self.emit_return();
                Ok(())
            }
        };

        match result {
            Ok(()) => {
                self.commands_translated += 1;
                Ok(self.take_code())
            }
            Err(error) => {
                self.code.clear();
                Err(error)
            }
        }
    }

    /// Translate a sequence of commands in order.
    ///
    /// Stops at the first error; the output of earlier commands is discarded
    /// with it.
    pub fn translate_all(
        &mut self,
        commands: &[Spanned<Command>],
    ) -> Result<Vec<Instruction>> {
        let mut output = Vec::new();
        for command in commands {
            output.extend(self.translate_command(command)?);
        }
        Ok(output)
    }

    /// Emit the program bootstrap calling `entry`.
    ///
    /// Must come before any command, and only once per build.
    pub fn bootstrap(&mut self, entry: &str) -> Result<Vec<Instruction>> {
        self.code.clear();
        self.emit_bootstrap(entry)?;
        self.started = true;
        Ok(self.take_code())
    }

    fn emit_arithmetic(&mut self, op: ArithmeticOp) {
        match op {
            ArithmeticOp::Add => self.emit_binary_op(Comp::DPlusM),
            ArithmeticOp::Sub => self.emit_binary_op(Comp::MMinusD),
            ArithmeticOp::And => self.emit_binary_op(Comp::DAndM),
            ArithmeticOp::Or => self.emit_binary_op(Comp::DOrM),
            ArithmeticOp::Neg => self.emit_unary_op(Comp::NegM),
            ArithmeticOp::Not => self.emit_unary_op(Comp::NotM),
            ArithmeticOp::Eq => self.emit_comparison(Jump::JEQ),
            ArithmeticOp::Gt => self.emit_comparison(Jump::JGT),
            ArithmeticOp::Lt => self.emit_comparison(Jump::JLT),
        }
    }

    /// Hand out the buffered instructions, leaving the buffer empty.
    pub(crate) fn take_code(&mut self) -> Vec<Instruction> {
        std::mem::take(&mut self.code)
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Translate the commands of one file with a fresh generator.
pub fn generate(
    commands: &[Spanned<Command>],
    file_name: &str,
) -> Result<Vec<Instruction>> {
    let mut generator = CodeGenerator::new();
    generator.set_file_name(file_name);
    generator.translate_all(commands)
}
