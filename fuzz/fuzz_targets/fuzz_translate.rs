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

//! Fuzz target for code generation.
//!
//! Builds structurally valid commands with arbitrary operands and feeds
//! them straight to the code generator, bypassing the parser's checks.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_translate

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use vmtrans::ast::{ArithmeticOp, Command, Segment, Spanned};
use vmtrans::CodeGenerator;

#[derive(Debug, Arbitrary)]
enum FuzzCommand {
    Arithmetic(u8),
    Push(u8, u16),
    Pop(u8, u16),
    Label(String),
    Goto(String),
    IfGoto(String),
    Function(String, u16),
    Call(String, u16),
    Return,
    Bootstrap(String),
}

fn segment(selector: u8) -> Segment {
    Segment::ALL[selector as usize % Segment::ALL.len()]
}

fn lower(command: FuzzCommand) -> Option<Command> {
    Some(match command {
        FuzzCommand::Arithmetic(op) => {
            Command::Arithmetic(ArithmeticOp::ALL[op as usize % ArithmeticOp::ALL.len()])
        }
        FuzzCommand::Push(seg, index) => Command::Push(segment(seg), index),
        FuzzCommand::Pop(seg, index) => Command::Pop(segment(seg), index),
        FuzzCommand::Label(name) => Command::Label(name),
        FuzzCommand::Goto(name) => Command::Goto(name),
        FuzzCommand::IfGoto(name) => Command::IfGoto(name),
        FuzzCommand::Function(name, n_locals) => Command::Function { name, n_locals },
        FuzzCommand::Call(name, n_args) => Command::Call { name, n_args },
        FuzzCommand::Return => Command::Return,
        FuzzCommand::Bootstrap(_) => return None,
    })
}

fuzz_target!(|commands: Vec<FuzzCommand>| {
    let mut generator = CodeGenerator::new();
    generator.set_file_name("Fuzz");
    for command in commands {
        match command {
            FuzzCommand::Bootstrap(entry) => {
                let _ = generator.bootstrap(&entry);
            }
            other => {
                if let Some(command) = lower(other) {
                    let _ = generator.translate_command(&Spanned::synthetic(command));
                }
            }
        }
    }
});
