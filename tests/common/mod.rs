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

//! A small Hack CPU emulator for executing generated code in tests.
//!
//! Programs are loaded from instruction records. Labels and symbols are
//! resolved the way the Hack assembler does it: labels name the address of
//! the next executable instruction, predefined symbols map to their fixed
//! addresses, and any other symbol becomes a variable allocated from
//! RAM[16] upwards in order of first use.

#![allow(dead_code)]

use std::collections::HashMap;

use vmtrans::codegen::{Address, Comp, Dest, Instruction, Jump};

/// Size of the data memory.
const RAM_SIZE: usize = 32768;

/// First address handed to variables.
const FIRST_VARIABLE: u16 = 16;

/// An executable instruction with its symbols resolved.
#[derive(Debug, Clone, Copy)]
enum Op {
    Load(u16),
    Compute {
        dest: Option<Dest>,
        comp: Comp,
        jump: Option<Jump>,
    },
}

/// Hack CPU state plus a loaded program.
pub struct Machine {
    pub ram: Vec<i16>,
    pub a: i16,
    pub d: i16,
    pub pc: usize,
    program: Vec<Op>,
    labels: HashMap<String, usize>,
    symbols: HashMap<String, u16>,
}

fn predefined_symbols() -> HashMap<String, u16> {
    let mut symbols = HashMap::new();
    for (name, address) in [
        ("SP", 0),
        ("LCL", 1),
        ("ARG", 2),
        ("THIS", 3),
        ("THAT", 4),
        ("SCREEN", 16384),
        ("KBD", 24576),
    ] {
        symbols.insert(name.to_string(), address);
    }
    for i in 0..16 {
        symbols.insert(format!("R{}", i), i);
    }
    symbols
}

impl Machine {
    /// Assemble and load a program.
    pub fn load(code: &[Instruction]) -> Self {
        let mut labels = HashMap::new();
        let mut pc = 0;
        for instruction in code {
            match instruction {
                Instruction::Label(name) => {
                    assert!(
                        labels.insert(name.clone(), pc).is_none(),
                        "duplicate label {}",
                        name
                    );
                }
                Instruction::Address(_) | Instruction::Compute { .. } => pc += 1,
                Instruction::Comment(_) => {}
            }
        }

        let mut symbols = predefined_symbols();
        let mut next_variable = FIRST_VARIABLE;
        let mut program = Vec::new();
        for instruction in code {
            match instruction {
                Instruction::Address(Address::Constant(value)) => program.push(Op::Load(*value)),
                Instruction::Address(Address::Symbol(name)) => {
                    let value = if let Some(&target) = labels.get(name) {
                        target as u16
                    } else if let Some(&address) = symbols.get(name) {
                        address
                    } else {
                        let address = next_variable;
                        symbols.insert(name.clone(), address);
                        next_variable += 1;
                        address
                    };
                    program.push(Op::Load(value));
                }
                Instruction::Compute { dest, comp, jump } => program.push(Op::Compute {
                    dest: *dest,
                    comp: *comp,
                    jump: *jump,
                }),
                Instruction::Label(_) | Instruction::Comment(_) => {}
            }
        }

        Self {
            ram: vec![0; RAM_SIZE],
            a: 0,
            d: 0,
            pc: 0,
            program,
            labels,
            symbols,
        }
    }

    /// Number of executable instructions.
    pub fn len(&self) -> usize {
        self.program.len()
    }

    /// Address a symbol was resolved to, if the program used it.
    pub fn symbol(&self, name: &str) -> Option<u16> {
        self.symbols.get(name).copied()
    }

    /// Address of a label.
    pub fn label(&self, name: &str) -> Option<usize> {
        self.labels.get(name).copied()
    }

    /// Read the cell a symbol refers to.
    pub fn read(&self, name: &str) -> i16 {
        let address = self
            .symbol(name)
            .unwrap_or_else(|| panic!("unknown symbol {}", name));
        self.ram[address as usize]
    }

    /// Write the cell a symbol refers to.
    pub fn write(&mut self, name: &str, value: i16) {
        let address = self
            .symbol(name)
            .unwrap_or_else(|| panic!("unknown symbol {}", name));
        self.ram[address as usize] = value;
    }

    /// Current stack pointer.
    pub fn sp(&self) -> i16 {
        self.ram[0]
    }

    /// Value on top of the stack.
    pub fn top(&self) -> i16 {
        self.ram[(self.sp() - 1) as usize]
    }

    /// The stack contents from `base` up to SP.
    pub fn stack(&self, base: usize) -> Vec<i16> {
        self.ram[base..self.sp() as usize].to_vec()
    }

    /// Initialize SP and the segment pointers the way a test harness would.
    pub fn init_segments(&mut self, sp: i16, lcl: i16, arg: i16, this: i16, that: i16) {
        self.ram[0] = sp;
        self.ram[1] = lcl;
        self.ram[2] = arg;
        self.ram[3] = this;
        self.ram[4] = that;
    }

    /// Execute one instruction.
    pub fn step(&mut self) {
        match self.program[self.pc] {
            Op::Load(value) => {
                self.a = value as i16;
                self.pc += 1;
            }
            Op::Compute { dest, comp, jump } => {
                let address = self.a as u16 as usize;
                let value = self.compute(comp, address);

                if let Some(dest) = dest {
                    if dest.writes_m() {
                        self.ram[address] = value;
                    }
                    if dest.writes_d() {
                        self.d = value;
                    }
                    if dest.writes_a() {
                        self.a = value;
                    }
                }

                match jump {
                    Some(jump) if jump.is_taken(value) => self.pc = address,
                    _ => self.pc += 1,
                }
            }
        }
    }

    fn compute(&self, comp: Comp, address: usize) -> i16 {
        let a = self.a;
        let d = self.d;
        let m = if comp.reads_m() { self.ram[address] } else { 0 };
        match comp {
            Comp::Zero => 0,
            Comp::One => 1,
            Comp::MinusOne => -1,
            Comp::D => d,
            Comp::A => a,
            Comp::M => m,
            Comp::NotD => !d,
            Comp::NotA => !a,
            Comp::NotM => !m,
            Comp::NegD => d.wrapping_neg(),
            Comp::NegA => a.wrapping_neg(),
            Comp::NegM => m.wrapping_neg(),
            Comp::DPlusOne => d.wrapping_add(1),
            Comp::APlusOne => a.wrapping_add(1),
            Comp::MPlusOne => m.wrapping_add(1),
            Comp::DMinusOne => d.wrapping_sub(1),
            Comp::AMinusOne => a.wrapping_sub(1),
            Comp::MMinusOne => m.wrapping_sub(1),
            Comp::DPlusA => d.wrapping_add(a),
            Comp::DPlusM => d.wrapping_add(m),
            Comp::DMinusA => d.wrapping_sub(a),
            Comp::DMinusM => d.wrapping_sub(m),
            Comp::AMinusD => a.wrapping_sub(d),
            Comp::MMinusD => m.wrapping_sub(d),
            Comp::DAndA => d & a,
            Comp::DAndM => d & m,
            Comp::DOrA => d | a,
            Comp::DOrM => d | m,
        }
    }

    /// Run until the program counter leaves the program.
    ///
    /// Panics if that takes more than `max_steps` instructions.
    pub fn run(&mut self, max_steps: usize) -> usize {
        let mut steps = 0;
        while self.pc < self.program.len() {
            assert!(steps < max_steps, "program did not finish in {} steps", max_steps);
            self.step();
            steps += 1;
        }
        steps
    }

    /// Run until execution reaches `label`.
    ///
    /// Panics if that takes more than `max_steps` instructions.
    pub fn run_until(&mut self, label: &str, max_steps: usize) -> usize {
        let target = self
            .label(label)
            .unwrap_or_else(|| panic!("unknown label {}", label));
        let mut steps = 0;
        while self.pc != target {
            assert!(
                self.pc < self.program.len(),
                "program ended before reaching {}",
                label
            );
            assert!(steps < max_steps, "{} not reached in {} steps", label, max_steps);
            self.step();
            steps += 1;
        }
        steps
    }
}

/// Translate one VM file without comments.
pub fn translate(source: &str, file_name: &str) -> Vec<Instruction> {
    let commands = vmtrans::parser::parse_source(source).expect("parse failed");
    let mut generator = vmtrans::CodeGenerator::new().with_comments(false);
    generator.set_file_name(file_name);
    generator
        .translate_all(&commands)
        .expect("translation failed")
}

/// Translate a file and run it with SP at 256 and the segment pointers at
/// conventional test positions.
pub fn run_source(source: &str) -> Machine {
    let code = translate(source, "Test");
    let mut machine = Machine::load(&code);
    machine.init_segments(256, 300, 400, 3000, 3010);
    machine.run(100_000);
    machine
}

/// Render instructions to text lines.
pub fn lines(code: &[Instruction]) -> Vec<String> {
    code.iter().map(|i| i.to_string()).collect()
}
