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

//! Hack assembly instruction records.
//!
//! The code generator emits [`Instruction`] values rather than raw text.
//! Each instruction renders to exactly one line of assembly through its
//! `Display` implementation.

/// Predefined register symbols.
pub mod registers {
    /// Stack pointer.
    pub const SP: &str = "SP";
    /// Base of the current function's locals.
    pub const LCL: &str = "LCL";
    /// Base of the current function's arguments.
    pub const ARG: &str = "ARG";
    /// Base of the `this` segment.
    pub const THIS: &str = "THIS";
    /// Base of the `that` segment.
    pub const THAT: &str = "THAT";
    /// Scratch register holding the frame pointer during `return`.
    pub const FRAME: &str = "R13";
    /// Scratch register holding the return address during `return`.
    pub const RETURN_ADDRESS: &str = "R14";
}

/// The target of an A-instruction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Address {
    /// A literal value (at most 15 bits).
    Constant(u16),
    /// A symbol resolved by the assembler.
    Symbol(String),
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Address::Constant(value) => write!(f, "{}", value),
            Address::Symbol(name) => f.write_str(name),
        }
    }
}

/// Destination registers of a C-instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dest {
    M,
    D,
    MD,
    A,
    AM,
    AD,
    AMD,
}

impl Dest {
    /// Check if this destination writes the A register.
    pub fn writes_a(&self) -> bool {
        matches!(self, Dest::A | Dest::AM | Dest::AD | Dest::AMD)
    }

    /// Check if this destination writes the D register.
    pub fn writes_d(&self) -> bool {
        matches!(self, Dest::D | Dest::MD | Dest::AD | Dest::AMD)
    }

    /// Check if this destination writes memory at A.
    pub fn writes_m(&self) -> bool {
        matches!(self, Dest::M | Dest::MD | Dest::AM | Dest::AMD)
    }

    /// The mnemonic for this destination.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Dest::M => "M",
            Dest::D => "D",
            Dest::MD => "MD",
            Dest::A => "A",
            Dest::AM => "AM",
            Dest::AD => "AD",
            Dest::AMD => "AMD",
        }
    }
}

/// The computation of a C-instruction.
///
/// This is the full set the Hack ALU supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comp {
    Zero,
    One,
    MinusOne,
    D,
    A,
    M,
    NotD,
    NotA,
    NotM,
    NegD,
    NegA,
    NegM,
    DPlusOne,
    APlusOne,
    MPlusOne,
    DMinusOne,
    AMinusOne,
    MMinusOne,
    DPlusA,
    DPlusM,
    DMinusA,
    DMinusM,
    AMinusD,
    MMinusD,
    DAndA,
    DAndM,
    DOrA,
    DOrM,
}

impl Comp {
    /// Check if this computation reads memory at A.
    pub fn reads_m(&self) -> bool {
        matches!(
            self,
            Comp::M
                | Comp::NotM
                | Comp::NegM
                | Comp::MPlusOne
                | Comp::MMinusOne
                | Comp::DPlusM
                | Comp::DMinusM
                | Comp::MMinusD
                | Comp::DAndM
                | Comp::DOrM
        )
    }

    /// The mnemonic for this computation.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Comp::Zero => "0",
            Comp::One => "1",
            Comp::MinusOne => "-1",
            Comp::D => "D",
            Comp::A => "A",
            Comp::M => "M",
            Comp::NotD => "!D",
            Comp::NotA => "!A",
            Comp::NotM => "!M",
            Comp::NegD => "-D",
            Comp::NegA => "-A",
            Comp::NegM => "-M",
            Comp::DPlusOne => "D+1",
            Comp::APlusOne => "A+1",
            Comp::MPlusOne => "M+1",
            Comp::DMinusOne => "D-1",
            Comp::AMinusOne => "A-1",
            Comp::MMinusOne => "M-1",
            Comp::DPlusA => "D+A",
            Comp::DPlusM => "D+M",
            Comp::DMinusA => "D-A",
            Comp::DMinusM => "D-M",
            Comp::AMinusD => "A-D",
            Comp::MMinusD => "M-D",
            Comp::DAndA => "D&A",
            Comp::DAndM => "D&M",
            Comp::DOrA => "D|A",
            Comp::DOrM => "D|M",
        }
    }
}

/// The jump condition of a C-instruction, tested against the computed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Jump {
    JGT,
    JEQ,
    JGE,
    JLT,
    JNE,
    JLE,
    JMP,
}

impl Jump {
    /// Check if a computed value satisfies this condition.
    pub fn is_taken(&self, value: i16) -> bool {
        match self {
            Jump::JGT => value > 0,
            Jump::JEQ => value == 0,
            Jump::JGE => value >= 0,
            Jump::JLT => value < 0,
            Jump::JNE => value != 0,
            Jump::JLE => value <= 0,
            Jump::JMP => true,
        }
    }

    /// The mnemonic for this condition.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Jump::JGT => "JGT",
            Jump::JEQ => "JEQ",
            Jump::JGE => "JGE",
            Jump::JLT => "JLT",
            Jump::JNE => "JNE",
            Jump::JLE => "JLE",
            Jump::JMP => "JMP",
        }
    }
}

/// One line of Hack assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// `// text`
    Comment(String),
    /// `@value` or `@symbol`
    Address(Address),
    /// `dest=comp;jump`
    Compute {
        dest: Option<Dest>,
        comp: Comp,
        jump: Option<Jump>,
    },
    /// `(NAME)` pseudo-instruction declaring a jump target.
    Label(String),
}

impl Instruction {
    /// `@value`
    pub fn at(value: u16) -> Self {
        Instruction::Address(Address::Constant(value))
    }

    /// `@symbol`
    pub fn at_symbol(symbol: impl Into<String>) -> Self {
        Instruction::Address(Address::Symbol(symbol.into()))
    }

    /// `dest=comp`
    pub fn assign(dest: Dest, comp: Comp) -> Self {
        Instruction::Compute {
            dest: Some(dest),
            comp,
            jump: None,
        }
    }

    /// `comp;jump`
    pub fn jump(comp: Comp, jump: Jump) -> Self {
        Instruction::Compute {
            dest: None,
            comp,
            jump: Some(jump),
        }
    }

    /// Check if this line is a comment.
    pub fn is_comment(&self) -> bool {
        matches!(self, Instruction::Comment(_))
    }

    /// Check if this line is a jump (conditional or not).
    pub fn is_jump(&self) -> bool {
        matches!(self, Instruction::Compute { jump: Some(_), .. })
    }

    /// Check if this line occupies a slot in the assembled program.
    ///
    /// Comments and labels do not.
    pub fn is_executable(&self) -> bool {
        matches!(
            self,
            Instruction::Address(_) | Instruction::Compute { .. }
        )
    }
}

impl From<Address> for Instruction {
    fn from(address: Address) -> Self {
        Instruction::Address(address)
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Instruction::Comment(text) => write!(f, "// {}", text),
            Instruction::Address(address) => write!(f, "@{}", address),
            Instruction::Compute { dest, comp, jump } => {
                if let Some(dest) = dest {
                    write!(f, "{}=", dest.mnemonic())?;
                }
                f.write_str(comp.mnemonic())?;
                if let Some(jump) = jump {
                    write!(f, ";{}", jump.mnemonic())?;
                }
                Ok(())
            }
            Instruction::Label(name) => write!(f, "({})", name),
        }
    }
}
