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

//! VM command definitions.

use super::Segment;

/// A stack arithmetic or logical operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithmeticOp {
    /// `x + y`
    Add,
    /// `x - y`
    Sub,
    /// `-y`
    Neg,
    /// `x == y`
    Eq,
    /// `x > y`
    Gt,
    /// `x < y`
    Lt,
    /// `x & y`
    And,
    /// `x | y`
    Or,
    /// `!y`
    Not,
}

impl ArithmeticOp {
    /// All operations, in declaration order.
    pub const ALL: [ArithmeticOp; 9] = [
        ArithmeticOp::Add,
        ArithmeticOp::Sub,
        ArithmeticOp::Neg,
        ArithmeticOp::Eq,
        ArithmeticOp::Gt,
        ArithmeticOp::Lt,
        ArithmeticOp::And,
        ArithmeticOp::Or,
        ArithmeticOp::Not,
    ];

    /// Look up an operation by its VM keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.keyword() == keyword)
    }

    /// The keyword used for this operation in VM source.
    pub fn keyword(&self) -> &'static str {
        match self {
            ArithmeticOp::Add => "add",
            ArithmeticOp::Sub => "sub",
            ArithmeticOp::Neg => "neg",
            ArithmeticOp::Eq => "eq",
            ArithmeticOp::Gt => "gt",
            ArithmeticOp::Lt => "lt",
            ArithmeticOp::And => "and",
            ArithmeticOp::Or => "or",
            ArithmeticOp::Not => "not",
        }
    }

    /// Check if this operation consumes a single operand.
    pub fn is_unary(&self) -> bool {
        matches!(self, ArithmeticOp::Neg | ArithmeticOp::Not)
    }

    /// Check if this operation produces a boolean.
    pub fn is_comparison(&self) -> bool {
        matches!(self, ArithmeticOp::Eq | ArithmeticOp::Gt | ArithmeticOp::Lt)
    }
}

/// A single VM command.
///
/// The operands each variant carries are exactly the ones its source form
/// requires, so a command can never be missing an operand or carry a stray one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `push segment index`
    Push(Segment, u16),
    /// `pop segment index`
    Pop(Segment, u16),
    /// `add`, `sub`, `neg`, `eq`, `gt`, `lt`, `and`, `or`, `not`
    Arithmetic(ArithmeticOp),
    /// `label name`
    Label(String),
    /// `goto name`
    Goto(String),
    /// `if-goto name`
    IfGoto(String),
    /// `function name nLocals`
    Function { name: String, n_locals: u16 },
    /// `call name nArgs`
    Call { name: String, n_args: u16 },
    /// `return`
    Return,
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Push(segment, index) => write!(f, "push {} {}", segment, index),
            Command::Pop(segment, index) => write!(f, "pop {} {}", segment, index),
            Command::Arithmetic(op) => f.write_str(op.keyword()),
            Command::Label(name) => write!(f, "label {}", name),
            Command::Goto(name) => write!(f, "goto {}", name),
            Command::IfGoto(name) => write!(f, "if-goto {}", name),
            Command::Function { name, n_locals } => write!(f, "function {} {}", name, n_locals),
            Command::Call { name, n_args } => write!(f, "call {} {}", name, n_args),
            Command::Return => f.write_str("return"),
        }
    }
}
