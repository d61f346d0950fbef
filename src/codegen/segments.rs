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

//! Segment addressing.
//!
//! Resolves a `(segment, index)` pair to a concrete location and emits the
//! `push`/`pop` sequences for it. Invalid combinations are reported as
//! errors naming the command, the segment and the index; an address is never
//! clamped or defaulted.

use super::constants::{MAX_ADDRESS_LITERAL, TEMP_BASE, TEMP_END};
use super::emit::EmitHelpers;
use super::hack::{registers, Address, Comp, Dest};
use super::stack::StackPrimitives;
use super::CodeGenerator;
use crate::ast::{Command, Segment, Spanned};
use crate::error::{ErrorCode, Result, TranslateError};
use crate::parser::commands::is_valid_symbol;

/// Where a segment cell lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// Not a memory cell: the value itself.
    Constant(u16),
    /// `RAM[RAM[base] + offset]`
    Indirect { base: &'static str, offset: u16 },
    /// A fixed address or assembler symbol.
    Direct(Address),
}

/// Trait for segment resolution and access.
pub trait SegmentAccess {
    /// Resolve a segment cell to its location.
    fn resolve_location(
        &self,
        segment: Segment,
        index: u16,
        context: &Spanned<Command>,
    ) -> Result<Location>;

    /// Emit code pushing the value of a segment cell.
    fn emit_push(
        &mut self,
        segment: Segment,
        index: u16,
        context: &Spanned<Command>,
    ) -> Result<()>;

    /// Emit code popping the top of the stack into a segment cell.
    fn emit_pop(
        &mut self,
        segment: Segment,
        index: u16,
        context: &Spanned<Command>,
    ) -> Result<()>;
}

impl SegmentAccess for CodeGenerator {
    fn resolve_location(
        &self,
        segment: Segment,
        index: u16,
        context: &Spanned<Command>,
    ) -> Result<Location> {
        match segment {
            Segment::Constant => {
                check_literal(index, context)?;
                Ok(Location::Constant(index))
            }
            Segment::Local => indirect(registers::LCL, index, context),
            Segment::Argument => indirect(registers::ARG, index, context),
            Segment::This => indirect(registers::THIS, index, context),
            Segment::That => indirect(registers::THAT, index, context),
            Segment::Sp => indirect(registers::SP, index, context),
            Segment::Temp => {
                let address = TEMP_BASE as u32 + index as u32;
                if address > TEMP_END as u32 {
                    return Err(TranslateError::new(
                        ErrorCode::TempIndexOutOfRange,
                        format!(
                            "Temp index {} is out of range in '{}'",
                            index, context.node
                        ),
                        context.span,
                    )
                    .with_hint(format!(
                        "temp covers RAM[{}..={}], so the index must be 0..={}",
                        TEMP_BASE,
                        TEMP_END,
                        TEMP_END - TEMP_BASE
                    )));
                }
                Ok(Location::Direct(Address::Constant(address as u16)))
            }
            Segment::Pointer => match index {
                0 => Ok(Location::Direct(Address::Symbol(registers::THIS.to_string()))),
                1 => Ok(Location::Direct(Address::Symbol(registers::THAT.to_string()))),
                _ => Err(TranslateError::new(
                    ErrorCode::InvalidPointerIndex,
                    format!(
                        "Invalid pointer index {} in '{}'",
                        index, context.node
                    ),
                    context.span,
                )
                .with_hint("pointer only accepts 0 (THIS) or 1 (THAT)")),
            },
            Segment::Static => {
                if self.current_file.is_empty() {
                    return Err(TranslateError::new(
                        ErrorCode::MissingFileName,
                        format!(
                            "Cannot resolve '{}' without a current file name",
                            context.node
                        ),
                        context.span,
                    ));
                }
                if !is_valid_symbol(&self.current_file) {
                    return Err(TranslateError::new(
                        ErrorCode::InvalidFileName,
                        format!(
                            "File name '{}' cannot qualify the static in '{}'",
                            self.current_file, context.node
                        ),
                        context.span,
                    )
                    .with_hint(
                        "statics are named after their file, so the file name must not start \
                         with a digit and may only contain letters, digits, '_', '.', '$' and ':'",
                    ));
                }
                Ok(Location::Direct(Address::Symbol(format!(
                    "{}.{}",
                    self.current_file, index
                ))))
            }
        }
    }

    fn emit_push(
        &mut self,
        segment: Segment,
        index: u16,
        context: &Spanned<Command>,
    ) -> Result<()> {
        match self.resolve_location(segment, index, context)? {
            Location::Constant(value) => {
                self.emit_at(value);
                self.emit_assign(Dest::D, Comp::A);
            }
            Location::Indirect { base, offset } => {
                self.emit_at_symbol(base);
                self.emit_assign(Dest::D, Comp::M);
                self.emit_at(offset);
                self.emit_assign(Dest::A, Comp::DPlusA);
                self.emit_assign(Dest::D, Comp::M);
            }
            Location::Direct(address) => {
                self.emit(address.into());
                self.emit_assign(Dest::D, Comp::M);
            }
        }
        self.emit_push_d();
        Ok(())
    }

    fn emit_pop(
        &mut self,
        segment: Segment,
        index: u16,
        context: &Spanned<Command>,
    ) -> Result<()> {
        match self.resolve_location(segment, index, context)? {
            Location::Constant(_) => {
                return Err(TranslateError::new(
                    ErrorCode::CannotPopConstant,
                    format!("Cannot pop into the constant segment ('{}')", context.node),
                    context.span,
                ));
            }
            Location::Indirect { base, offset } => {
                // D = target address, then D = address + value and split the
                // sum again, so no scratch register is touched.
                self.emit_at_symbol(base);
                self.emit_assign(Dest::D, Comp::M);
                self.emit_at(offset);
                self.emit_assign(Dest::D, Comp::DPlusA);
                self.emit_decrement_sp();
                self.emit_dereference_sp();
                self.emit_assign(Dest::D, Comp::DPlusM);
                self.emit_assign(Dest::A, Comp::DMinusM);
                self.emit_assign(Dest::M, Comp::DMinusA);
            }
            Location::Direct(address) => {
                self.emit_pop_to_d();
                self.emit(address.into());
                self.emit_assign(Dest::M, Comp::D);
            }
        }
        Ok(())
    }
}

/// A cell addressed through the base pointer held in `base`.
fn indirect(base: &'static str, index: u16, context: &Spanned<Command>) -> Result<Location> {
    check_literal(index, context)?;
    Ok(Location::Indirect {
        base,
        offset: index,
    })
}

/// Reject values an A-instruction cannot load.
fn check_literal(value: u16, context: &Spanned<Command>) -> Result<()> {
    if value > MAX_ADDRESS_LITERAL {
        return Err(TranslateError::new(
            ErrorCode::ConstantOutOfRange,
            format!(
                "Value {} in '{}' exceeds the largest loadable constant {}",
                value, context.node, MAX_ADDRESS_LITERAL
            ),
            context.span,
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(command: Command) -> Spanned<Command> {
        Spanned::synthetic(command)
    }

    fn resolve(segment: Segment, index: u16) -> Result<Location> {
        let mut gen = CodeGenerator::new();
        gen.set_file_name("Main");
        gen.resolve_location(segment, index, &context(Command::Push(segment, index)))
    }

    #[test]
    fn test_constant() {
        assert_eq!(resolve(Segment::Constant, 17).unwrap(), Location::Constant(17));
        assert_eq!(
            resolve(Segment::Constant, 32768).unwrap_err().code,
            ErrorCode::ConstantOutOfRange
        );
    }

    #[test]
    fn test_base_pointer_segments() {
        assert_eq!(
            resolve(Segment::Local, 3).unwrap(),
            Location::Indirect {
                base: "LCL",
                offset: 3
            }
        );
        assert_eq!(
            resolve(Segment::Argument, 0).unwrap(),
            Location::Indirect {
                base: "ARG",
                offset: 0
            }
        );
        assert_eq!(
            resolve(Segment::This, 2).unwrap(),
            Location::Indirect {
                base: "THIS",
                offset: 2
            }
        );
        assert_eq!(
            resolve(Segment::That, 5).unwrap(),
            Location::Indirect {
                base: "THAT",
                offset: 5
            }
        );
        assert_eq!(
            resolve(Segment::Sp, 1).unwrap(),
            Location::Indirect {
                base: "SP",
                offset: 1
            }
        );
    }

    #[test]
    fn test_temp_window() {
        assert_eq!(
            resolve(Segment::Temp, 0).unwrap(),
            Location::Direct(Address::Constant(5))
        );
        assert_eq!(
            resolve(Segment::Temp, 10).unwrap(),
            Location::Direct(Address::Constant(15))
        );
        let err = resolve(Segment::Temp, 11).unwrap_err();
        assert_eq!(err.code, ErrorCode::TempIndexOutOfRange);
        assert!(err.message.contains("push temp 11"));
        assert_eq!(
            resolve(Segment::Temp, u16::MAX).unwrap_err().code,
            ErrorCode::TempIndexOutOfRange
        );
    }

    #[test]
    fn test_pointer() {
        assert_eq!(
            resolve(Segment::Pointer, 0).unwrap(),
            Location::Direct(Address::Symbol("THIS".to_string()))
        );
        assert_eq!(
            resolve(Segment::Pointer, 1).unwrap(),
            Location::Direct(Address::Symbol("THAT".to_string()))
        );
        let err = resolve(Segment::Pointer, 2).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPointerIndex);
        assert!(err.message.contains("pointer index 2"));
    }

    #[test]
    fn test_static_is_file_qualified() {
        assert_eq!(
            resolve(Segment::Static, 4).unwrap(),
            Location::Direct(Address::Symbol("Main.4".to_string()))
        );
    }

    #[test]
    fn test_static_without_file_name() {
        let gen = CodeGenerator::new();
        let command = context(Command::Push(Segment::Static, 0));
        let err = gen
            .resolve_location(Segment::Static, 0, &command)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingFileName);
    }

    #[test]
    fn test_static_rejects_unusable_file_names() {
        for name in ["2048.vm", "my-prog.vm", "My Prog.vm"] {
            let mut gen = CodeGenerator::new();
            gen.set_file_name(name);
            let command = context(Command::Pop(Segment::Static, 1));
            let err = gen
                .resolve_location(Segment::Static, 1, &command)
                .unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidFileName, "{}", name);
            assert!(err.hint.is_some());
        }
    }

    #[test]
    fn test_unusable_file_name_only_matters_for_statics() {
        let mut gen = CodeGenerator::new();
        gen.set_file_name("my-prog.vm");
        let command = context(Command::Push(Segment::Local, 0));
        assert!(gen.resolve_location(Segment::Local, 0, &command).is_ok());
    }
}
