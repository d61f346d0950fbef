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

//! Memory layout and calling convention constants for the Hack platform.

/// Initial value of the stack pointer.
pub const STACK_BASE: u16 = 256;

/// First RAM address of the `temp` segment.
pub const TEMP_BASE: u16 = 5;

/// Last RAM address of the `temp` segment (inclusive).
pub const TEMP_END: u16 = 15;

/// Largest value an A-instruction can load.
pub const MAX_ADDRESS_LITERAL: u16 = 0x7FFF;

/// Cells a call pushes in front of the callee's frame: the return address
/// followed by the saved `LCL`, `ARG`, `THIS` and `THAT`.
pub const FRAME_SIZE: u16 = 5;

/// Function the bootstrap code calls by default.
pub const DEFAULT_ENTRY_FUNCTION: &str = "Sys.init";

/// Prefix of the labels closing a comparison.
pub const COMPARISON_LABEL_PREFIX: &str = "__CMP_DONE_";

/// Prefix of the labels marking a call's return address.
pub const RETURN_LABEL_PREFIX: &str = "__RETURN_";
