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

//! Output module for the VM translator.
//!
//! Renders instruction records to assembly text and writes `.asm` files.

use crate::codegen::Instruction;
use std::path::{Path, PathBuf};

/// Extension of generated assembly files.
pub const ASM_EXTENSION: &str = "asm";

/// Render instructions as assembly text, one `\n`-terminated line each.
pub fn render(instructions: &[Instruction]) -> String {
    let mut text = String::with_capacity(instructions.len() * 8);
    for instruction in instructions {
        text.push_str(&instruction.to_string());
        text.push('\n');
    }
    text
}

/// Write instructions to an assembly file, replacing it if it exists.
pub fn write_output(instructions: &[Instruction], path: &Path) -> std::io::Result<()> {
    std::fs::write(path, render(instructions))
}

/// Where the output for an input goes when no path is given.
///
/// `Foo.vm` becomes `Foo.asm` next to it; a directory `Dir` becomes
/// `Dir/Dir.asm` inside it.
pub fn default_output_path(input: &Path) -> PathBuf {
    if input.is_dir() {
        let name = input
            .canonicalize()
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_os_string()))
            .or_else(|| input.file_name().map(|n| n.to_os_string()))
            .unwrap_or_else(|| "out".into());
        let mut file = PathBuf::from(name);
        file.set_extension(ASM_EXTENSION);
        input.join(file)
    } else {
        input.with_extension(ASM_EXTENSION)
    }
}
