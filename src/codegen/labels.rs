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

//! Unique label allocation.
//!
//! Generated labels must be unique across the whole build, because all files
//! of a program are concatenated into one assembly file with a single symbol
//! table. The allocator is therefore owned by the code generator for the
//! lifetime of a build and never reset between files.

use super::constants::{COMPARISON_LABEL_PREFIX, RETURN_LABEL_PREFIX};

/// Build-global counters for generated labels.
#[derive(Debug, Default, Clone)]
pub struct LabelAllocator {
    /// Number of comparison labels handed out so far.
    comparisons: u64,
    /// Number of return-address labels handed out so far.
    calls: u64,
}

impl LabelAllocator {
    /// Create an allocator with both counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the label closing the next comparison.
    pub fn next_comparison_label(&mut self) -> String {
        let label = format!("{}{}", COMPARISON_LABEL_PREFIX, self.comparisons);
        self.comparisons += 1;
        label
    }

    /// Allocate the return-address label for the next call site.
    pub fn next_call_label(&mut self) -> String {
        let label = format!("{}{}", RETURN_LABEL_PREFIX, self.calls);
        self.calls += 1;
        label
    }

    /// Number of comparison labels allocated.
    pub fn comparisons_issued(&self) -> u64 {
        self.comparisons
    }

    /// Number of return-address labels allocated.
    pub fn calls_issued(&self) -> u64 {
        self.calls
    }
}
