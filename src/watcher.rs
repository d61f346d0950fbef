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

//! File watching for re-translation.
//!
//! [`SourceWatcher`] monitors the directories holding the input files and
//! reports when a `.vm` file in one of them changes. Watching the directory
//! instead of the files catches editors that save by writing a temporary file
//! and renaming it over the original, as well as `.vm` files added to a
//! program directory after the watch started.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::driver::{DriverError, VM_EXTENSION};

/// Debounce window for file change events.
/// Multiple rapid changes within this window are collapsed into one.
const DEBOUNCE_DURATION: Duration = Duration::from_millis(100);

/// Watches VM sources for changes.
///
/// # Example
///
/// ```no_run
/// use std::path::PathBuf;
/// use vmtrans::watcher::SourceWatcher;
///
/// let watcher = SourceWatcher::new(&[PathBuf::from("FibonacciElement")])
///     .expect("Failed to create watcher");
/// watcher.wait_for_change().expect("Watch error");
/// println!("A .vm file changed");
/// ```
pub struct SourceWatcher {
    /// The underlying file system watcher.
    _watcher: RecommendedWatcher,
    /// Receiver for file system events.
    rx: Receiver<Result<Event, notify::Error>>,
    /// Directories being watched.
    directories: Vec<PathBuf>,
}

impl SourceWatcher {
    /// Create a watcher for the given inputs.
    ///
    /// A directory is watched itself; a file is watched through its parent
    /// directory.
    pub fn new(inputs: &[PathBuf]) -> Result<Self, DriverError> {
        let (tx, rx) = mpsc::channel();

        let mut watcher = notify::recommended_watcher(tx)
            .map_err(|e| DriverError::Watch(format!("Failed to create watcher: {}", e)))?;

        let mut directories = Vec::new();
        let mut seen = HashSet::new();

        for input in inputs {
            let canonical = input.canonicalize().map_err(|e| {
                DriverError::Watch(format!("Cannot resolve path {}: {}", input.display(), e))
            })?;

            let directory = if canonical.is_dir() {
                canonical
            } else {
                match canonical.parent() {
                    Some(parent) => parent.to_path_buf(),
                    None => continue,
                }
            };

            if seen.insert(directory.clone()) {
                watcher
                    .watch(&directory, RecursiveMode::NonRecursive)
                    .map_err(|e| {
                        DriverError::Watch(format!(
                            "Failed to watch {}: {}",
                            directory.display(),
                            e
                        ))
                    })?;
                log::debug!("Watching {}", directory.display());
                directories.push(directory);
            }
        }

        Ok(Self {
            _watcher: watcher,
            rx,
            directories,
        })
    }

    /// The watched directories.
    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    /// Block until a `.vm` file in a watched directory changes.
    ///
    /// Events arriving within the debounce window after the first relevant
    /// one are discarded.
    pub fn wait_for_change(&self) -> Result<(), DriverError> {
        loop {
            let event = self
                .rx
                .recv()
                .map_err(|e| DriverError::Watch(format!("Watch channel closed: {}", e)))?
                .map_err(|e| DriverError::Watch(format!("Watch error: {}", e)))?;

            if !is_relevant_event(&event) {
                continue;
            }
            log::debug!("Change detected: {:?}", event.paths);

            std::thread::sleep(DEBOUNCE_DURATION);
            self.drain_pending_events();

            return Ok(());
        }
    }

    fn drain_pending_events(&self) {
        while self.rx.try_recv().is_ok() {}
    }
}

/// Check if an event modifies, creates or removes a `.vm` file.
fn is_relevant_event(event: &Event) -> bool {
    match event.kind {
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_) => {}
        _ => return false,
    }

    event.paths.iter().any(|p| is_vm_file(p))
}

fn is_vm_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(VM_EXTENSION)
}
