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

//! VMTrans CLI
//!
//! Translates stack-based VM programs into Hack assembly.

use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use vmtrans::config::{BootstrapMode, TranslatorConfig};
use vmtrans::driver::{self, DriverError, Translation};
use vmtrans::output::default_output_path;
use vmtrans::watcher::SourceWatcher;

/// VMTrans - A translator from stack-based VM code to Hack assembly
#[derive(Parser, Debug)]
#[command(name = "vmtrans")]
#[command(version)]
#[command(about = "Translates stack-based VM code into Hack assembly")]
#[command(long_about = r#"
VMTrans translates programs for a stack-based virtual machine into
assembly for the 16-bit Hack computer.

The input is either:
  - a single .vm file, translated without a bootstrap
  - a directory, whose .vm files form one program started by a bootstrap
    that calls the entry function (Sys.init by default)

Example usage:
  vmtrans SimpleAdd.vm
  vmtrans FibonacciElement/
  vmtrans FibonacciElement/ -o fib.asm --no-comments

Watch mode:
  vmtrans FibonacciElement/ --watch
"#)]
struct Cli {
    /// A .vm file or a directory of .vm files
    input: PathBuf,

    /// Output file (defaults to Foo.asm for Foo.vm, Dir/Dir.asm for a directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Function called by the bootstrap
    #[arg(long, default_value = "Sys.init")]
    entry: String,

    /// When to emit the bootstrap
    #[arg(long, value_enum, default_value_t = BootstrapMode::Auto)]
    bootstrap: BootstrapMode,

    /// Omit the comment line naming each translated command
    #[arg(long)]
    no_comments: bool,

    /// Watch the sources and re-translate on changes
    #[arg(short, long)]
    watch: bool,
}

impl Cli {
    fn config(&self) -> TranslatorConfig {
        TranslatorConfig::default()
            .with_entry(self.entry.clone())
            .with_bootstrap(self.bootstrap)
            .with_comments(!self.no_comments)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    let config = cli.config();
    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&cli.input));

    log::debug!("{} v{}", vmtrans::NAME, vmtrans::VERSION);
    log::debug!("Input: {}", cli.input.display());
    log::debug!("Output: {}", output_path.display());

    if let Err(e) = build(&cli.input, &output_path, &config) {
        eprint!("{}", e.render());
        // only source errors can be fixed while watching
        if !cli.watch || !e.is_source_error() {
            return ExitCode::from(e.exit_code());
        }
    }

    if cli.watch {
        return run_watch_loop(&cli, &config, &output_path);
    }

    ExitCode::SUCCESS
}

/// Translate the input and write the result.
fn build(input: &Path, output: &Path, config: &TranslatorConfig) -> Result<(), DriverError> {
    let translation = driver::translate_path(input, config)?;
    driver::write_translation(&translation, output)?;
    report(&translation, output);
    Ok(())
}

fn report(translation: &Translation, output: &Path) {
    println!(
        "Translated {} -> {}",
        translation.files.join(", "),
        output.display()
    );
}

/// Run the watch loop, re-translating after every change.
fn run_watch_loop(cli: &Cli, config: &TranslatorConfig, output_path: &Path) -> ExitCode {
    let watcher = match SourceWatcher::new(std::slice::from_ref(&cli.input)) {
        Ok(w) => w,
        Err(e) => {
            eprint!("{}", e.render());
            return ExitCode::from(e.exit_code());
        }
    };

    println!();
    println!("Watching for changes... (Press Ctrl+C to stop)");

    loop {
        if let Err(e) = watcher.wait_for_change() {
            eprint!("{}", e.render());
            return ExitCode::from(e.exit_code());
        }

        println!();
        println!("Re-translating...");

        if let Err(e) = build(&cli.input, output_path, config) {
            eprint!("{}", e.render());
            println!("Fix errors and save to retry.");
            continue;
        }
        println!("Watching for changes...");
    }
}
