//! The *hed* text editor.
//!
//! Copyright 2024 David Edwards
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! you may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//! <https://www.apache.org/licenses/LICENSE-2.0>
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.
mod ansi;
mod bind;
mod clip;
mod color;
mod command;
mod config;
mod control;
mod coord;
mod document;
mod editor;
mod env;
mod error;
mod help;
mod highlight;
mod io;
mod key;
mod mode;
mod op;
mod opt;
mod prompt;
mod render;
mod row;
mod search;
mod size;
mod syntax;
mod sys;
mod term;
mod viewport;
mod writer;

use crate::clip::Clipboard;
use crate::config::Configuration;
use crate::control::Controller;
use crate::document::Document;
use crate::editor::Editor;
use crate::env::Environment;
use crate::error::Result;
use crate::key::Keyboard;
use crate::opt::Options;
use crate::syntax::Registry;
use std::ops::Drop;
use std::path::Path;
use std::process::ExitCode;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Usage documentation for display to terminal.
const USAGE: &str = include_str!("include/usage.in");

// Version and build information.
const PACKAGE_NAME: &str = env!("CARGO_PKG_NAME");
const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");
const BUILD_HASH: &str = env!("BUILD_HASH");
const BUILD_DATE: &str = env!("BUILD_DATE");

// Environment variables that control logging.
const LOG_VAR: &str = "HED_LOG";
const LOG_LEVEL_VAR: &str = "HED_LOG_LEVEL";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Used for restoring the terminal via [`Drop`] to its original state.
struct RestoreTerminal;

impl Drop for RestoreTerminal {
    fn drop(&mut self) {
        restore_term();
        term::restore().unwrap_or_else(|e| println!("error restoring terminal: {e}"));
    }
}

fn main() -> ExitCode {
    match run() {
        Err(e) => {
            println!("{e}");
            ExitCode::from(1)
        }
        Ok(_) => ExitCode::SUCCESS,
    }
}

fn run() -> Result<()> {
    let opts = Options::parse(std::env::args().skip(1))?;
    if opts.help {
        println!("{USAGE}");
        Ok(())
    } else if opts.version {
        println!("{PACKAGE_NAME} {PACKAGE_VERSION} ({BUILD_HASH} {BUILD_DATE})");
        Ok(())
    } else if opts.ops {
        print!("{}", help::ops_content());
        Ok(())
    } else {
        // Guard must outlive the editing session so that buffered events are flushed.
        let _guard = configure_logging(&opts);
        run_opts(&opts)
    }
}

/// Installs a subscriber that writes events to the file named by `--log` or the
/// `HED_LOG` environment variable, returning the guard of the background writer.
///
/// Nothing is installed if neither is present, since standard output belongs to
/// the editor.
fn configure_logging(opts: &Options) -> Option<WorkerGuard> {
    let log_path = opts
        .log_path
        .clone()
        .or_else(|| std::env::var(LOG_VAR).ok())
        .filter(|path| !path.is_empty())?;
    let path = Path::new(&log_path);
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = path.file_name()?;

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_env(LOG_LEVEL_VAR)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(nb_writer)
        .with_ansi(false)
        .try_init()
        .ok()
        .map(|_| guard)
}

fn run_opts(opts: &Options) -> Result<()> {
    // Load optional configuration from either standard location or path specified on
    // command line, and apply command line options afterwards since these override
    // all other settings.
    let mut config = if let Some(ref config_path) = opts.config_path {
        Configuration::load_file(config_path)?
    } else {
        Configuration::load()?
    };
    config.apply_opts(opts);

    // Load optional syntax configurations via registry and update configuration.
    config.registry = if let Some(ref syntax_dir) = opts.syntax_dir {
        Registry::load_dir(syntax_dir)?
    } else {
        Registry::load()?
    };

    if opts.bindings {
        print!("{}", help::bindings_content(&config.bindings));
        Ok(())
    } else {
        run_config(opts, config)
    }
}

fn run_config(opts: &Options, config: Configuration) -> Result<()> {
    // Document is loaded before the terminal is touched so that a failure is reported
    // on a usable terminal.
    let doc = if let Some(ref path) = opts.file {
        Document::load(path, &config.registry)?
    } else {
        Document::new()
    };
    let editor = Editor::new(doc, Clipboard::new(config.settings.global_clipboard));
    info!(version = PACKAGE_VERSION, file = ?opts.file, "session started");

    // Puts terminal into raw mode prior to running main controller loop, but also
    // ensures terminal settings are restored upon exit.
    term::init()?;
    let _restore = RestoreTerminal;
    prepare_term();
    let env = Environment::new(editor, term::size()?, config.to_ref());
    let mut controller = Controller::new(Keyboard::new(), env);
    controller.run()?;
    info!("session ended");
    Ok(())
}

fn prepare_term() {
    print!("{}{}", ansi::enter_alt_screen(), ansi::clear_screen());
}

fn restore_term() {
    print!(
        "{}{}{}",
        ansi::clear_screen(),
        ansi::show_cursor(),
        ansi::exit_alt_screen()
    );
}
