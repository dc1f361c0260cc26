//! Interactive prompting.
//!
//! The pipeline talks to the operator through the `Prompt` trait and owns
//! its prompt for the duration of a run, so the terminal session is released
//! on every exit path. `TermPrompt` is the dialoguer-backed implementation;
//! tests substitute a scripted one.

use dialoguer::{Confirm, Input};
use std::io;

/// Line-based operator interaction.
pub trait Prompt {
    /// Ask for a line of input; empty answers are allowed.
    fn input(&mut self, message: &str) -> io::Result<String>;

    /// Ask a yes/no question, defaulting to no.
    fn confirm(&mut self, message: &str) -> io::Result<bool>;
}

/// Terminal prompt.
#[derive(Debug, Default)]
pub struct TermPrompt;

impl Prompt for TermPrompt {
    fn input(&mut self, message: &str) -> io::Result<String> {
        Input::<String>::new()
            .with_prompt(message)
            .allow_empty(true)
            .interact_text()
            .map_err(into_io_error)
    }

    fn confirm(&mut self, message: &str) -> io::Result<bool> {
        Confirm::new()
            .with_prompt(message)
            .default(false)
            .interact()
            .map_err(into_io_error)
    }
}

fn into_io_error(e: dialoguer::Error) -> io::Error {
    match e {
        dialoguer::Error::IO(e) => e,
    }
}
