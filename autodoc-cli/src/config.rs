//! API key resolution: environment first, then an interactive prompt.

use anyhow::{Result, bail};
use autodoc_pipeline::ApiKeys;
use rustyline::completion::Completer;
use rustyline::config::{ColorMode, Config};
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Editor, Helper};
use std::borrow::Cow;

pub const MODEL_KEY_VARS: [&str; 2] = ["GOOGLE_API_KEY", "GEMINI_API_KEY"];
pub const SEARCH_KEY_VAR: &str = "TAVILY_API_KEY";

const MODEL_KEY_PROMPT: &str = "Enter your Google API Key: ";
const SEARCH_KEY_PROMPT: &str = "Enter your Tavily API Key: ";
const MASK: char = '*';

/// Asks the user for a missing secret.
pub trait SecretPrompt {
    fn prompt(&mut self, message: &str) -> Result<String>;
}

/// Redraws every typed character as `*`.
#[derive(Debug, Default)]
pub struct MaskedInput;

impl Highlighter for MaskedInput {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Owned(MASK.to_string().repeat(line.chars().count()))
    }

    // Forces a redraw per keystroke so the raw character is never echoed.
    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }
}

impl Completer for MaskedInput {
    type Candidate = String;
}

impl Hinter for MaskedInput {
    type Hint = String;
}

impl Validator for MaskedInput {}

impl Helper for MaskedInput {}

/// Masked line-editor prompt on the terminal. The editor is only created when a key is missing.
#[derive(Default)]
pub struct ReadlinePrompt {
    editor: Option<Editor<MaskedInput, DefaultHistory>>,
}

impl ReadlinePrompt {
    pub fn new() -> Self {
        Self::default()
    }

    fn masked_editor() -> Result<Editor<MaskedInput, DefaultHistory>> {
        let config = Config::builder().color_mode(ColorMode::Forced).auto_add_history(false).build();
        let mut editor = Editor::with_config(config)?;
        editor.set_helper(Some(MaskedInput));
        Ok(editor)
    }
}

impl SecretPrompt for ReadlinePrompt {
    fn prompt(&mut self, message: &str) -> Result<String> {
        if self.editor.is_none() {
            self.editor = Some(Self::masked_editor()?);
        }
        let Some(editor) = self.editor.as_mut() else {
            bail!("no terminal available to prompt for secrets");
        };
        Ok(editor.readline(message)?)
    }
}

/// Process environment lookup. Empty values count as unset.
pub fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn first_set(lookup: &impl Fn(&str) -> Option<String>, names: &[&str]) -> Option<String> {
    names.iter().filter_map(|name| lookup(name)).find(|value| !value.trim().is_empty())
}

fn ask(prompter: &mut dyn SecretPrompt, message: &str, what: &str) -> Result<String> {
    let value = prompter.prompt(message)?.trim().to_string();
    if value.is_empty() {
        bail!("{} is required", what);
    }
    Ok(value)
}

/// Both keys, prompting for whichever the environment lacks.
pub fn resolve_api_keys(
    lookup: impl Fn(&str) -> Option<String>,
    prompter: &mut dyn SecretPrompt,
) -> Result<ApiKeys> {
    let model_key = match first_set(&lookup, &MODEL_KEY_VARS) {
        Some(key) => key,
        None => ask(prompter, MODEL_KEY_PROMPT, "Google API key")?,
    };
    let search_key = match first_set(&lookup, &[SEARCH_KEY_VAR]) {
        Some(key) => key,
        None => ask(prompter, SEARCH_KEY_PROMPT, "Tavily API key")?,
    };
    Ok(ApiKeys::new(model_key, search_key))
}
