use dialoguer::{Completion, Input, Select};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Free text
    Text,
    /// Pick one of the suggestions
    Choice,
    /// Free text, tab-completed from the suggestions
    Autocomplete,
}

/// Source of interactive answers for multi-step commands.
pub trait InputCollector {
    /// Ask one question. `None` means the user cancelled, which is not the same as an empty answer.
    fn get_input(&mut self, prompt: &str, suggestions: &[String], mode: InputMode) -> Option<String>;
}

/// Owned option list for [`InputCollector::get_input`].
pub fn options(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Prompts on the controlling terminal
#[derive(Debug, Default)]
pub struct TerminalInput;

struct PrefixCompletion<'a> {
    candidates: &'a [String],
}

impl Completion for PrefixCompletion<'_> {
    fn get(&self, input: &str) -> Option<String> {
        let needle = input.to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.candidates
            .iter()
            .find(|c| c.to_lowercase().starts_with(&needle) && c.len() > input.len())
            .cloned()
    }
}

impl InputCollector for TerminalInput {
    fn get_input(&mut self, prompt: &str, suggestions: &[String], mode: InputMode) -> Option<String> {
        let prompt = prompt.trim_end_matches([' ', ':']);

        let answer = match mode {
            InputMode::Choice if !suggestions.is_empty() => Select::new()
                .with_prompt(prompt)
                .items(suggestions)
                .default(0)
                .interact_opt()
                .map(|picked| picked.map(|idx| suggestions[idx].clone())),
            InputMode::Autocomplete => {
                let completion = PrefixCompletion { candidates: suggestions };
                Input::<String>::new()
                    .with_prompt(prompt)
                    .allow_empty(true)
                    .completion_with(&completion)
                    .interact_text()
                    .map(Some)
            }
            _ => Input::<String>::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()
                .map(Some),
        };

        match answer {
            Ok(value) => value.map(|v| v.trim().to_string()),
            Err(e) => {
                debug!(error = %e, "input aborted");
                None
            }
        }
    }
}

#[cfg(test)]
pub use scripted::ScriptedInput;
