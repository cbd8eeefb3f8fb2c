//! Terminal operator backed by dialoguer prompts

use dialoguer::{theme::ColorfulTheme, Input, Select};

use crate::core::error::Result;
use crate::core::intake::Operator;

/// Interactive operator for a terminal session
pub struct TermOperator {
    theme: ColorfulTheme,
}

impl TermOperator {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TermOperator {
    fn default() -> Self {
        Self::new()
    }
}

impl Operator for TermOperator {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        Ok(Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .interact_text()?)
    }

    // dialoguer re-prompts on parse failure, so invalid input never escapes
    fn read_int(&mut self, prompt: &str) -> Result<i64> {
        Ok(Input::<i64>::with_theme(&self.theme)
            .with_prompt(prompt)
            .interact_text()?)
    }

    fn choose(&mut self, prompt: &str, items: &[String]) -> Result<usize> {
        Ok(Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()?)
    }
}

/// Use the flag value when given, otherwise prompt
pub fn require_string(
    value: Option<String>,
    prompt: &str,
    op: &mut dyn Operator,
) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => op.read_line(prompt),
    }
}

/// Use the flag value when given, otherwise prompt for an integer
pub fn require_int(value: Option<i64>, prompt: &str, op: &mut dyn Operator) -> Result<i64> {
    match value {
        Some(v) => Ok(v),
        None => op.read_int(prompt),
    }
}
