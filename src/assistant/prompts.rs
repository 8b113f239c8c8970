//! Prompt templates for the text-generation service.

use minijinja::{Environment, context};
use thiserror::Error;

const SUMMARY_TEMPLATE: &str = "Summarize the following service request in 3 short bullet points \
for the technician: \"{{ description }}\"";

const ESTIMATE_TEMPLATE: &str = "Estimate how many minutes it will take to complete the task: \
\"{{ title }} - {{ description }}\". Reply with the number of minutes as digits only.";

/// A prompt template failed to render.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("failed to render {prompt} prompt: {reason}")]
pub struct PromptError {
    prompt: &'static str,
    reason: String,
}

fn render(prompt: &'static str, template: &str, ctx: minijinja::Value) -> Result<String, PromptError> {
    let environment = Environment::new();
    environment
        .render_str(template, ctx)
        .map_err(|error| PromptError {
            prompt,
            reason: error.to_string(),
        })
}

/// Renders the technician-facing summary prompt.
///
/// # Errors
///
/// Returns [`PromptError`] when the template engine fails.
pub fn summary_prompt(description: &str) -> Result<String, PromptError> {
    render("summary", SUMMARY_TEMPLATE, context! { description })
}

/// Renders the work-time estimation prompt.
///
/// # Errors
///
/// Returns [`PromptError`] when the template engine fails.
pub fn estimate_prompt(title: &str, description: &str) -> Result<String, PromptError> {
    render(
        "estimate",
        ESTIMATE_TEMPLATE,
        context! { title, description },
    )
}
