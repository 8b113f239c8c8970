//! Integration tests for the summary and estimate collaborators.

use std::sync::Arc;

use async_trait::async_trait;
use fieldwork::{
    assistant::{
        ports::{TextGenerationError, TextGenerationResult, TextGenerator},
        services::{
            DEFAULT_ESTIMATE_MINUTES, SUMMARY_MISSING_CREDENTIAL, SummaryBoard, SummaryState,
            TaskAssistant,
        },
    },
    task::domain::TaskId,
};

/// Replies with a fixed outcome regardless of the prompt.
struct ScriptedGenerator(TextGenerationResult<String>);

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, _prompt: &str) -> TextGenerationResult<String> {
        self.0.clone()
    }
}

fn assistant(reply: TextGenerationResult<String>) -> TaskAssistant<dyn TextGenerator> {
    let generator: Arc<dyn TextGenerator> = Arc::new(ScriptedGenerator(reply));
    TaskAssistant::new(generator)
}

#[tokio::test(flavor = "multi_thread")]
async fn board_holds_summary_per_task() -> Result<(), eyre::Report> {
    let board = SummaryBoard::new(assistant(Ok("- isolate circuit".to_owned())));
    let first = TaskId::from_raw("a");
    let second = TaskId::from_raw("b");

    let (_, first_job) = board.request(first.clone(), "Breaker trips");
    let (_, second_job) = board.request(second.clone(), "Tap drips");
    eyre::ensure!(first_job.await?);
    eyre::ensure!(second_job.await?);

    let ready = Some(SummaryState::Ready("- isolate circuit".to_owned()));
    eyre::ensure!(board.summary(&first) == ready);
    eyre::ensure!(board.summary(&second) == ready);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn unconfigured_service_degrades_to_fixed_values() {
    let helper = assistant(Err(TextGenerationError::MissingCredential));

    assert_eq!(helper.summarize("No power").await, SUMMARY_MISSING_CREDENTIAL);
    assert_eq!(
        helper.estimate_minutes("No power", "Breaker trips").await,
        DEFAULT_ESTIMATE_MINUTES
    );
}
