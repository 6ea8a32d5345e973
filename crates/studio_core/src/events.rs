use shared::{
    domain::{DesignRecord, Notice},
    error::SubmissionError,
};

/// Everything a front-end needs to re-render after the controller changes state.
#[derive(Debug, Clone)]
pub enum StudioEvent {
    SubmissionStateChanged { is_submitting: bool },
    PromptChanged(String),
    DesignCreated(DesignRecord),
    Notice(Notice),
}

pub fn success_notice() -> Notice {
    Notice::success("Design created!", "Your AI fashion design is ready")
}

pub fn failure_notice(err: &SubmissionError) -> Notice {
    match err {
        SubmissionError::EmptyPrompt => Notice::failure(
            "Enter a design prompt",
            "Describe the fashion design you want to create",
        ),
        SubmissionError::InFlight => Notice::failure(
            "Generation in progress",
            "Wait for the current design to finish before starting another",
        ),
        SubmissionError::Generation(message) | SubmissionError::Transport(message) => {
            Notice::failure("Generation failed", message.clone())
        }
    }
}
