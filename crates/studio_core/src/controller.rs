use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use shared::{
    domain::{DesignId, DesignRecord},
    error::SubmissionError,
    protocol::{GenerateDesignRequest, GenerateDesignResponse},
};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::{
    error::StudioError,
    events::{failure_notice, success_notice, StudioEvent},
    examples::{example_prompt, EXAMPLE_PROMPTS},
    remote::RemoteDesignService,
    store::DesignCollectionStore,
};

/// Transient input state; created empty and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionState {
    pub current_prompt_text: String,
    pub is_submitting: bool,
}

struct ControllerState {
    submission: SubmissionState,
    designs: DesignCollectionStore,
}

/// Owns the prompt, the in-flight flag and the design collection for one
/// session. Front-ends share it behind an `Arc` and mutate only through these
/// methods.
///
/// Single-flight is enforced here: a `submit` that arrives while another one
/// is outstanding fails with [`SubmissionError::InFlight`] without calling the
/// service. The state lock is never held across the service call.
pub struct DesignSubmissionController {
    remote: Arc<dyn RemoteDesignService>,
    inner: Mutex<ControllerState>,
    events: broadcast::Sender<StudioEvent>,
}

impl DesignSubmissionController {
    pub fn new(remote: Arc<dyn RemoteDesignService>) -> Arc<Self> {
        let (events, _) = broadcast::channel(256);
        Arc::new(Self {
            remote,
            inner: Mutex::new(ControllerState {
                submission: SubmissionState::default(),
                designs: DesignCollectionStore::new(),
            }),
            events,
        })
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<StudioEvent> {
        self.events.subscribe()
    }

    pub fn prompt_text(&self) -> String {
        self.state().submission.current_prompt_text.clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.state().submission.is_submitting
    }

    pub fn snapshot(&self) -> SubmissionState {
        self.state().submission.clone()
    }

    /// Records a user edit. Edits made while a submission is in flight do not
    /// change the prompt that submission already captured.
    pub fn set_prompt_text(&self, text: impl Into<String>) {
        let text = text.into();
        {
            let mut guard = self.state();
            if guard.submission.current_prompt_text == text {
                return;
            }
            guard.submission.current_prompt_text = text.clone();
        }
        self.emit(StudioEvent::PromptChanged(text));
    }

    /// Replaces the prompt with example `index`. Returns `Ok(false)` without
    /// touching the prompt while a submission is in flight.
    pub fn fill_example(&self, index: usize) -> Result<bool, StudioError> {
        let example = example_prompt(index).ok_or(StudioError::UnknownExample {
            index,
            available: EXAMPLE_PROMPTS.len(),
        })?;
        if self.is_submitting() {
            return Ok(false);
        }
        self.set_prompt_text(example);
        Ok(true)
    }

    /// Newest-first copy of the collection.
    pub fn designs(&self) -> Vec<DesignRecord> {
        self.state().designs.all().to_vec()
    }

    pub fn design(&self, id: DesignId) -> Option<DesignRecord> {
        self.state().designs.get(id).cloned()
    }

    pub fn design_count(&self) -> usize {
        self.state().designs.len()
    }

    /// Submits whatever the prompt holds right now.
    pub async fn submit_current(&self) -> Result<DesignRecord, SubmissionError> {
        let prompt = self.prompt_text();
        self.submit(&prompt).await
    }

    pub async fn submit(&self, prompt_text: &str) -> Result<DesignRecord, SubmissionError> {
        let prompt = prompt_text.trim().to_string();
        if prompt.is_empty() {
            return Err(self.reject(SubmissionError::EmptyPrompt));
        }

        let accepted = {
            let mut guard = self.state();
            if guard.submission.is_submitting {
                false
            } else {
                guard.submission.is_submitting = true;
                true
            }
        };
        if !accepted {
            debug!("submission rejected: another design is being generated");
            return Err(self.reject(SubmissionError::InFlight));
        }
        self.emit(StudioEvent::SubmissionStateChanged {
            is_submitting: true,
        });
        info!(prompt_chars = prompt.chars().count(), "generating design");

        let outcome = match self
            .remote
            .generate(GenerateDesignRequest {
                prompt: prompt.clone(),
            })
            .await
        {
            Ok(response) => usable_image_reference(&response),
            Err(err) => Err(SubmissionError::transport(err.to_string())),
        };

        match outcome {
            Ok(image_reference) => {
                let record = DesignRecord::new(prompt, image_reference, Utc::now());
                {
                    let mut guard = self.state();
                    guard.designs.append(record.clone());
                    guard.submission.current_prompt_text.clear();
                    guard.submission.is_submitting = false;
                }
                info!(design_id = %record.id(), "design created");
                self.emit(StudioEvent::PromptChanged(String::new()));
                self.emit(StudioEvent::SubmissionStateChanged {
                    is_submitting: false,
                });
                self.emit(StudioEvent::DesignCreated(record.clone()));
                self.emit(StudioEvent::Notice(success_notice()));
                Ok(record)
            }
            Err(err) => {
                self.state().submission.is_submitting = false;
                warn!(code = ?err.code(), error = %err, "generation failed");
                self.emit(StudioEvent::SubmissionStateChanged {
                    is_submitting: false,
                });
                Err(self.reject(err))
            }
        }
    }

    fn reject(&self, err: SubmissionError) -> SubmissionError {
        self.emit(StudioEvent::Notice(failure_notice(&err)));
        err
    }

    fn emit(&self, event: StudioEvent) {
        // No subscribers is fine; notices are fire-and-forget.
        let _ = self.events.send(event);
    }

    fn state(&self) -> MutexGuard<'_, ControllerState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A service error wins over an image. Any non-blank reference is kept exactly
/// as the service returned it; resolving it is the loader's job.
fn usable_image_reference(response: &GenerateDesignResponse) -> Result<String, SubmissionError> {
    if let Some(message) = response.error_message() {
        return Err(SubmissionError::generation(Some(message)));
    }

    match response.image_url.as_deref() {
        Some(reference) if !reference.trim().is_empty() => Ok(reference.to_string()),
        _ => Err(SubmissionError::generation(None)),
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
