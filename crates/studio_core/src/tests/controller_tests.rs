use super::*;
use std::collections::VecDeque;

use anyhow::anyhow;
use async_trait::async_trait;
use shared::{
    domain::{Notice, NoticeKind},
    error::{ErrorCode, RETRY_MESSAGE},
};
use tokio::sync::{oneshot, Mutex as AsyncMutex};

type Reply = std::result::Result<GenerateDesignResponse, String>;

struct ScriptedDesignService {
    replies: AsyncMutex<VecDeque<Reply>>,
    prompts: AsyncMutex<Vec<String>>,
}

impl ScriptedDesignService {
    fn new(replies: impl IntoIterator<Item = Reply>) -> Arc<Self> {
        Arc::new(Self {
            replies: AsyncMutex::new(replies.into_iter().collect()),
            prompts: AsyncMutex::new(Vec::new()),
        })
    }

    async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }
}

#[async_trait]
impl RemoteDesignService for ScriptedDesignService {
    async fn generate(
        &self,
        request: GenerateDesignRequest,
    ) -> anyhow::Result<GenerateDesignResponse> {
        self.prompts.lock().await.push(request.prompt);
        match self.replies.lock().await.pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(anyhow!(message)),
            None => Err(anyhow!("no scripted reply left")),
        }
    }
}

/// Holds the call open until the test releases it.
struct GatedDesignService {
    started: AsyncMutex<Option<oneshot::Sender<()>>>,
    release: AsyncMutex<Option<oneshot::Receiver<GenerateDesignResponse>>>,
    calls: AsyncMutex<u32>,
}

impl GatedDesignService {
    fn new() -> (
        Arc<Self>,
        oneshot::Receiver<()>,
        oneshot::Sender<GenerateDesignResponse>,
    ) {
        let (started_tx, started_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel();
        let service = Arc::new(Self {
            started: AsyncMutex::new(Some(started_tx)),
            release: AsyncMutex::new(Some(release_rx)),
            calls: AsyncMutex::new(0),
        });
        (service, started_rx, release_tx)
    }
}

#[async_trait]
impl RemoteDesignService for GatedDesignService {
    async fn generate(
        &self,
        _request: GenerateDesignRequest,
    ) -> anyhow::Result<GenerateDesignResponse> {
        *self.calls.lock().await += 1;
        if let Some(started) = self.started.lock().await.take() {
            let _ = started.send(());
        }
        let release = self
            .release
            .lock()
            .await
            .take()
            .ok_or_else(|| anyhow!("gate already used"))?;
        release.await.map_err(|_| anyhow!("gate dropped"))
    }
}

fn drain_notices(events: &mut broadcast::Receiver<StudioEvent>) -> Vec<Notice> {
    let mut notices = Vec::new();
    while let Ok(event) = events.try_recv() {
        if let StudioEvent::Notice(notice) = event {
            notices.push(notice);
        }
    }
    notices
}

#[tokio::test]
async fn blank_prompts_are_rejected_without_calling_the_service() {
    let service = ScriptedDesignService::new(Vec::<Reply>::new());
    let controller = DesignSubmissionController::new(service.clone());
    let mut events = controller.subscribe_events();

    for blank in ["", "   ", "\n\t "] {
        let err = controller.submit(blank).await.expect_err("blank prompt");
        assert_eq!(err, SubmissionError::EmptyPrompt);
        assert_eq!(err.code(), ErrorCode::Validation);
    }

    assert!(service.prompts().await.is_empty());
    assert!(!controller.is_submitting());
    let notices = drain_notices(&mut events);
    assert_eq!(notices.len(), 3);
    assert!(notices.iter().all(Notice::is_failure));
    assert_eq!(notices[0].title, "Enter a design prompt");
}

#[tokio::test]
async fn success_prepends_record_with_trimmed_prompt_and_clears_input() {
    let service = ScriptedDesignService::new([Ok(GenerateDesignResponse::image(
        "https://cdn.example/designs/x.png",
    ))]);
    let controller = DesignSubmissionController::new(service.clone());
    let mut events = controller.subscribe_events();
    controller.set_prompt_text("  emerald gown with embroidery  ");

    let record = controller.submit_current().await.expect("design");

    assert_eq!(
        service.prompts().await,
        vec!["emerald gown with embroidery".to_string()]
    );
    assert_eq!(record.image_reference(), "https://cdn.example/designs/x.png");
    assert_eq!(record.prompt(), "emerald gown with embroidery");
    let designs = controller.designs();
    assert_eq!(designs.len(), 1);
    assert_eq!(designs[0], record);
    assert_eq!(controller.prompt_text(), "");
    assert!(!controller.is_submitting());

    let notices = drain_notices(&mut events);
    assert_eq!(notices.last().map(|n| n.kind), Some(NoticeKind::Success));
}

#[tokio::test]
async fn newest_design_is_listed_first() {
    let service = ScriptedDesignService::new([
        Ok(GenerateDesignResponse::image("https://img/a.png")),
        Ok(GenerateDesignResponse::image("https://img/b.png")),
        Ok(GenerateDesignResponse::image("https://img/c.png")),
    ]);
    let controller = DesignSubmissionController::new(service);

    for prompt in ["A", "B", "C"] {
        controller.submit(prompt).await.expect("design");
    }

    let prompts: Vec<String> = controller
        .designs()
        .iter()
        .map(|d| d.prompt().to_string())
        .collect();
    assert_eq!(prompts, vec!["C", "B", "A"]);
    assert_eq!(controller.designs(), controller.designs());
}

#[tokio::test]
async fn service_error_leaves_collection_unchanged() {
    let service = ScriptedDesignService::new([
        Ok(GenerateDesignResponse::image("https://img/first.png")),
        Ok(GenerateDesignResponse::failed("Rate limit exceeded, try later")),
    ]);
    let controller = DesignSubmissionController::new(service);
    controller.submit("first").await.expect("design");
    let before = controller.designs();
    let mut events = controller.subscribe_events();
    controller.set_prompt_text("second");

    let err = controller.submit_current().await.expect_err("service error");

    assert_eq!(
        err,
        SubmissionError::Generation("Rate limit exceeded, try later".to_string())
    );
    assert_eq!(controller.designs(), before);
    assert_eq!(controller.prompt_text(), "second");
    assert!(!controller.is_submitting());
    let notices = drain_notices(&mut events);
    assert_eq!(notices.len(), 1);
    assert!(notices[0].description.contains("Rate limit exceeded"));
}

#[tokio::test]
async fn missing_or_blank_image_is_a_generation_error() {
    let service = ScriptedDesignService::new([
        Ok(GenerateDesignResponse::default()),
        Ok(GenerateDesignResponse::image("")),
        Ok(GenerateDesignResponse::image("   ")),
    ]);
    let controller = DesignSubmissionController::new(service);

    for _ in 0..3 {
        let err = controller.submit("coat").await.expect_err("no image");
        assert_eq!(err.code(), ErrorCode::Generation);
        assert_eq!(err.to_string(), shared::error::NO_IMAGE_MESSAGE);
    }
    assert_eq!(controller.design_count(), 0);
}

#[tokio::test]
async fn image_reference_is_stored_exactly_as_returned() {
    let service = ScriptedDesignService::new([
        Ok(GenerateDesignResponse::image(" https://img/x.png ")),
        Ok(GenerateDesignResponse::image("/storage/v1/x.png")),
    ]);
    let controller = DesignSubmissionController::new(service);

    let padded = controller.submit("coat").await.expect("design");
    assert_eq!(padded.image_reference(), " https://img/x.png ");

    let relative = controller.submit("cape").await.expect("design");
    assert_eq!(relative.image_reference(), "/storage/v1/x.png");
    assert_eq!(controller.designs(), vec![relative, padded]);
}

#[tokio::test]
async fn inline_data_images_are_accepted() {
    let service = ScriptedDesignService::new([Ok(GenerateDesignResponse::image(
        "data:image/png;base64,iVBORw0KGgo=",
    ))]);
    let controller = DesignSubmissionController::new(service);

    let record = controller.submit("coat").await.expect("design");
    assert!(record.image_reference().starts_with("data:image/png"));
}

#[tokio::test]
async fn transport_failure_without_message_uses_generic_notice() {
    let service = ScriptedDesignService::new([Err(String::new())]);
    let controller = DesignSubmissionController::new(service);
    let mut events = controller.subscribe_events();

    let err = controller.submit("jacket").await.expect_err("transport");

    assert_eq!(err, SubmissionError::Transport(RETRY_MESSAGE.to_string()));
    assert_eq!(controller.design_count(), 0);
    let notices = drain_notices(&mut events);
    assert_eq!(notices.len(), 1);
    assert!(!notices[0].description.is_empty());
}

#[tokio::test]
async fn transport_failure_message_is_surfaced() {
    let service = ScriptedDesignService::new([Err("connection refused".to_string())]);
    let controller = DesignSubmissionController::new(service);

    let err = controller.submit("jacket").await.expect_err("transport");
    assert_eq!(err, SubmissionError::Transport("connection refused".to_string()));
    assert!(!controller.is_submitting());
}

#[tokio::test]
async fn in_flight_flag_spans_exactly_the_remote_call() {
    let (service, started, release) = GatedDesignService::new();
    let controller = DesignSubmissionController::new(service.clone());
    assert!(!controller.is_submitting());

    let task = tokio::spawn({
        let controller = Arc::clone(&controller);
        async move { controller.submit("gown").await }
    });

    started.await.expect("service called");
    assert!(controller.is_submitting());

    release
        .send(GenerateDesignResponse::image("https://img/gown.png"))
        .expect("release");
    let record = task.await.expect("join").expect("design");

    assert!(!controller.is_submitting());
    assert_eq!(controller.designs(), vec![record]);
}

#[tokio::test]
async fn concurrent_submit_is_rejected_while_one_is_in_flight() {
    let (service, started, release) = GatedDesignService::new();
    let controller = DesignSubmissionController::new(service.clone());

    let first = tokio::spawn({
        let controller = Arc::clone(&controller);
        async move { controller.submit("first").await }
    });
    started.await.expect("service called");

    controller.set_prompt_text("edited while waiting");
    let err = controller.submit("second").await.expect_err("busy");
    assert_eq!(err, SubmissionError::InFlight);
    assert_eq!(err.code(), ErrorCode::Busy);
    assert!(controller.is_submitting());
    assert_eq!(*service.calls.lock().await, 1);

    release
        .send(GenerateDesignResponse::image("https://img/first.png"))
        .expect("release");
    let record = first.await.expect("join").expect("design");

    assert_eq!(record.prompt(), "first");
    assert_eq!(controller.design_count(), 1);
    assert!(!controller.is_submitting());
    assert_eq!(controller.prompt_text(), "");
}

#[tokio::test]
async fn examples_fill_the_prompt_unless_busy() {
    let (service, started, release) = GatedDesignService::new();
    let controller = DesignSubmissionController::new(service);

    assert!(controller.fill_example(1).expect("known example"));
    assert_eq!(controller.prompt_text(), EXAMPLE_PROMPTS[1]);
    assert!(matches!(
        controller.fill_example(EXAMPLE_PROMPTS.len()),
        Err(StudioError::UnknownExample { .. })
    ));

    let task = tokio::spawn({
        let controller = Arc::clone(&controller);
        async move { controller.submit_current().await }
    });
    started.await.expect("service called");
    assert!(!controller.fill_example(2).expect("known example"));
    assert_eq!(controller.prompt_text(), EXAMPLE_PROMPTS[1]);

    release
        .send(GenerateDesignResponse::image("https://img/jacket.png"))
        .expect("release");
    let record = task.await.expect("join").expect("design");
    assert_eq!(record.prompt(), EXAMPLE_PROMPTS[1]);
    assert_eq!(controller.design(record.id()), Some(record));
}
