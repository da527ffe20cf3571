use std::time::{Duration, Instant};

use crate::api::AgentApi;
use crate::error::{AgentError, ApiError};
use crate::models::{
    AskResponse, ConversationEntry, DocumentFile, ExampleCatalog, GraphInfo, HealthStatus, UploadReceipt,
    UploadState,
};
use crate::transcript::Transcript;

pub const DEFAULT_CATEGORY: &str = "experience";

/// Everything the agent window shows: upload status, the question being typed,
/// and the answered questions so far.
///
/// Network calls are split into `begin_*` / `finish_*` so a UI can release its
/// borrow of the state while the request is in flight. `upload_document` and
/// `submit_question` run both halves for callers that own the state outright.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conversation {
    pub upload: UploadState,
    pub draft: String,
    pub asking: bool,
    pub transcript: Transcript,
    pub examples: ExampleCatalog,
    pub selected_category: String,
    pub graph_info: Option<GraphInfo>,
    pub health: Option<HealthStatus>,
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            selected_category: DEFAULT_CATEGORY.to_string(),
            ..Default::default()
        }
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn can_ask(&self) -> bool {
        !self.asking && !self.draft.trim().is_empty()
    }

    pub fn load_catalog(&mut self, catalog: ExampleCatalog) {
        if !catalog.contains(&self.selected_category) {
            if let Some(first) = catalog.names().next() {
                self.selected_category = first.to_string();
            }
        }
        self.examples = catalog;
    }

    pub fn load_graph_info(&mut self, info: GraphInfo) {
        self.graph_info = Some(info);
    }

    pub fn set_health(&mut self, health: HealthStatus) {
        self.health = Some(health);
    }

    pub fn select_category(&mut self, name: &str) {
        if self.examples.contains(name) {
            self.selected_category = name.to_string();
        }
    }

    pub fn selected_examples(&self) -> &[String] {
        self.examples.questions(&self.selected_category)
    }

    pub fn use_example(&mut self, question: &str) {
        if !self.asking {
            self.draft = question.to_string();
        }
    }

    /// Validates the selection and marks the upload as running.
    /// Returns the file to send, or `None` when there is nothing to do.
    pub fn begin_upload(&mut self, file: Option<DocumentFile>) -> Result<Option<DocumentFile>, AgentError> {
        let Some(file) = file else {
            return Ok(None);
        };
        if self.upload.uploading {
            tracing::warn!("Upload blocked: another upload is in progress.");
            return Ok(None);
        }
        if !file.is_pdf() {
            return Err(AgentError::UnsupportedFile(file.name));
        }
        self.upload.uploading = true;
        Ok(Some(file))
    }

    pub fn finish_upload(
        &mut self,
        file_name: String,
        result: Result<UploadReceipt, ApiError>,
    ) -> Result<UploadReceipt, AgentError> {
        self.upload.uploading = false;
        match result {
            Ok(receipt) => {
                tracing::info!(
                    file = %file_name,
                    pages = ?receipt.pages,
                    text_length = ?receipt.text_length,
                    "Document processed"
                );
                self.upload.file_name = Some(file_name);
                self.upload.uploaded = true;
                Ok(receipt)
            }
            Err(e) => {
                tracing::debug!(file = %file_name, "Upload failed: {e}");
                Err(AgentError::Upload(e))
            }
        }
    }

    pub async fn upload_document<A>(
        &mut self,
        api: &A,
        file: Option<DocumentFile>,
    ) -> Result<Option<UploadReceipt>, AgentError>
    where
        A: AgentApi + ?Sized,
    {
        let Some(file) = self.begin_upload(file)? else {
            return Ok(None);
        };
        let result = api.upload(&file).await;
        self.finish_upload(file.name, result).map(Some)
    }

    /// Marks a question as in flight and returns the text to send.
    /// `None` for blank input or while another question is outstanding.
    pub fn begin_ask(&mut self) -> Option<String> {
        if self.asking {
            tracing::warn!("Question blocked: already waiting for an answer.");
            return None;
        }
        if self.draft.trim().is_empty() {
            return None;
        }
        self.asking = true;
        Some(self.draft.clone())
    }

    /// Records the outcome of a question. Only a successful answer touches the transcript,
    /// and only then is the draft cleared.
    pub fn finish_ask(
        &mut self,
        question: String,
        result: Result<AskResponse, ApiError>,
        elapsed: Duration,
    ) -> Result<&ConversationEntry, AgentError> {
        self.asking = false;
        match result {
            Ok(response) => {
                tracing::info!(
                    question_len = question.len(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    confidence = response.confidence,
                    "Answer received"
                );
                self.draft.clear();
                let entry = ConversationEntry::from_response(question, response, elapsed);
                Ok(self.transcript.push(entry))
            }
            Err(e) => {
                tracing::debug!(
                    question_len = question.len(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Question failed: {e}"
                );
                Err(AgentError::Ask(e))
            }
        }
    }

    pub async fn submit_question<A>(
        &mut self,
        api: &A,
        text: impl Into<String>,
    ) -> Result<Option<&ConversationEntry>, AgentError>
    where
        A: AgentApi + ?Sized,
    {
        self.set_draft(text);
        let Some(question) = self.begin_ask() else {
            return Ok(None);
        };
        let (result, elapsed) = timed_ask(api, &question).await;
        self.finish_ask(question, result, elapsed).map(Some)
    }
}

/// Sends one question and measures the wall-clock time until the reply.
pub async fn timed_ask<A>(api: &A, question: &str) -> (Result<AskResponse, ApiError>, Duration)
where
    A: AgentApi + ?Sized,
{
    let started = Instant::now();
    let result = api.ask(question).await;
    (result, started.elapsed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Scripted backend: answers are popped in order; an empty queue means failure.
    #[derive(Default)]
    struct FakeApi {
        answers: Mutex<VecDeque<Result<AskResponse, u16>>>,
        upload_status: Option<u16>,
        latency: Option<Duration>,
        asked: Mutex<Vec<String>>,
        uploads: Mutex<Vec<String>>,
    }

    impl FakeApi {
        fn answering(answers: Vec<Result<AskResponse, u16>>) -> Self {
            Self {
                answers: Mutex::new(answers.into()),
                ..Default::default()
            }
        }
    }

    fn answer(text: &str) -> AskResponse {
        AskResponse {
            question: None,
            answer: text.to_string(),
            confidence: 0.82,
            attempts: 1,
            workflow_path: vec!["classifier".into(), "answer_generator".into()],
            question_type: "experience".into(),
            tools_used: vec!["extract_experience".into()],
            timestamp: "2024-05-03T14:07:09".into(),
        }
    }

    #[async_trait]
    impl AgentApi for FakeApi {
        async fn upload(&self, file: &DocumentFile) -> Result<UploadReceipt, ApiError> {
            self.uploads.lock().unwrap().push(file.name.clone());
            match self.upload_status {
                None => Ok(UploadReceipt {
                    status: Some("success".into()),
                    filename: Some(file.name.clone()),
                    text_length: Some(1200),
                    pages: Some(2),
                }),
                Some(status) => Err(ApiError::Status {
                    status,
                    message: "Erro no processamento".into(),
                }),
            }
        }

        async fn ask(&self, question: &str) -> Result<AskResponse, ApiError> {
            self.asked.lock().unwrap().push(question.to_string());
            if let Some(latency) = self.latency {
                tokio::time::sleep(latency).await;
            }
            match self.answers.lock().unwrap().pop_front() {
                Some(Ok(response)) => Ok(response),
                Some(Err(status)) => Err(ApiError::Status {
                    status,
                    message: "Erro na consulta".into(),
                }),
                None => Err(ApiError::InvalidRequest("no scripted answer".into())),
            }
        }

        async fn graph_info(&self) -> Result<GraphInfo, ApiError> {
            Ok(GraphInfo::default())
        }

        async fn examples(&self) -> Result<ExampleCatalog, ApiError> {
            Ok(ExampleCatalog::default())
        }

        async fn health(&self) -> Result<HealthStatus, ApiError> {
            Ok(HealthStatus::default())
        }
    }

    fn pdf(name: &str) -> Option<DocumentFile> {
        Some(DocumentFile::new(name, b"%PDF-1.4".to_vec()))
    }

    #[tokio::test]
    async fn test_upload_success_marks_uploaded() {
        let api = FakeApi::default();
        let mut conversation = Conversation::new();

        let receipt = conversation.upload_document(&api, pdf("cv.pdf")).await.unwrap();

        assert_eq!(receipt.unwrap().pages, Some(2));
        assert!(conversation.upload.uploaded);
        assert!(!conversation.upload.uploading);
        assert_eq!(conversation.upload.file_name.as_deref(), Some("cv.pdf"));
    }

    #[tokio::test]
    async fn test_upload_without_file_is_noop() {
        let api = FakeApi::default();
        let mut conversation = Conversation::new();

        let receipt = conversation.upload_document(&api, None).await.unwrap();

        assert!(receipt.is_none());
        assert!(api.uploads.lock().unwrap().is_empty());
        assert_eq!(conversation.upload, UploadState::default());
    }

    #[tokio::test]
    async fn test_upload_rejects_non_pdf_without_calling_backend() {
        let api = FakeApi::default();
        let mut conversation = Conversation::new();

        let err = conversation
            .upload_document(&api, Some(DocumentFile::new("cv.docx", vec![0])))
            .await
            .unwrap_err();

        assert!(matches!(err, AgentError::UnsupportedFile(name) if name == "cv.docx"));
        assert!(api.uploads.lock().unwrap().is_empty());
        assert!(!conversation.upload.uploading);
    }

    #[tokio::test]
    async fn test_failed_upload_keeps_previous_state() {
        let mut conversation = Conversation::new();
        conversation
            .upload_document(&FakeApi::default(), pdf("first.pdf"))
            .await
            .unwrap();

        let failing = FakeApi {
            upload_status: Some(500),
            ..Default::default()
        };
        let err = conversation.upload_document(&failing, pdf("second.pdf")).await.unwrap_err();

        assert!(matches!(err, AgentError::Upload(ApiError::Status { status: 500, .. })));
        assert!(err.to_string().contains("Erro no processamento"));
        assert!(conversation.upload.uploaded);
        assert!(!conversation.upload.uploading);
        assert_eq!(conversation.upload.file_name.as_deref(), Some("first.pdf"));
    }

    #[tokio::test]
    async fn test_split_upload_releases_flag_on_failure() {
        let failing = FakeApi {
            upload_status: Some(400),
            ..Default::default()
        };
        let mut conversation = Conversation::new();

        let file = conversation.begin_upload(pdf("cv.pdf")).unwrap().unwrap();
        assert!(conversation.upload.uploading);
        let result = failing.upload(&file).await;
        let err = conversation.finish_upload(file.name, result).unwrap_err();

        assert!(matches!(err, AgentError::Upload(ApiError::Status { status: 400, .. })));
        assert!(!conversation.upload.uploading);
        assert!(!conversation.upload.uploaded);
        assert!(conversation.begin_upload(pdf("cv.pdf")).unwrap().is_some());
    }

    #[test]
    fn test_second_upload_blocked_while_running() {
        let mut conversation = Conversation::new();
        let first = conversation.begin_upload(pdf("a.pdf")).unwrap();
        assert!(first.is_some());
        assert!(conversation.upload.uploading);

        let second = conversation.begin_upload(pdf("b.pdf")).unwrap();
        assert!(second.is_none());
    }

    #[tokio::test]
    async fn test_n_successful_answers_grow_transcript_by_n() {
        let api = FakeApi::answering(vec![Ok(answer("a1")), Ok(answer("a2")), Ok(answer("a3"))]);
        let mut conversation = Conversation::new();

        for q in ["q1", "q2", "q3"] {
            let entry = conversation.submit_question(&api, q).await.unwrap();
            assert_eq!(entry.unwrap().question, q);
        }

        assert_eq!(conversation.transcript.len(), 3);
        assert_eq!(conversation.transcript.latest().unwrap().answer, "a3");
        assert_eq!(conversation.transcript.newest_first().next().unwrap().question, "q3");
        assert!(conversation.draft.is_empty());
        assert!(!conversation.asking);
    }

    #[tokio::test]
    async fn test_failed_ask_keeps_transcript_and_draft() {
        let api = FakeApi::answering(vec![Ok(answer("first")), Err(500)]);
        let mut conversation = Conversation::new();
        conversation.submit_question(&api, "q1").await.unwrap();

        let err = conversation
            .submit_question(&api, "Quais frameworks conhece?")
            .await
            .unwrap_err();

        assert!(matches!(err, AgentError::Ask(_)));
        assert_eq!(conversation.transcript.len(), 1);
        assert_eq!(conversation.draft, "Quais frameworks conhece?");
        assert!(!conversation.asking);
    }

    #[tokio::test]
    async fn test_blank_question_is_noop() {
        let api = FakeApi::answering(vec![Ok(answer("unused"))]);
        let mut conversation = Conversation::new();

        let entry = conversation.submit_question(&api, "   \n").await.unwrap();

        assert!(entry.is_none());
        assert!(api.asked.lock().unwrap().is_empty());
        assert!(conversation.transcript.is_empty());
    }

    #[test]
    fn test_reentrant_ask_is_blocked() {
        let mut conversation = Conversation::new();
        conversation.set_draft("first");
        assert_eq!(conversation.begin_ask().as_deref(), Some("first"));
        assert!(!conversation.can_ask());

        conversation.set_draft("second");
        assert!(conversation.begin_ask().is_none());
    }

    #[test]
    fn test_finish_ask_records_measured_time() {
        let mut conversation = Conversation::new();
        conversation.set_draft("q");
        let question = conversation.begin_ask().unwrap();

        let entry = conversation
            .finish_ask(question, Ok(answer("a")), Duration::from_millis(3250))
            .unwrap();

        assert_eq!(entry.processing_time, Duration::from_millis(3250));
        assert_eq!(entry.tools_used, vec!["extract_experience"]);
    }

    #[tokio::test]
    async fn test_split_ask_records_backend_latency() {
        let api = FakeApi {
            latency: Some(Duration::from_millis(30)),
            ..FakeApi::answering(vec![Ok(answer("a")), Err(502)])
        };
        let mut conversation = Conversation::new();

        conversation.set_draft("Onde trabalhou?");
        let question = conversation.begin_ask().unwrap();
        let (result, elapsed) = timed_ask(&api, &question).await;
        let entry = conversation.finish_ask(question, result, elapsed).unwrap();

        assert!(entry.processing_time >= Duration::from_millis(30));
        assert_eq!(entry.processing_time, elapsed);
        assert!(!conversation.asking);

        conversation.set_draft("Quais linguagens?");
        let question = conversation.begin_ask().unwrap();
        let (result, elapsed) = timed_ask(&api, &question).await;
        assert!(elapsed >= Duration::from_millis(30));
        let err = conversation.finish_ask(question, result, elapsed).unwrap_err();

        assert!(matches!(err, AgentError::Ask(ApiError::Status { status: 502, .. })));
        assert_eq!(conversation.transcript.len(), 1);
        assert_eq!(conversation.draft, "Quais linguagens?");
    }

    #[test]
    fn test_catalog_selection_falls_back_to_first_category() {
        let mut conversation = Conversation::new();
        let catalog: ExampleCatalog =
            serde_json::from_str(r#"{"skills": ["Tem experiência com Python?"], "career": []}"#).unwrap();

        conversation.load_catalog(catalog);
        assert_eq!(conversation.selected_category, "skills");
        assert_eq!(conversation.selected_examples(), ["Tem experiência com Python?"]);

        conversation.select_category("unknown");
        assert_eq!(conversation.selected_category, "skills");
        conversation.select_category("career");
        assert!(conversation.selected_examples().is_empty());
    }

    #[test]
    fn test_default_category_kept_when_present() {
        let mut conversation = Conversation::new();
        let catalog: ExampleCatalog =
            serde_json::from_str(r#"{"skills": [], "experience": ["Onde trabalhou?"]}"#).unwrap();
        conversation.load_catalog(catalog);
        assert_eq!(conversation.selected_category, DEFAULT_CATEGORY);
    }

    #[test]
    fn test_example_fills_draft_unless_asking() {
        let mut conversation = Conversation::new();
        conversation.use_example("Onde estudou?");
        assert_eq!(conversation.draft, "Onde estudou?");

        conversation.begin_ask();
        conversation.use_example("Quais projetos desenvolveu?");
        assert_eq!(conversation.draft, "Onde estudou?");
    }
}
