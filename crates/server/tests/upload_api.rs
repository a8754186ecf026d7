use std::path::Path;
use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::Value;

use voxbrief_common::AppConfig;
use voxbrief_llm::StubSummarizer;
use voxbrief_server::{configure, AppState};
use voxbrief_stt::StubTranscriber;

const BOUNDARY: &str = "----voxbrief-test-boundary";

struct TestApp {
    tmp: tempfile::TempDir,
    transcriber: Arc<StubTranscriber>,
    summarizer: Arc<StubSummarizer>,
    config: AppConfig,
}

impl TestApp {
    fn new(transcriber: StubTranscriber, summarizer: StubSummarizer) -> Self {
        let tmp = tempfile::tempdir().unwrap();
        let config = AppConfig {
            upload_dir: tmp.path().join("uploads"),
            log_dir: tmp.path().join("logs"),
            ..AppConfig::default()
        };
        Self {
            tmp,
            transcriber: Arc::new(transcriber),
            summarizer: Arc::new(summarizer),
            config,
        }
    }

    fn state(&self) -> AppState {
        AppState::new(
            self.config.clone(),
            self.transcriber.clone(),
            self.summarizer.clone(),
        )
        .unwrap()
    }

    fn upload_dir(&self) -> &Path {
        &self.config.upload_dir
    }

    fn upload_dir_is_empty(&self) -> bool {
        std::fs::read_dir(self.upload_dir()).unwrap().next().is_none()
    }
}

/// Build a multipart body with a single file part
fn multipart_body(field: &str, filename: Option<&str>, data: &[u8]) -> Vec<u8> {
    let disposition = match filename {
        Some(name) => format!("form-data; name=\"{field}\"; filename=\"{name}\""),
        None => format!("form-data; name=\"{field}\""),
    };

    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(format!("Content-Disposition: {disposition}\r\n").as_bytes());
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(body: Vec<u8>) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/upload")
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(body)
}

async fn send(app: &TestApp, body: Vec<u8>) -> (StatusCode, Value) {
    let service = test::init_service(
        App::new()
            .app_data(web::Data::new(app.state()))
            .configure(configure),
    )
    .await;

    let resp = test::call_service(&service, upload_request(body).to_request()).await;
    let status = resp.status();
    let json: Value = test::read_body_json(resp).await;
    (status, json)
}

#[actix_web::test]
async fn upload_voice_mp3_returns_transcript_and_summary() {
    let app = TestApp::new(
        StubTranscriber::returning("Hi, call me back."),
        StubSummarizer::returning("Caller requests callback."),
    );

    let (status, json) = send(&app, multipart_body("audio_file", Some("voice.mp3"), b"ID3")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        serde_json::json!({
            "success": true,
            "transcript": "Hi, call me back.",
            "summary": "Caller requests callback."
        })
    );

    let used_path = app.transcriber.last_path().unwrap();
    assert!(used_path.starts_with(app.upload_dir()));
    assert!(!used_path.exists());
    assert!(app.upload_dir_is_empty());
}

#[actix_web::test]
async fn configured_transcription_options_reach_the_transcriber() {
    let mut app = TestApp::new(
        StubTranscriber::returning("Hi, call me back."),
        StubSummarizer::returning("Caller requests callback."),
    );
    app.config.transcription_language = Some("en".to_string());
    app.config.transcription_prompt = Some("Acme Corp".to_string());
    app.config.transcription_temperature = Some(0.0);

    let (status, _) = send(&app, multipart_body("audio_file", Some("voice.mp3"), b"ID3")).await;
    assert_eq!(status, StatusCode::OK);

    let options = app.transcriber.last_options().unwrap();
    assert_eq!(options.language.as_deref(), Some("en"));
    assert_eq!(options.prompt.as_deref(), Some("Acme Corp"));
    assert_eq!(options.temperature, Some(0.0));
}

#[actix_web::test]
async fn missing_audio_field_is_rejected() {
    let app = TestApp::new(StubTranscriber::returning("x"), StubSummarizer::returning("y"));

    let (status, json) = send(&app, multipart_body("attachment", Some("voice.mp3"), b"ID3")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "No file uploaded");
    assert_eq!(app.transcriber.calls(), 0);
}

#[actix_web::test]
async fn non_multipart_post_counts_as_missing_file() {
    let app = TestApp::new(StubTranscriber::returning("x"), StubSummarizer::returning("y"));
    let service = test::init_service(
        App::new()
            .app_data(web::Data::new(app.state()))
            .configure(configure),
    )
    .await;

    let requests = [
        test::TestRequest::post()
            .uri("/upload")
            .insert_header(("content-type", "application/x-www-form-urlencoded"))
            .set_payload("foo=bar"),
        test::TestRequest::post().uri("/upload"),
        test::TestRequest::post()
            .uri("/upload")
            .insert_header((
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )),
    ];

    for req in requests {
        let resp = test::call_service(&service, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let json: Value = test::read_body_json(resp).await;
        assert_eq!(json["error"], "No file uploaded");
    }
    assert_eq!(app.transcriber.calls(), 0);
    assert!(app.upload_dir_is_empty());
}

#[actix_web::test]
async fn empty_filename_is_rejected() {
    let app = TestApp::new(StubTranscriber::returning("x"), StubSummarizer::returning("y"));

    let (status, json) = send(&app, multipart_body("audio_file", Some(""), b"")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "No file selected");
}

#[actix_web::test]
async fn unsupported_extensions_are_rejected_before_any_remote_call() {
    for name in ["voice", "notes.txt", "movie.mp4", "voice.mp3.exe"] {
        let app = TestApp::new(StubTranscriber::returning("x"), StubSummarizer::returning("y"));

        let (status, json) = send(&app, multipart_body("audio_file", Some(name), b"data")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{name}");
        assert_eq!(json["error"], "Invalid file type. Please upload an audio file.");
        assert_eq!(app.transcriber.calls(), 0);
        assert_eq!(app.summarizer.calls(), 0);
        assert!(app.upload_dir_is_empty());
    }
}

#[actix_web::test]
async fn blank_transcript_is_a_client_error() {
    let app = TestApp::new(StubTranscriber::returning("   \n"), StubSummarizer::returning("y"));

    let (status, json) = send(&app, multipart_body("audio_file", Some("silence.wav"), b"RIFF")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["error"],
        "Could not transcribe audio. Please ensure the audio file contains clear speech."
    );
    assert_eq!(app.summarizer.calls(), 0);
    assert!(app.upload_dir_is_empty());
}

#[actix_web::test]
async fn transcription_failure_returns_500_without_summarizing() {
    let app = TestApp::new(
        StubTranscriber::failing("status 401: invalid api key"),
        StubSummarizer::returning("y"),
    );

    let (status, json) = send(&app, multipart_body("audio_file", Some("voice.mp3"), b"ID3")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error = json["error"].as_str().unwrap();
    assert!(error.starts_with("Failed to transcribe audio:"));
    assert!(error.contains("invalid api key"));
    assert!(json.get("success").is_none());
    assert_eq!(app.summarizer.calls(), 0);
    assert!(app.upload_dir_is_empty());
}

#[actix_web::test]
async fn summarization_failure_returns_500_and_removes_file() {
    let app = TestApp::new(
        StubTranscriber::returning("Hi, call me back."),
        StubSummarizer::failing("HTTP 503: overloaded"),
    );

    let (status, json) = send(&app, multipart_body("audio_file", Some("voice.flac"), b"fLaC")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("Failed to summarize text:"));
    assert!(!app.transcriber.last_path().unwrap().exists());
    assert!(app.upload_dir_is_empty());
}

#[actix_web::test]
async fn oversized_upload_is_rejected_before_storage() {
    let mut app = TestApp::new(StubTranscriber::returning("x"), StubSummarizer::returning("y"));
    app.config.max_upload_mb = 1;

    let data = vec![0u8; 1024 * 1024 + 1];
    let (status, json) = send(&app, multipart_body("audio_file", Some("voice.wav"), &data)).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(json["error"], "File too large. Maximum upload size is 1 MB.");
    assert_eq!(app.transcriber.calls(), 0);
    assert!(app.upload_dir_is_empty());
}

#[actix_web::test]
async fn storage_failure_is_reported_as_500() {
    let app = TestApp::new(StubTranscriber::returning("x"), StubSummarizer::returning("y"));
    let state = app.state();

    // Replace the upload directory with a plain file so writes fail
    std::fs::remove_dir(app.upload_dir()).unwrap();
    std::fs::write(app.upload_dir(), b"not a directory").unwrap();

    let service = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure),
    )
    .await;
    let req = upload_request(multipart_body("audio_file", Some("voice.mp3"), b"ID3")).to_request();
    let resp = test::call_service(&service, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = test::read_body_json(resp).await;
    assert!(json["error"].as_str().is_some_and(|e| !e.is_empty()));
    assert_eq!(app.transcriber.calls(), 0);
    assert!(app.tmp.path().join("uploads").is_file());
}

#[actix_web::test]
async fn health_is_always_healthy() {
    let app = TestApp::new(StubTranscriber::failing("down"), StubSummarizer::failing("down"));
    let service = test::init_service(
        App::new()
            .app_data(web::Data::new(app.state()))
            .configure(configure),
    )
    .await;

    let resp = test::call_service(&service, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json: Value = test::read_body_json(resp).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["message"], "Voicemail Summarizer is running");
}

#[actix_web::test]
async fn index_serves_upload_page() {
    let app = TestApp::new(StubTranscriber::returning("x"), StubSummarizer::returning("y"));
    let service = test::init_service(
        App::new()
            .app_data(web::Data::new(app.state()))
            .configure(configure),
    )
    .await;

    let resp = test::call_service(&service, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let html = std::str::from_utf8(&body).unwrap();
    assert!(html.contains("name=\"audio_file\""));
}
