//! Document translation workflow against the mock server.

use crate::mock_server::{MockServerFixture, AUTH_KEY};
use deepl_client::{
    DocumentHandle, DocumentState, DocumentTranslationOptions, Error, ErrorKind, Formality,
};
use mockito::Matcher;

const UPLOAD_BODY: &str = r#"{"document_id":"DOC1","document_key":"KEY1"}"#;
const DONE_BODY: &str =
    r#"{"document_id":"DOC1","status":"done","billed_characters":12}"#;

#[tokio::test]
async fn test_translate_document_end_to_end() {
    let mut fixture = MockServerFixture::new().await;
    let upload = fixture
        .server
        .mock("POST", "/v2/document")
        .match_header("authorization", format!("DeepL-Auth-Key {}", AUTH_KEY).as_str())
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"filename="notes.txt""#.into()),
            Matcher::Regex("Hello, world!".into()),
            Matcher::Regex(r#"name="target_lang"\r\n\r\nde"#.into()),
            Matcher::Regex(r#"name="formality"\r\n\r\nless"#.into()),
        ]))
        .with_status(200)
        .with_body(UPLOAD_BODY)
        .create_async()
        .await;
    let status = fixture
        .server
        .mock("POST", "/v2/document/DOC1")
        .match_body(Matcher::UrlEncoded("document_key".into(), "KEY1".into()))
        .with_status(200)
        .with_body(DONE_BODY)
        .create_async()
        .await;
    let result = fixture
        .server
        .mock("POST", "/v2/document/DOC1/result")
        .match_body(Matcher::UrlEncoded("document_key".into(), "KEY1".into()))
        .with_status(200)
        .with_body("Hallo, Welt!")
        .create_async()
        .await;

    let translator = fixture.translator();
    let mut sink = Vec::new();
    let done = translator
        .translate_document(
            "Hello, world!",
            "notes.txt",
            &mut sink,
            None,
            "DE",
            &DocumentTranslationOptions::new().formality(Formality::Less),
        )
        .await
        .unwrap();

    assert_eq!(done.status, DocumentState::Done);
    assert_eq!(done.billed_characters, Some(12));
    assert_eq!(sink, b"Hallo, Welt!");
    upload.assert_async().await;
    status.assert_async().await;
    result.assert_async().await;
}

#[tokio::test]
async fn test_rebuilt_handle_is_enough_to_resume() {
    let mut fixture = MockServerFixture::new().await;
    let _status = fixture
        .server
        .mock("POST", "/v2/document/DOC1")
        .match_body(Matcher::UrlEncoded("document_key".into(), "KEY1".into()))
        .with_status(200)
        .with_body(DONE_BODY)
        .create_async()
        .await;
    let download = fixture
        .server
        .mock("POST", "/v2/document/DOC1/result")
        .with_status(200)
        .with_body("translated")
        .expect(2)
        .create_async()
        .await;

    // As if persisted by an earlier process.
    let stored = serde_json::to_string(&DocumentHandle::new("DOC1", "KEY1")).unwrap();
    let handle: DocumentHandle = serde_json::from_str(&stored).unwrap();

    let translator = fixture.translator();
    let status = translator.document_status(&handle).await.unwrap();
    assert!(status.done());

    // Downloading twice is allowed.
    for _ in 0..2 {
        let mut sink = Vec::new();
        let written = translator.download_document(&handle, &mut sink).await.unwrap();
        assert_eq!(written, 10);
        assert_eq!(sink, b"translated");
    }
    download.assert_async().await;
}

#[tokio::test]
async fn test_server_side_failure_keeps_handle() {
    let mut fixture = MockServerFixture::new().await;
    fixture.mock_json("POST", "/v2/document", 200, UPLOAD_BODY).await;
    fixture
        .mock_json(
            "POST",
            "/v2/document/DOC1",
            200,
            r#"{"document_id":"DOC1","status":"error","error_message":"Unsupported file format"}"#,
        )
        .await;
    let download = fixture
        .server
        .mock("POST", "/v2/document/DOC1/result")
        .expect(0)
        .create_async()
        .await;

    let mut sink = Vec::new();
    let err = fixture
        .translator()
        .translate_document(
            "content",
            "file.xyz",
            &mut sink,
            Some("en"),
            "de",
            &DocumentTranslationOptions::new(),
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DocumentTranslation);
    assert_eq!(err.root_kind(), ErrorKind::DocumentFailed);
    assert_eq!(err.document_handle(), Some(&DocumentHandle::new("DOC1", "KEY1")));
    assert!(err.to_string().contains("Unsupported file format"));
    download.assert_async().await;
}

#[tokio::test]
async fn test_failed_upload_has_no_handle() {
    let mut fixture = MockServerFixture::new().await;
    fixture
        .mock_json(
            "POST",
            "/v2/document",
            400,
            r#"{"message":"Invalid file data."}"#,
        )
        .await;

    let mut sink = Vec::new();
    let err = fixture
        .translator()
        .translate_document(
            "x",
            "a.txt",
            &mut sink,
            None,
            "de",
            &DocumentTranslationOptions::new(),
        )
        .await
        .unwrap_err();

    assert_eq!(err.root_kind(), ErrorKind::BadRequest);
    assert!(err.document_handle().is_none());
    match err {
        Error::DocumentTranslation { source, .. } => {
            assert!(source.to_string().contains("Invalid file data."))
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_arguments_never_reach_the_server() {
    let mut fixture = MockServerFixture::new().await;
    let upload = fixture
        .server
        .mock("POST", "/v2/document")
        .expect(0)
        .create_async()
        .await;

    let mut sink = Vec::new();
    let err = fixture
        .translator()
        .translate_document(
            "x",
            "a.txt",
            &mut sink,
            None,
            "de",
            &DocumentTranslationOptions::new().glossary_id("g1"),
        )
        .await
        .unwrap_err();

    assert_eq!(err.root_kind(), ErrorKind::Validation);
    upload.assert_async().await;
}

#[tokio::test]
async fn test_translate_document_file() {
    let mut fixture = MockServerFixture::new().await;
    fixture.mock_json("POST", "/v2/document", 200, UPLOAD_BODY).await;
    fixture.mock_json("POST", "/v2/document/DOC1", 200, DONE_BODY).await;
    fixture
        .server
        .mock("POST", "/v2/document/DOC1/result")
        .with_status(200)
        .with_body("Bonjour")
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("hello.txt");
    let output = dir.path().join("hello.fr.txt");
    std::fs::write(&input, "Hello").unwrap();

    let status = fixture
        .translator()
        .translate_document_file(&input, &output, None, "fr", &DocumentTranslationOptions::new())
        .await
        .unwrap();

    assert!(status.done());
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "Bonjour");
}

#[tokio::test]
async fn test_existing_output_file_is_left_alone() {
    let mut fixture = MockServerFixture::new().await;
    let upload = fixture
        .server
        .mock("POST", "/v2/document")
        .expect(0)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.txt");
    let output = dir.path().join("out.txt");
    std::fs::write(&input, "Hello").unwrap();
    std::fs::write(&output, "keep me").unwrap();

    let err = fixture
        .translator()
        .translate_document_file(&input, &output, None, "de", &DocumentTranslationOptions::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Io);
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "keep me");
    upload.assert_async().await;
}

#[tokio::test]
async fn test_partial_output_removed_on_failure() {
    let mut fixture = MockServerFixture::new().await;
    fixture.mock_json("POST", "/v2/document", 200, UPLOAD_BODY).await;
    fixture.mock_json("POST", "/v2/document/DOC1", 200, DONE_BODY).await;
    fixture
        .mock_json("POST", "/v2/document/DOC1/result", 503, "")
        .await;

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.txt");
    let output = dir.path().join("out.txt");
    std::fs::write(&input, "Hello").unwrap();

    let translator = fixture.translator();
    let err = translator
        .translate_document_file(&input, &output, None, "de", &DocumentTranslationOptions::new())
        .await
        .unwrap_err();
    assert_eq!(err.root_kind(), ErrorKind::DocumentNotReady);
    assert!(!output.exists());

    let err = translator
        .download_document_to_file(&DocumentHandle::new("DOC1", "KEY1"), &output)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DocumentNotReady);
    assert!(!output.exists());
}
