//! Remote runs must leave no temporary checkout behind, whichever stage fails

mod support;

use readmegen::{
    BackendError, BuildError, BuildRequest, DetectionError, MockLLMClient, MockResponse, RepoSpec,
    Source,
};
use std::fs;
use std::sync::Arc;
use support::{orchestrator, FixtureFetcher};
use tempfile::TempDir;

const REPO_FILES: &[(&str, &str)] = &[
    ("main.py", "print('hello')"),
    ("requirements.txt", "requests\n"),
    ("LICENSE", "MIT License\n\nCopyright (c) octo"),
];

fn remote(spec: &str) -> Source {
    Source::Remote(RepoSpec::parse(spec).unwrap())
}

fn backend_down() -> MockResponse {
    MockResponse::error(BackendError::NetworkError {
        message: "connection refused".to_string(),
    })
}

#[tokio::test]
async fn test_success_removes_checkout() {
    let out_dir = TempDir::new().unwrap();
    let out = out_dir.path().join("README.md");
    let fetcher = Arc::new(FixtureFetcher::new(REPO_FILES));
    let mock = Arc::new(MockLLMClient::new().with_fallback(r#"{"tagline": "Says hello"}"#));

    orchestrator(mock, fetcher.clone())
        .build_document(&BuildRequest::new(remote("octo/widgets@main"), &out))
        .await
        .unwrap();

    let dest = fetcher.dest().unwrap();
    assert!(dest
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("readmegen_repo_"));
    assert!(!dest.exists());

    let readme = fs::read_to_string(&out).unwrap();
    assert!(readme.starts_with("# widgets\n"));
    assert!(readme.contains("MIT"));
    assert!(readme.contains("- Python"));
}

#[tokio::test]
async fn test_fetch_failure_removes_checkout() {
    let out_dir = TempDir::new().unwrap();
    let fetcher = Arc::new(FixtureFetcher::failing(REPO_FILES));
    let mock = Arc::new(MockLLMClient::new());

    let err = orchestrator(mock.clone(), fetcher.clone())
        .build_document(&BuildRequest::new(
            remote("octo/widgets"),
            out_dir.path().join("README.md"),
        ))
        .await
        .unwrap_err();

    assert!(matches!(err, BuildError::Fetch(_)));
    assert!(!fetcher.dest().unwrap().exists());
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_file_summary_failure_removes_checkout() {
    let out_dir = TempDir::new().unwrap();
    let out = out_dir.path().join("README.md");
    let fetcher = Arc::new(FixtureFetcher::new(REPO_FILES));
    let mock = Arc::new(MockLLMClient::new());
    mock.add_response(backend_down());

    let err = orchestrator(mock, fetcher.clone())
        .build_document(&BuildRequest::new(remote("octo/widgets"), &out))
        .await
        .unwrap_err();

    assert!(matches!(err, BuildError::Backend(_)));
    assert!(!fetcher.dest().unwrap().exists());
    assert!(!out.exists());
}

#[tokio::test]
async fn test_purpose_failure_removes_checkout() {
    let out_dir = TempDir::new().unwrap();
    let out = out_dir.path().join("README.md");
    let fetcher = Arc::new(FixtureFetcher::new(REPO_FILES));
    let mock = Arc::new(MockLLMClient::new());
    mock.add_responses([
        MockResponse::text("License text."),
        MockResponse::text("Entry point."),
        MockResponse::text("Dependencies."),
        backend_down(),
    ]);

    let err = orchestrator(mock.clone(), fetcher.clone())
        .build_document(&BuildRequest::new(remote("octo/widgets"), &out))
        .await
        .unwrap_err();

    assert!(matches!(err, BuildError::Backend(_)));
    assert_eq!(mock.call_count(), 4);
    assert!(!fetcher.dest().unwrap().exists());
    assert!(!out.exists());
}

#[tokio::test]
async fn test_render_failure_removes_checkout() {
    let out_dir = TempDir::new().unwrap();
    let out = out_dir.path().join("missing").join("README.md");
    let fetcher = Arc::new(FixtureFetcher::new(REPO_FILES));
    let mock = Arc::new(MockLLMClient::new().with_fallback("{}"));

    let err = orchestrator(mock, fetcher.clone())
        .build_document(&BuildRequest::new(remote("octo/widgets"), &out))
        .await
        .unwrap_err();

    assert!(matches!(err, BuildError::Render(_)));
    assert!(!fetcher.dest().unwrap().exists());
}

/// `/proc/self/mem` passes the regular-file check but cannot be read from
/// offset 0, so license detection fails with an I/O error
#[cfg(target_os = "linux")]
#[tokio::test]
async fn test_detection_failure_removes_checkout() {
    let out_dir = TempDir::new().unwrap();
    let out = out_dir.path().join("README.md");
    let fetcher = Arc::new(
        FixtureFetcher::new(&[("main.py", "print('hello')")])
            .with_symlink("LICENSE", "/proc/self/mem"),
    );
    let mock = Arc::new(MockLLMClient::new().with_fallback("{}"));

    let err = orchestrator(mock.clone(), fetcher.clone())
        .build_document(&BuildRequest::new(remote("octo/widgets"), &out))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        BuildError::Detection(DetectionError::Io { ref path, .. }) if path.ends_with("LICENSE")
    ));
    assert_eq!(mock.call_count(), 2);
    assert!(!fetcher.dest().unwrap().exists());
    assert!(!out.exists());
}
