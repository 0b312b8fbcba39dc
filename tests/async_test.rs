//! Tests for tokio based file embossing.
#![cfg(feature = "async")]

use embosser::{emboss_file_async, EmbossingAttributes, Error, Rectangle, TextEmbosser};

#[tokio::test]
async fn test_emboss_file_async() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.brf");
    std::fs::write(&path, b"AB\r\nCD").unwrap();

    let attributes = EmbossingAttributes::new().with_paper(Rectangle::LETTER);
    let output = emboss_file_async(&path, &TextEmbosser::default(), &attributes)
        .await
        .unwrap();
    assert_eq!(output, b"AB\r\nCD\x0c");
}

#[tokio::test]
async fn test_emboss_missing_file_async() {
    let result = emboss_file_async(
        "missing.pef",
        &TextEmbosser::default(),
        &EmbossingAttributes::new(),
    )
    .await;
    assert!(matches!(result, Err(Error::Io(_))));
}
