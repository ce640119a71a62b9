use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::api::{ClassifyError, SubmissionOptions, SubmissionPayload};

pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;
pub const PREVIEW_CHARS: usize = 100;

#[derive(Debug, Clone)]
pub enum Submission {
    Text(String),
    File(PathBuf),
}

/// Payload ready for dispatch plus the short preview the history keeps.
#[derive(Debug, Clone)]
pub struct PreparedSubmission {
    pub payload: SubmissionPayload,
    pub preview: String,
}

/// Validates one submission source and shapes it into the wire payload.
/// Text is embedded trimmed and as-is; file bytes are base64-encoded with the
/// `isBase64Encoded` flag set so the server knows to decode before extracting.
pub async fn prepare(
    submission: &Submission,
    options: SubmissionOptions,
) -> Result<PreparedSubmission, ClassifyError> {
    match submission {
        Submission::Text(text) => prepare_text(text, options),
        Submission::File(path) => prepare_file(path, options).await,
    }
}

fn prepare_text(
    text: &str,
    options: SubmissionOptions,
) -> Result<PreparedSubmission, ClassifyError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ClassifyError::EmptyInput);
    }
    Ok(PreparedSubmission {
        payload: SubmissionPayload {
            body: trimmed.to_string(),
            is_base64_encoded: false,
            options,
        },
        preview: trimmed.chars().take(PREVIEW_CHARS).collect(),
    })
}

async fn prepare_file(
    path: &Path,
    options: SubmissionOptions,
) -> Result<PreparedSubmission, ClassifyError> {
    check_extension(path)?;

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > MAX_FILE_SIZE {
        return Err(ClassifyError::FileTooLarge {
            size: metadata.len(),
        });
    }

    let bytes = tokio::fs::read(path).await?;
    let preview = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(PreparedSubmission {
        payload: SubmissionPayload {
            body: BASE64.encode(&bytes),
            is_base64_encoded: true,
            options,
        },
        preview,
    })
}

fn check_extension(path: &Path) -> Result<(), ClassifyError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match extension.as_str() {
        "txt" | "pdf" => Ok(()),
        _ => Err(ClassifyError::UnsupportedFileType { extension }),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use base64::Engine as _;

    use super::*;

    fn options() -> SubmissionOptions {
        SubmissionOptions {
            confidence: 0.7,
            detailed: true,
        }
    }

    #[tokio::test]
    async fn text_is_trimmed_and_embedded_verbatim() {
        let prepared = prepare(&Submission::Text("  Hello \n".into()), options())
            .await
            .unwrap();
        assert_eq!(prepared.payload.body, "Hello");
        assert!(!prepared.payload.is_base64_encoded);
        assert_eq!(prepared.preview, "Hello");
    }

    #[tokio::test]
    async fn whitespace_only_text_is_rejected_before_dispatch() {
        let err = prepare(&Submission::Text("   \n\t".into()), options())
            .await
            .unwrap_err();
        assert!(matches!(err, ClassifyError::EmptyInput));
    }

    #[tokio::test]
    async fn preview_keeps_only_the_first_100_chars() {
        let long = "x".repeat(500);
        let prepared = prepare(&Submission::Text(long.clone()), options())
            .await
            .unwrap();
        assert_eq!(prepared.payload.body, long);
        assert_eq!(prepared.preview.chars().count(), PREVIEW_CHARS);
    }

    #[tokio::test]
    async fn file_bytes_round_trip_through_base64() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(b"conteudo do email\x00\xff").unwrap();

        let prepared = prepare(&Submission::File(file.path().to_path_buf()), options())
            .await
            .unwrap();
        assert!(prepared.payload.is_base64_encoded);
        let decoded = BASE64.decode(&prepared.payload.body).unwrap();
        assert_eq!(decoded, b"conteudo do email\x00\xff");
    }

    #[tokio::test]
    async fn oversized_file_is_rejected() {
        let file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.as_file().set_len(MAX_FILE_SIZE + 1).unwrap();

        let err = prepare(&Submission::File(file.path().to_path_buf()), options())
            .await
            .unwrap_err();
        assert!(matches!(err, ClassifyError::FileTooLarge { size } if size == MAX_FILE_SIZE + 1));
    }

    #[tokio::test]
    async fn unsupported_extension_is_rejected() {
        let err = prepare(&Submission::File("email.docx".into()), options())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ClassifyError::UnsupportedFileType { extension } if extension == "docx"
        ));
    }

    #[tokio::test]
    async fn missing_file_surfaces_a_read_error() {
        let err = prepare(&Submission::File("nao-existe.txt".into()), options())
            .await
            .unwrap_err();
        assert!(matches!(err, ClassifyError::FileRead(_)));
        assert!(err.is_validation());
    }
}
