use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;

use crate::domain::ClassificationResult;

use super::error::ClassifyError;

/// JSON body POSTed to the classification endpoint. `body` carries either the
/// trimmed text as-is or the base64 of the file bytes, never both sources.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionPayload {
    pub body: String,
    #[serde(rename = "isBase64Encoded")]
    pub is_base64_encoded: bool,
    pub options: SubmissionOptions,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SubmissionOptions {
    pub confidence: f64,
    pub detailed: bool,
}

/// Maps an HTTP status plus raw body onto the response contract.
///
/// The endpoint signals failure two ways: a non-2xx status, or a 2xx body
/// carrying `status: "erro"`. Either way the `erro` field, when present, is
/// the message worth showing. A 2xx body that is not valid JSON is a parse
/// failure and the raw text is kept so the caller can fall back to showing it.
pub fn interpret_response(
    status: StatusCode,
    body: &str,
) -> Result<ClassificationResult, ClassifyError> {
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) if status.is_success() => {
            return Err(ClassifyError::Parse {
                raw: body.to_string(),
            });
        }
        Err(_) => {
            return Err(ClassifyError::Api {
                status: Some(status.as_u16()),
                message: status_line(status),
            });
        }
    };

    let flagged = value.get("status").and_then(Value::as_str) == Some("erro");
    if !status.is_success() || flagged {
        let message = value
            .get("erro")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| status_line(status));
        return Err(ClassifyError::Api {
            status: Some(status.as_u16()),
            message,
        });
    }

    serde_json::from_value(value).map_err(|_| ClassifyError::Parse {
        raw: body.to_string(),
    })
}

fn status_line(status: StatusCode) -> String {
    format!(
        "HTTP {}: {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("erro desconhecido")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_serializes_with_camel_case_flag() {
        let payload = SubmissionPayload {
            body: "Hello".into(),
            is_base64_encoded: false,
            options: SubmissionOptions {
                confidence: 0.7,
                detailed: true,
            },
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["body"], "Hello");
        assert_eq!(json["isBase64Encoded"], false);
        assert_eq!(json["options"]["detailed"], true);
    }

    #[test]
    fn successful_body_parses_into_a_result() {
        let body = r#"{"classificacao":"Produtivo","justificativa":"needs reply","confianca":97}"#;
        let result = interpret_response(StatusCode::OK, body).unwrap();
        assert_eq!(result.classificacao.as_deref(), Some("Produtivo"));
        assert_eq!(result.justificativa.as_deref(), Some("needs reply"));
        assert_eq!(result.confidence(), 97);
    }

    #[test]
    fn error_flagged_body_wins_even_on_http_200() {
        let body = r#"{"status":"erro","erro":"Texto muito curto para classificação"}"#;
        match interpret_response(StatusCode::OK, body) {
            Err(ClassifyError::Api { message, .. }) => {
                assert_eq!(message, "Texto muito curto para classificação");
            }
            other => panic!("expected ApiError, got {other:?}"),
        }
    }

    #[test]
    fn http_500_without_erro_field_uses_the_status_line() {
        match interpret_response(StatusCode::INTERNAL_SERVER_ERROR, "{}") {
            Err(ClassifyError::Api { status, message }) => {
                assert_eq!(status, Some(500));
                assert_eq!(message, "HTTP 500: Internal Server Error");
            }
            other => panic!("expected ApiError, got {other:?}"),
        }
    }

    #[test]
    fn non_json_success_body_is_a_parse_error_with_the_raw_text() {
        match interpret_response(StatusCode::OK, "<html>oops</html>") {
            Err(ClassifyError::Parse { raw }) => assert_eq!(raw, "<html>oops</html>"),
            other => panic!("expected ParseError, got {other:?}"),
        }
    }

    #[test]
    fn non_json_error_body_is_an_api_error() {
        match interpret_response(StatusCode::BAD_GATEWAY, "gateway blew up") {
            Err(ClassifyError::Api { status, .. }) => assert_eq!(status, Some(502)),
            other => panic!("expected ApiError, got {other:?}"),
        }
    }
}
