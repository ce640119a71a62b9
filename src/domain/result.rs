use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Confidence assumed when the server omits the field or sends garbage.
pub const DEFAULT_CONFIDENCE: u8 = 95;

/// Parsed body of a successful classification response.
///
/// Only the fields the client renders are typed; everything else the server
/// sends (`status`, `texto`, future additions) is kept in `extra` so the
/// exported JSON reproduces the full response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classificacao: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub justificativa: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confianca: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recomendacao_resposta: Option<String>,
    #[serde(default)]
    pub metadata: ResponseMetadata,
    #[serde(default)]
    pub debug: DebugInfo,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ClassificationResult {
    /// Label to show in history entries; the server may omit it on partial
    /// failures.
    pub fn label(&self) -> &str {
        self.classificacao.as_deref().unwrap_or("Erro")
    }

    /// Confidence as an integer percentage, clamped to 0..=100, with
    /// [`DEFAULT_CONFIDENCE`] standing in for absent or non-finite values.
    pub fn confidence(&self) -> u8 {
        match self.confianca {
            Some(value) if value.is_finite() => value.round().clamp(0.0, 100.0) as u8,
            _ => DEFAULT_CONFIDENCE,
        }
    }

    pub fn verdict(&self) -> Verdict {
        let label = self.label().to_lowercase();
        if label.contains("produtivo") && !label.contains("não") && !label.contains("nao") {
            Verdict::Produtivo
        } else {
            Verdict::NaoProdutivo
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Produtivo,
    NaoProdutivo,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Produtivo => f.write_str("Produtivo"),
            Verdict::NaoProdutivo => f.write_str("Não Produtivo"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_time_ms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modelo_info: Option<String>,
    #[serde(default)]
    pub foi_truncado: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DebugInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tentativas: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with(classificacao: Option<&str>, confianca: Option<f64>) -> ClassificationResult {
        ClassificationResult {
            classificacao: classificacao.map(str::to_string),
            justificativa: None,
            confianca,
            recomendacao_resposta: None,
            metadata: ResponseMetadata::default(),
            debug: DebugInfo::default(),
            extra: Map::new(),
        }
    }

    #[test]
    fn confidence_defaults_to_95_when_absent() {
        assert_eq!(result_with(None, None).confidence(), 95);
    }

    #[test]
    fn confidence_is_clamped_to_valid_range() {
        assert_eq!(result_with(None, Some(120.0)).confidence(), 100);
        assert_eq!(result_with(None, Some(-3.0)).confidence(), 0);
        assert_eq!(result_with(None, Some(97.0)).confidence(), 97);
    }

    #[test]
    fn confidence_ignores_non_finite_values() {
        assert_eq!(result_with(None, Some(f64::NAN)).confidence(), 95);
    }

    #[test]
    fn verdict_derives_from_label_text() {
        assert_eq!(result_with(Some("Produtivo"), None).verdict(), Verdict::Produtivo);
        assert_eq!(
            result_with(Some("Não Produtivo"), None).verdict(),
            Verdict::NaoProdutivo
        );
        assert_eq!(result_with(None, None).verdict(), Verdict::NaoProdutivo);
    }

    #[test]
    fn unknown_response_fields_survive_a_round_trip() {
        let raw = r#"{"classificacao":"Produtivo","status":"sucesso","texto":"oi"}"#;
        let parsed: ClassificationResult = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.extra.get("status").and_then(Value::as_str), Some("sucesso"));

        let rendered = serde_json::to_value(&parsed).unwrap();
        assert_eq!(rendered.get("texto").and_then(Value::as_str), Some("oi"));
    }
}
