//! The single place the UI is drawn from. Handlers decide *what* happened;
//! everything the user sees goes through these functions.

use crate::{
    api::ClassifyError,
    domain::{ClassificationResult, Verdict},
    session::{HistoryLog, Stats},
};

pub fn banner(endpoint: &str) {
    println!("Classificador de Emails — Produtivo / Não Produtivo");
    println!("Endpoint: {endpoint}");
    println!("Digite 'help' para ver os comandos.");
    println!();
}

pub fn loading() {
    println!("Classificando...");
}

pub fn result(result: &ClassificationResult) {
    let badge = match result.verdict() {
        Verdict::Produtivo => "📧 Produtivo",
        Verdict::NaoProdutivo => "📄 Não Produtivo",
    };
    println!();
    println!("Classificação: {badge}");
    println!("Confiança:     {}%", result.confidence());
    println!(
        "Justificativa: {}",
        result.justificativa.as_deref().unwrap_or("Sem justificativa.")
    );
    if let Some(recomendacao) = result.recomendacao_resposta.as_deref() {
        println!("Resposta sugerida: {recomendacao}");
    }

    println!("--- Informações Técnicas ---");
    println!(
        "• Tempo: {}ms",
        result.metadata.processing_time_ms.unwrap_or(0.0)
    );
    println!(
        "• Modelo: {}",
        result.metadata.modelo_info.as_deref().unwrap_or("N/A")
    );
    if result.metadata.foi_truncado {
        println!("• Aviso: o texto foi truncado.");
    }
    if let Some(tentativas) = result.debug.tentativas {
        println!("• Tentativas: {tentativas}");
    }

    if let Ok(json) = serde_json::to_string_pretty(result) {
        println!();
        println!("{json}");
    }
    println!();
}

pub fn error(err: &ClassifyError) {
    println!("❌ {err}");
    // Malformed body: fall back to showing whatever the server sent.
    if let ClassifyError::Parse { raw } = err {
        println!("{raw}");
    }
    println!();
}

pub fn history(history: &HistoryLog) {
    if history.is_empty() {
        println!("Nenhuma classificação realizada ainda.");
        println!();
        return;
    }
    for (index, entry) in history.iter().enumerate() {
        println!(
            "{:>2}. [{}] {} ({}%)",
            index + 1,
            entry.timestamp,
            entry.classificacao,
            entry.confianca
        );
        println!("    {}", truncated(&entry.preview, 100));
        if !entry.justificativa.is_empty() {
            println!("    {}", truncated(&entry.justificativa, 80));
        }
    }
    println!();
}

pub fn stats(stats: &Stats) {
    println!("Emails processados: {}", stats.total);
    println!("Taxa de sucesso:    {}", stats.success_rate_display());
    println!();
}

pub fn help() {
    println!("Comandos:");
    println!("  text <conteúdo>   classifica o texto informado");
    println!("  file <caminho>    classifica um arquivo .txt ou .pdf (máx. 10MB)");
    println!("  example           classifica um email de exemplo");
    println!("  history           lista as últimas classificações (máx. 10)");
    println!("  show <n>          reexibe o item n do histórico");
    println!("  stats             mostra os contadores da sessão");
    println!("  export [dir]      salva o resultado atual como JSON");
    println!("  clear             limpa o histórico");
    println!("  quit              encerra");
    println!();
}

fn truncated(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let cut: String = text.chars().take(limit).collect();
    format!("{cut}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_respects_char_boundaries() {
        let text = "não".repeat(40);
        let short = truncated(&text, 80);
        assert_eq!(short.chars().count(), 83);
        assert!(short.ends_with("..."));
        assert_eq!(truncated("curto", 80), "curto");
    }
}
