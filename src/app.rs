use std::{
    io::{self, Write},
    path::PathBuf,
    sync::Arc,
};

use anyhow::Result;
use chrono_tz::Tz;
use reqwest::Client;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{
    api::{ClassifierClient, SubmissionOptions},
    config::AppConfig,
    domain::ClassificationResult,
    export,
    infrastructure::{directories::ResolvedPaths, shutdown::Shutdown},
    input::{self, Submission},
    render,
    session::{HistoryEntry, HistoryLog, SessionStore, Stats},
};

const EXAMPLE_EMAIL: &str = "\
Assunto: Solicitação de Suporte Técnico - Urgente
De: joao.silva@empresa.com
Para: suporte@sistema.com

Prezado time de suporte,
Estou enfrentando dificuldades para acessar o sistema desde ontem. Quando tento fazer login, recebo a mensagem \"Erro de autenticação\".
Já tentei limpar o cache, usar outro navegador e resetar minha senha, sem sucesso.
Por favor, preciso de ajuda com urgência para acessar relatórios importantes.

Atenciosamente,
João Silva";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
}

/// Everything the renderer may need, owned in one place instead of scattered
/// across handlers.
pub struct AppState {
    pub phase: Phase,
    pub current: Option<ClassificationResult>,
    pub history: HistoryLog,
    pub stats: Stats,
}

pub struct TriageApp {
    config: Arc<AppConfig>,
    paths: ResolvedPaths,
    client: ClassifierClient,
    store: SessionStore,
    state: AppState,
    shutdown: Shutdown,
}

#[derive(Debug)]
enum Command {
    Classify(Submission),
    Example,
    History,
    Show(usize),
    Stats,
    Export(Option<PathBuf>),
    Clear,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

fn parse_command(line: &str) -> Command {
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    match word {
        "" => Command::Empty,
        "text" => Command::Classify(Submission::Text(rest.to_string())),
        "file" => Command::Classify(Submission::File(PathBuf::from(rest))),
        "example" => Command::Example,
        "history" => Command::History,
        "show" => match rest.parse::<usize>() {
            Ok(n) => Command::Show(n),
            Err(_) => Command::Unknown(line.to_string()),
        },
        "stats" => Command::Stats,
        "export" => Command::Export((!rest.is_empty()).then(|| PathBuf::from(rest))),
        "clear" => Command::Clear,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}

impl TriageApp {
    pub fn initialize(config: AppConfig, paths: ResolvedPaths, shutdown: Shutdown) -> Result<Self> {
        let config = Arc::new(config);

        let http = Client::builder()
            .user_agent(format!("email-triage/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        let client = ClassifierClient::new(http, config.api.clone());

        let store = SessionStore::new(&paths.data_dir);
        let state = AppState {
            phase: Phase::Idle,
            current: None,
            history: store.load_history(),
            stats: store.load_stats(),
        };
        tracing::info!(
            target: "app",
            history = state.history.len(),
            total = state.stats.total,
            "session state restored"
        );

        Ok(Self {
            config,
            paths,
            client,
            store,
            state,
            shutdown,
        })
    }

    pub async fn run(mut self) -> Result<()> {
        render::banner(self.config.api.endpoint.as_str());

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut shutdown_listener = self.shutdown.subscribe();

        loop {
            print!("> ");
            io::stdout().flush().ok();

            let line = tokio::select! {
                line = lines.next_line() => line?,
                _ = shutdown_listener.notified() => {
                    println!();
                    break;
                }
            };
            let Some(line) = line else { break };
            if !self.handle_command(parse_command(line.trim())).await {
                break;
            }
        }

        tracing::info!(target: "app", "client stopped");
        Ok(())
    }

    /// Returns false when the REPL should exit.
    async fn handle_command(&mut self, command: Command) -> bool {
        match command {
            Command::Classify(submission) => self.submit(submission).await,
            Command::Example => self.submit(Submission::Text(EXAMPLE_EMAIL.to_string())).await,
            Command::History => render::history(&self.state.history),
            Command::Show(n) => self.show_entry(n),
            Command::Stats => render::stats(&self.state.stats),
            Command::Export(dir) => self.export_current(dir),
            Command::Clear => {
                self.state.history.clear();
                self.store.save_history(&self.state.history);
                println!("Histórico limpo.");
            }
            Command::Help => render::help(),
            Command::Quit => return false,
            Command::Empty => {}
            Command::Unknown(line) => {
                println!("Comando não reconhecido: {line}. Digite 'help'.");
            }
        }
        true
    }

    /// The one state-machine transition with suspension points:
    /// Idle → Submitting → (Success | Error) → Idle. The REPL awaits the
    /// in-flight request, so at most one submission is ever outstanding.
    async fn submit(&mut self, submission: Submission) {
        if self.state.phase != Phase::Idle {
            return;
        }

        let options = SubmissionOptions {
            confidence: self.config.api.confidence,
            detailed: self.config.api.detailed,
        };
        // Validation failures never reach the wire and leave the stats alone.
        let prepared = match input::prepare(&submission, options).await {
            Ok(prepared) => prepared,
            Err(err) => {
                debug_assert!(err.is_validation());
                render::error(&err);
                return;
            }
        };

        self.state.phase = Phase::Submitting;
        render::loading();

        let outcome = self.client.classify(&prepared.payload).await;
        self.state
            .stats
            .record_attempt(matches!(&outcome, Ok(result) if result.classificacao.is_some()));
        self.store.save_stats(&self.state.stats);

        match outcome {
            Ok(result) => {
                let tz: Tz = self
                    .config
                    .timezone
                    .parse()
                    .unwrap_or(chrono_tz::America::Sao_Paulo);
                self.state
                    .history
                    .push(HistoryEntry::from_result(&result, &prepared.preview, tz));
                self.store.save_history(&self.state.history);
                render::result(&result);
                self.state.current = Some(result);
            }
            Err(err) => {
                tracing::warn!(target: "app", error = %err, "classification failed");
                render::error(&err);
            }
        }
        self.state.phase = Phase::Idle;
    }

    /// Re-renders a stored result; no network call involved.
    fn show_entry(&mut self, position: usize) {
        let Some(entry) = position
            .checked_sub(1)
            .and_then(|index| self.state.history.get(index))
        else {
            println!("Item {position} não existe no histórico.");
            return;
        };
        render::result(&entry.full_result);
        self.state.current = Some(entry.full_result.clone());
    }

    fn export_current(&self, dir: Option<PathBuf>) {
        let Some(result) = self.state.current.as_ref() else {
            println!("Nenhum resultado para exportar.");
            return;
        };
        let dir = dir.unwrap_or_else(|| self.paths.export_dir.clone());
        match export::export_result(result, &dir) {
            Ok(path) => println!("Resultado exportado: {}", path.display()),
            Err(err) => {
                tracing::warn!(target: "app", error = %err, "export failed");
                println!("Erro ao exportar: {err}");
            }
        }
    }
}
