use thiserror::Error;

/// Everything that can go wrong between "the user hit enter" and "a parsed
/// result is in hand". Validation variants are raised before any request is
/// sent and therefore do not count as attempts in the session stats.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("insira um texto ou selecione um arquivo para classificar")]
    EmptyInput,
    #[error("arquivo muito grande ({size} bytes); o máximo permitido é 10MB")]
    FileTooLarge { size: u64 },
    #[error("tipo de arquivo não suportado ({extension}); apenas .txt e .pdf são aceitos")]
    UnsupportedFileType { extension: String },
    #[error("erro ao ler o arquivo: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("erro na conexão: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("{message}")]
    Api { status: Option<u16>, message: String },
    #[error("resposta do servidor em formato inesperado")]
    Parse { raw: String },
}

impl ClassifyError {
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput
                | Self::FileTooLarge { .. }
                | Self::UnsupportedFileType { .. }
                | Self::FileRead(_)
        )
    }
}
