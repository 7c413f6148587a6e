//! # Erros das Bordas Falíveis
//!
//! O motor de extração nunca propaga erros: datas inválidas, seções ausentes
//! ou rendimento insuficiente são expressos como `None`. Os tipos abaixo
//! existem para as etapas internas que *podem* falhar (parse de uma data,
//! carregamento de whitelists) e são convertidos em ausência na fronteira.

use std::path::PathBuf;

use thiserror::Error;

/// Falha ao interpretar um token `DD/MM/AAAA`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("formato de data inválido: {0:?}")]
    Malformed(String),
    #[error("data fora do calendário: {0:?}")]
    OutOfRange(String),
    #[error("bloco de datas sem datas reconhecíveis: {0:?}")]
    EmptyBlock(String),
}

/// Falha ao carregar uma whitelist do disco.
#[derive(Debug, Error)]
pub enum WhitelistError {
    #[error("erro de IO lendo {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON inválido em {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
