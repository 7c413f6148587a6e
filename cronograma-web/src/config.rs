//! Configuração do servidor lida de variáveis de ambiente.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_STREAM_DELAY_MS: u64 = 35;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Endereço de escuta (`CRONOGRAMA_BIND_ADDR`).
    pub bind_addr: SocketAddr,
    /// Diretório com `bancas_whitelist.json`/`cargos_whitelist.json`
    /// (`CRONOGRAMA_WHITELIST_DIR`); sem ele, as listas embutidas são usadas.
    pub whitelist_dir: Option<PathBuf>,
    /// Pausa entre eventos enviados pelo WebSocket (`CRONOGRAMA_STREAM_DELAY_MS`).
    pub stream_delay: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            whitelist_dir: None,
            stream_delay: Duration::from_millis(DEFAULT_STREAM_DELAY_MS),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Monta a configuração a partir de uma função de consulta, para testes.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let bind_addr = lookup("CRONOGRAMA_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .map_err(|e| anyhow::anyhow!("CRONOGRAMA_BIND_ADDR inválido: {e}"))?;

        let stream_delay = match lookup("CRONOGRAMA_STREAM_DELAY_MS") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("CRONOGRAMA_STREAM_DELAY_MS inválido: {e}"))?,
            None => DEFAULT_STREAM_DELAY_MS,
        };

        Ok(Self {
            bind_addr,
            whitelist_dir: lookup("CRONOGRAMA_WHITELIST_DIR")
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from),
            stream_delay: Duration::from_millis(stream_delay),
        })
    }
}
