//! # Whitelists de Bancas e Cargos
//!
//! Tabelas de nomes conhecidos usadas pela extração de metadados. Não há
//! estado global: quem precisa das listas constrói um [`Whitelists`] e o
//! passa adiante.
//!
//! | Arquivo                  | Conteúdo                  | Ausente                  |
//! |--------------------------|---------------------------|--------------------------|
//! | `bancas_whitelist.json`  | array JSON de strings     | lista embutida           |
//! | `cargos_whitelist.json`  | array JSON de strings     | lista vazia              |
//!
//! As entradas são guardadas em maiúsculas.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::WhitelistError;

pub const BANCAS_FILE: &str = "bancas_whitelist.json";
pub const CARGOS_FILE: &str = "cargos_whitelist.json";

/// Bancas usadas quando não há whitelist configurada.
pub const DEFAULT_BANCAS: &[&str] = &[
    "CEBRASPE",
    "FGV",
    "FUNDAÇÃO GETULIO VARGAS",
    "VUNESP",
    "IBFC",
    "IDECAN",
    "AOCP",
    "QUADRIX",
    "CONSULPLAN",
    "FUNDATEC",
    "IADES",
    "FCC",
    "FUNRIO",
    "CESGRANRIO",
    "CESPE",
];

/// Grafias sempre reconhecidas, inclusive a sem cedilha comum em PDFs.
const KNOWN_BANCAS: &[&str] = &[
    "CEBRASPE",
    "FGV",
    "FUNDAÇÃO GETULIO VARGAS",
    "FUNDAO GETULIO VARGAS",
    "VUNESP",
    "IBFC",
    "IDECAN",
    "AOCP",
    "QUADRIX",
    "CONSULPLAN",
    "FUNDATEC",
    "IADES",
    "FCC",
    "FUNRIO",
    "CESGRANRIO",
    "CESPE",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Whitelists {
    pub bancas: Vec<String>,
    pub cargos: Vec<String>,
}

impl Default for Whitelists {
    fn default() -> Self {
        Self {
            bancas: DEFAULT_BANCAS.iter().map(|b| b.to_string()).collect(),
            cargos: Vec::new(),
        }
    }
}

impl Whitelists {
    /// Carrega as duas listas de um diretório.
    ///
    /// Arquivo ausente (ou lista de bancas vazia) mantém o padrão; arquivo
    /// ilegível ou com JSON inválido é erro.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, WhitelistError> {
        let dir = dir.as_ref();
        let mut lists = Self::default();

        if let Some(bancas) = read_list(&dir.join(BANCAS_FILE))? {
            if !bancas.is_empty() {
                lists.bancas = bancas;
            }
        }
        if let Some(cargos) = read_list(&dir.join(CARGOS_FILE))? {
            lists.cargos = cargos;
        }

        tracing::info!(
            dir = %dir.display(),
            bancas = lists.bancas.len(),
            cargos = lists.cargos.len(),
            "whitelists carregadas"
        );
        Ok(lists)
    }

    /// Bancas a procurar no texto: as grafias conhecidas seguidas da
    /// whitelist, sem repetição e em ordem estável.
    pub fn banca_candidates(&self) -> Vec<&str> {
        let mut out: Vec<&str> = KNOWN_BANCAS.to_vec();
        for banca in &self.bancas {
            if !out.contains(&banca.as_str()) {
                out.push(banca.as_str());
            }
        }
        out
    }
}

fn read_list(path: &Path) -> Result<Option<Vec<String>>, WhitelistError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(WhitelistError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let entries: Vec<String> =
        serde_json::from_str(&raw).map_err(|source| WhitelistError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Some(
        entries
            .into_iter()
            .map(|e| e.trim().to_uppercase())
            .filter(|e| !e.is_empty())
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lists() {
        let lists = Whitelists::default();
        assert_eq!(lists.bancas.len(), DEFAULT_BANCAS.len());
        assert!(lists.cargos.is_empty());
    }

    #[test]
    fn test_load_missing_dir_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let lists = Whitelists::load_dir(dir.path()).unwrap();
        assert_eq!(lists, Whitelists::default());
    }

    #[test]
    fn test_load_uppercases_entries() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(BANCAS_FILE), r#"["Instituto Acesso", "fcc"]"#).unwrap();
        fs::write(
            dir.path().join(CARGOS_FILE),
            r#"["Analista Judiciário", " técnico "]"#,
        )
        .unwrap();

        let lists = Whitelists::load_dir(dir.path()).unwrap();
        assert_eq!(lists.bancas, vec!["INSTITUTO ACESSO", "FCC"]);
        assert_eq!(lists.cargos, vec!["ANALISTA JUDICIÁRIO", "TÉCNICO"]);
    }

    #[test]
    fn test_empty_banca_list_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(BANCAS_FILE), "[]").unwrap();
        let lists = Whitelists::load_dir(dir.path()).unwrap();
        assert_eq!(lists.bancas.len(), DEFAULT_BANCAS.len());
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CARGOS_FILE), "{ nao e lista").unwrap();
        let err = Whitelists::load_dir(dir.path()).unwrap_err();
        assert!(matches!(err, WhitelistError::Json { .. }));
        assert!(err.to_string().contains(CARGOS_FILE));
    }

    #[test]
    fn test_banca_candidates_dedup() {
        let lists = Whitelists {
            bancas: vec!["FCC".into(), "INSTITUTO ACESSO".into()],
            cargos: vec![],
        };
        let candidates = lists.banca_candidates();
        assert_eq!(candidates.iter().filter(|b| **b == "FCC").count(), 1);
        assert_eq!(candidates.last(), Some(&"INSTITUTO ACESSO"));
        assert!(candidates.contains(&"FUNDAO GETULIO VARGAS"));
    }
}
