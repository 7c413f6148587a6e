//! # Metadados do Edital
//!
//! Identificação do edital a partir do texto bruto: órgão, número, cargo,
//! banca organizadora e data de publicação no DOU.
//!
//! A banca é resolvida em camadas, da evidência mais forte para a mais fraca;
//! cada camada fixa um tipo e uma confiança:
//!
//! | Camada | Evidência                                              | Tipo               | Confiança |
//! |--------|--------------------------------------------------------|--------------------|-----------|
//! | 1      | nome conhecido ou da whitelist                         | `externa`          | 0.98      |
//! | 2      | "organizadora/executora/... por X", X universidade     | `execucao_propria` | 0.80      |
//! | 2      | idem, X fundação ou instituto                          | `fundacao`         | 0.90      |
//! | 2      | idem, outro X                                          | `externa`          | 0.60      |
//! | 3      | "FUNDAÇÃO …"/"INSTITUTO …" solto no texto              | `fundacao`         | 0.75      |
//! | 4      | comissão examinadora/designada, pró-reitoria           | `execucao_propria` | 0.85      |
//! | —      | nada encontrado                                        | —                  | 0.0       |

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::dates::parse_long_date;
use crate::text::{prefix_chars, title_case};
use crate::whitelist::Whitelists;

/// Linhas iniciais onde se procura o cabeçalho "EDITAL".
const HEADER_SCAN_LINES: usize = 40;
/// Linhas iniciais onde se procura "PROVIMENTO DE".
const PROVISION_SCAN_LINES: usize = 20;
/// Linhas após o cabeçalho onde "PROVIMENTO DE" é aceito.
const PROVISION_WINDOW_LINES: usize = 6;
/// Caracteres iniciais varridos em busca de um cargo da whitelist.
const CARGO_SCAN_CHARS: usize = 3_000;
/// Linhas iniciais onde se procura a instituição executora.
const INSTITUTION_SCAN_LINES: usize = 10;

macro_rules! regex {
    ($name:ident, $pattern:expr) => {
        static $name: LazyLock<Regex> =
            LazyLock::new(|| Regex::new($pattern).expect(concat!(stringify!($name), " compila")));
    };
}

regex!(EDITAL_RE, r"(?i)EDITAL");
regex!(
    AGENCY_LABEL_RE,
    r"(?i)(?:Órgão|Entidade)[:\s\-]{1,30}([\w\-/.,][\w \t\-/.,]*)"
);
regex!(
    EDITAL_NUMBER_RE,
    r"(?i)Edital(?: de Abertura)?(?: n(?:º|o|r)\.?\s*)?[:\-\s]*([0-9A-Za-z\-/.]+)"
);
regex!(
    EDITAL_LONG_DATE_RE,
    r"(?i)Edital de Abertura de\s*([0-9]{1,2}\s+de\s+\w+\s+de\s+[0-9]{4})"
);
regex!(CARGO_LABEL_RE, r"(?i)cargos?\s*[:\-]\s*([\w \t\-.,/()]+)");
regex!(
    CARGO_PHRASE_RE,
    r"(?i)destinado a selecionar candidatos para o cargo de\s*([\w \t\-.,/()]+)"
);
regex!(PROVISION_RE, r"(?i)PROVIMENTO DE\s+([\w \t\-/,()]+)");
regex!(
    BANCA_LABEL_RE,
    r"(?i:organizad[oa]r|executad[oa]r|realizad[oa]r|sob responsabilidade|contratada)[^\n]{0,60}(?i:por)\s+(\p{L}[\w \t\-.,/()]*)"
);
regex!(
    IN_HOUSE_RE,
    r"(?i)UNIVERSIDADE|UNIVERSIT[ÁA]RIO|COMISS[ÃA]O|PR[ÓO]-?REITOR"
);
regex!(FOUNDATION_RE, r"(?i)FUNDA[ÇC][ÃA]O|FUNDAO|INSTITUTO");
regex!(
    STANDALONE_FOUNDATION_RE,
    r"(?:FUNDAÇÃO|FUNDACAO|INSTITUTO)[ \t]+[\w \t\-]+"
);
regex!(
    COMMISSION_RE,
    r"(?i)COMISS[ÃA]O\s+(?:EXAMINADORA|DESIGNADA)|EXECUTADO\s+PELA\s+(?:PR[ÓO]-?REITORIA|PROGP)"
);
regex!(
    INSTITUTION_LINE_RE,
    r"(?i)UNIVERSIDADE|FUNDA[ÇC][ÃA]O|INSTITUTO|MINIST[ÉE]RIO"
);
regex!(
    PUBLISHED_RE,
    r"(?i)Publicado(?: em)?[:\s\-]{0,10}([0-9]{1,2}\s+de\s+\w+\s+de\s+[0-9]{4})"
);

/// Como o concurso é executado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BancaKind {
    /// Banca contratada.
    #[serde(rename = "externa")]
    External,
    /// Executado pela própria instituição (universidade, comissão).
    #[serde(rename = "execucao_propria")]
    InHouse,
    #[serde(rename = "fundacao")]
    Foundation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Banca {
    #[serde(rename = "nome")]
    pub name: Option<String>,
    #[serde(rename = "tipo")]
    pub kind: Option<BancaKind>,
    #[serde(rename = "confianca_extracao")]
    pub confidence: f64,
}

impl Banca {
    fn found(name: impl Into<String>, kind: BancaKind, confidence: f64) -> Self {
        Self {
            name: Some(name.into()),
            kind: Some(kind),
            confidence,
        }
    }

    pub fn unknown() -> Self {
        Self {
            name: None,
            kind: None,
            confidence: 0.0,
        }
    }
}

impl Default for Banca {
    fn default() -> Self {
        Self::unknown()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditalMetadata {
    #[serde(rename = "orgao")]
    pub agency: Option<String>,
    #[serde(rename = "edital_numero")]
    pub edital_number: Option<String>,
    #[serde(rename = "cargo")]
    pub position: Option<String>,
    pub banca: Banca,
    #[serde(rename = "data_publicacao_dou")]
    pub dou_published_on: Option<NaiveDate>,
}

/// Extrai os metadados de identificação do edital.
pub fn extract_metadata(text: &str, whitelists: &Whitelists) -> EditalMetadata {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    EditalMetadata {
        agency: extract_agency(text, &lines),
        edital_number: extract_edital_number(text),
        position: extract_position(text, &lines, &whitelists.cargos),
        banca: extract_banca(text, &lines, whitelists),
        dou_published_on: PUBLISHED_RE
            .captures(text)
            .and_then(|caps| parse_long_date(&caps[1]).ok()),
    }
}

/// Remove espaços e pontuação final; `None` se nada sobrar.
fn clean(raw: &str) -> Option<String> {
    let value = raw
        .trim()
        .trim_end_matches(['.', ',', ';', ':', '-'])
        .trim_end();
    (!value.is_empty()).then(|| value.to_string())
}

fn extract_agency(text: &str, lines: &[&str]) -> Option<String> {
    let from_header = lines
        .iter()
        .take(HEADER_SCAN_LINES)
        .enumerate()
        .filter(|(_, line)| EDITAL_RE.is_match(line))
        .find_map(|(i, _)| clean(&lines[i.saturating_sub(2)..i].join(" ")));

    from_header.or_else(|| {
        AGENCY_LABEL_RE
            .captures(text)
            .and_then(|caps| clean(&caps[1]))
    })
}

fn extract_edital_number(text: &str) -> Option<String> {
    let numbered = EDITAL_NUMBER_RE
        .captures(text)
        .map(|caps| caps[1].to_string())
        .filter(|candidate| candidate.chars().count() > 2);

    numbered.or_else(|| {
        EDITAL_LONG_DATE_RE
            .captures(text)
            .map(|caps| caps[1].trim().to_string())
    })
}

fn extract_position(text: &str, lines: &[&str], cargos: &[String]) -> Option<String> {
    let raw = CARGO_LABEL_RE
        .captures(text)
        .or_else(|| CARGO_PHRASE_RE.captures(text))
        .and_then(|caps| clean(&caps[1]))
        .or_else(|| provision_position(lines));

    if cargos.is_empty() {
        return raw;
    }

    match raw {
        Some(value) => {
            let upper = value.to_uppercase();
            let normalized = cargos
                .iter()
                .find(|w| upper.contains(w.as_str()) || w.contains(upper.as_str()))
                .map(|w| title_case(w));
            Some(normalized.unwrap_or(value))
        }
        None => {
            let head = prefix_chars(text, CARGO_SCAN_CHARS).to_uppercase();
            let found = cargos.iter().find(|w| head.contains(w.as_str()))?;
            tracing::debug!(cargo = %found, "cargo encontrado pela whitelist");
            Some(title_case(found))
        }
    }
}

/// "PROVIMENTO DE …" nas linhas logo após o primeiro cabeçalho "EDITAL".
fn provision_position(lines: &[&str]) -> Option<String> {
    let header = lines
        .iter()
        .take(PROVISION_SCAN_LINES)
        .position(|line| EDITAL_RE.is_match(line))?;
    lines
        .iter()
        .skip(header)
        .take(PROVISION_WINDOW_LINES)
        .find_map(|line| PROVISION_RE.captures(line))
        .and_then(|caps| clean(&caps[1]))
}

fn extract_banca(text: &str, lines: &[&str], whitelists: &Whitelists) -> Banca {
    let upper = text.to_uppercase();

    if let Some(known) = whitelists
        .banca_candidates()
        .into_iter()
        .find(|b| upper.contains(&b.to_uppercase()))
    {
        return Banca::found(known, BancaKind::External, 0.98);
    }

    if let Some(candidate) = BANCA_LABEL_RE
        .captures(text)
        .and_then(|caps| clean(&caps[1]))
    {
        return if IN_HOUSE_RE.is_match(&candidate) {
            Banca::found(candidate, BancaKind::InHouse, 0.8)
        } else if FOUNDATION_RE.is_match(&candidate) {
            Banca::found(candidate, BancaKind::Foundation, 0.9)
        } else {
            Banca::found(candidate, BancaKind::External, 0.6)
        };
    }

    if let Some(m) = STANDALONE_FOUNDATION_RE.find(&upper) {
        if let Some(name) = clean(m.as_str()) {
            return Banca::found(title_case(&name), BancaKind::Foundation, 0.75);
        }
    }

    if COMMISSION_RE.is_match(text) {
        let institution = lines
            .iter()
            .take(INSTITUTION_SCAN_LINES)
            .find(|line| INSTITUTION_LINE_RE.is_match(line))
            .map_or("Instituição organizadora", |line| *line);
        return Banca::found(institution, BancaKind::InHouse, 0.85);
    }

    Banca::unknown()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "MINISTÉRIO DA ECONOMIA\nSECRETARIA DE GESTÃO\nEDITAL Nº 1/2026, DE 5 DE JANEIRO DE 2026\nCargo: Analista Judiciário\nO concurso será executado pelo CEBRASPE.\nPublicado em 6 de janeiro de 2026.";

    #[test]
    fn test_header_metadata() {
        let meta = extract_metadata(HEADER, &Whitelists::default());
        assert_eq!(
            meta.agency.as_deref(),
            Some("MINISTÉRIO DA ECONOMIA SECRETARIA DE GESTÃO")
        );
        assert_eq!(meta.edital_number.as_deref(), Some("1/2026"));
        assert_eq!(meta.position.as_deref(), Some("Analista Judiciário"));
        assert_eq!(meta.banca.name.as_deref(), Some("CEBRASPE"));
        assert_eq!(meta.banca.kind, Some(BancaKind::External));
        assert_eq!(meta.banca.confidence, 0.98);
        assert_eq!(
            meta.dou_published_on,
            NaiveDate::from_ymd_opt(2026, 1, 6)
        );
    }

    #[test]
    fn test_agency_from_label() {
        let text = "Edital de abertura\nÓrgão: Tribunal Regional do Trabalho\n";
        let meta = extract_metadata(text, &Whitelists::default());
        assert_eq!(meta.agency.as_deref(), Some("Tribunal Regional do Trabalho"));
    }

    #[test]
    fn test_edital_number_from_long_date() {
        let text = "Edital de Abertura de 12 de março de 2026";
        assert_eq!(
            extract_edital_number(text).as_deref(),
            Some("12 de março de 2026")
        );
    }

    #[test]
    fn test_position_from_provision_line() {
        let text = "UNIVERSIDADE FEDERAL DE EXEMPLO\nEDITAL Nº 10/2026\nCONCURSO PÚBLICO PARA PROVIMENTO DE PROFESSOR ADJUNTO\nDisposições gerais.";
        let meta = extract_metadata(text, &Whitelists::default());
        assert_eq!(meta.position.as_deref(), Some("PROFESSOR ADJUNTO"));
    }

    #[test]
    fn test_position_normalized_by_whitelist() {
        let lists = Whitelists {
            cargos: vec!["ANALISTA JUDICIÁRIO".into()],
            ..Whitelists::default()
        };
        let text = "Cargo: analista judiciário - área administrativa";
        let meta = extract_metadata(text, &lists);
        assert_eq!(meta.position.as_deref(), Some("Analista Judiciário"));
    }

    #[test]
    fn test_position_found_only_by_whitelist() {
        let lists = Whitelists {
            cargos: vec!["TÉCNICO DO SEGURO SOCIAL".into()],
            ..Whitelists::default()
        };
        let text = "Seleção para técnico do seguro social em todo o país.";
        let meta = extract_metadata(text, &lists);
        assert_eq!(meta.position.as_deref(), Some("Técnico Do Seguro Social"));
    }

    #[test]
    fn test_banca_from_label_foundation() {
        let text = "Banca organizadora: realizada por Instituto Alfa de Concursos.";
        let banca = extract_metadata(text, &Whitelists::default()).banca;
        assert_eq!(banca.name.as_deref(), Some("Instituto Alfa de Concursos"));
        assert_eq!(banca.kind, Some(BancaKind::Foundation));
        assert_eq!(banca.confidence, 0.9);
    }

    #[test]
    fn test_banca_from_label_lowercase_name() {
        let text = "Banca organizadora: realizada por fundação alfa.";
        let banca = extract_metadata(text, &Whitelists::default()).banca;
        assert_eq!(banca.name.as_deref(), Some("fundação alfa"));
        assert_eq!(banca.kind, Some(BancaKind::Foundation));
        assert_eq!(banca.confidence, 0.9);
    }

    #[test]
    fn test_banca_from_label_university() {
        let text = "Concurso sob a comissão organizadora, sob responsabilidade assumida por Universidade Federal do Pampa.";
        let banca = extract_metadata(text, &Whitelists::default()).banca;
        assert_eq!(banca.name.as_deref(), Some("Universidade Federal do Pampa"));
        assert_eq!(banca.kind, Some(BancaKind::InHouse));
    }

    #[test]
    fn test_banca_standalone_foundation() {
        let text = "As provas ficarão a encargo da Fundação Alfa Concursos\nem todas as capitais.";
        let banca = extract_metadata(text, &Whitelists::default()).banca;
        assert_eq!(banca.name.as_deref(), Some("Fundação Alfa Concursos"));
        assert_eq!(banca.kind, Some(BancaKind::Foundation));
        assert_eq!(banca.confidence, 0.75);
    }

    #[test]
    fn test_banca_commission() {
        let text = "UNIVERSIDADE FEDERAL DE EXEMPLO\nAs provas serão elaboradas por comissão examinadora designada.";
        let banca = extract_metadata(text, &Whitelists::default()).banca;
        assert_eq!(banca.name.as_deref(), Some("UNIVERSIDADE FEDERAL DE EXEMPLO"));
        assert_eq!(banca.kind, Some(BancaKind::InHouse));
        assert_eq!(banca.confidence, 0.85);
    }

    #[test]
    fn test_banca_unknown() {
        let banca = extract_metadata("Texto sem indicação de banca.", &Whitelists::default()).banca;
        assert_eq!(banca, Banca::unknown());
    }

    #[test]
    fn test_banca_from_custom_whitelist() {
        let lists = Whitelists {
            bancas: vec!["INSTITUTO ACESSO".into()],
            ..Whitelists::default()
        };
        let banca = extract_metadata("Execução: Instituto Acesso.", &lists).banca;
        assert_eq!(banca.name.as_deref(), Some("INSTITUTO ACESSO"));
        assert_eq!(banca.confidence, 0.98);
    }
}
