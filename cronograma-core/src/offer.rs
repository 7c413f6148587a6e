//! # Oferta do Concurso: Vagas e Valores
//!
//! Extração por padrões simples dos números de vagas e dos valores em reais.
//! Os valores monetários são mantidos como aparecem no edital
//! (ex: "R$ 8.500,00"), sem conversão numérica.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::text::forward_chars;

/// Janela após "PPIQ"/"Indígenas" onde se procura o número de vagas.
const PPIQ_WINDOW: usize = 60;
/// Janela após "remuneração"/"salário" onde se procura um valor.
const SALARY_WINDOW: usize = 200;

static TOTAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:Total de vagas|Vagas totais|Vagas)[:\s\-]{0,10}([0-9]+)")
        .expect("TOTAL_RE compila")
});
static LOOSE_TOTAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Vagas?[^\d]{0,10}([0-9]{1,4})").expect("LOOSE_TOTAL_RE compila"));
static GENERAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)ampla\s+concorr[êe]ncia[:\s\-]{0,10}([0-9]+)").expect("GENERAL_RE compila")
});
static PCD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)PCD[:\s\-]{0,10}([0-9]+)").expect("PCD_RE compila"));
static PPIQ_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)PPIQ|PPI|Pretos\s+Pardos|Indígenas").expect("PPIQ_RE compila")
});
static SMALL_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{1,3}").expect("SMALL_NUMBER_RE compila"));

static CURRENCY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"R\$\s*[0-9.,]+").expect("CURRENCY_RE compila"));
static SALARY_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:Remunera[cç][aã]o(?:\s+inicial)?|Vencimento)[:\s\-]{0,30}(R\$\s*[0-9.,]+)",
    )
    .expect("SALARY_LABEL_RE compila")
});
static SALARY_KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)remuner|vencim|sal[aá]rio").expect("SALARY_KEYWORD_RE compila")
});

/// Distribuição das vagas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vagas {
    pub total: Option<u32>,
    #[serde(rename = "ampla_concorrencia")]
    pub general: Option<u32>,
    /// Pessoas com deficiência.
    pub pcd: Option<u32>,
    /// Pretos, pardos, indígenas e quilombolas.
    pub ppiq: Option<u32>,
}

/// Valores em reais, como escritos no edital.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Financeiro {
    #[serde(rename = "taxa_inscricao")]
    pub registration_fee: Option<String>,
    #[serde(rename = "remuneracao_inicial")]
    pub starting_salary: Option<String>,
}

fn first_number(re: &Regex, text: &str) -> Option<u32> {
    re.captures(text).and_then(|caps| caps[1].parse().ok())
}

pub fn extract_vagas(text: &str) -> Vagas {
    let total = first_number(&TOTAL_RE, text).or_else(|| first_number(&LOOSE_TOTAL_RE, text));

    let ppiq = PPIQ_RE.find(text).and_then(|m| {
        let window = &text[m.start()..forward_chars(text, m.start(), PPIQ_WINDOW)];
        SMALL_NUMBER_RE
            .find(window)
            .and_then(|n| n.as_str().parse().ok())
    });

    let mut pcd = first_number(&PCD_RE, text);
    if let (Some(p), Some(t)) = (pcd, total) {
        if p > t {
            tracing::debug!(pcd = p, total = t, "vagas PcD maior que o total; descartado");
            pcd = None;
        }
    }

    Vagas {
        total,
        general: first_number(&GENERAL_RE, text),
        pcd,
        ppiq,
    }
}

/// Remove a pontuação final que o padrão monetário arrasta ("R$ 100,00.").
fn clean_amount(raw: &str) -> String {
    raw.trim_end_matches(['.', ',']).to_string()
}

pub fn extract_financeiro(text: &str) -> Financeiro {
    let registration_fee = CURRENCY_RE.find(text).map(|m| clean_amount(m.as_str()));

    let starting_salary = SALARY_LABEL_RE
        .captures(text)
        .map(|caps| clean_amount(&caps[1]))
        .or_else(|| {
            let keyword = SALARY_KEYWORD_RE.find(text)?;
            let window = &text[keyword.start()..forward_chars(text, keyword.start(), SALARY_WINDOW)];
            CURRENCY_RE.find(window).map(|m| clean_amount(m.as_str()))
        });

    Financeiro {
        registration_fee,
        starting_salary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OFFER: &str = "Total de vagas: 40\nAmpla concorrência: 30\nPcD: 2\nVagas reservadas a PPIQ: 8\nTaxa de inscrição: R$ 120,00\nRemuneração inicial: R$ 8.500,00.";

    #[test]
    fn test_extract_vagas() {
        let vagas = extract_vagas(OFFER);
        assert_eq!(vagas.total, Some(40));
        assert_eq!(vagas.general, Some(30));
        assert_eq!(vagas.pcd, Some(2));
        assert_eq!(vagas.ppiq, Some(8));
    }

    #[test]
    fn test_loose_total() {
        assert_eq!(extract_vagas("Vagas (ampla): 15").total, Some(15));
        assert_eq!(extract_vagas("Sem quadro de oferta.").total, None);
    }

    #[test]
    fn test_pcd_larger_than_total_is_dropped() {
        let vagas = extract_vagas("Vagas: 5\nPcD: 12");
        assert_eq!(vagas.total, Some(5));
        assert_eq!(vagas.pcd, None);
    }

    #[test]
    fn test_extract_financeiro() {
        let fin = extract_financeiro(OFFER);
        assert_eq!(fin.registration_fee.as_deref(), Some("R$ 120,00"));
        assert_eq!(fin.starting_salary.as_deref(), Some("R$ 8.500,00"));
    }

    #[test]
    fn test_salary_from_keyword_window() {
        let fin = extract_financeiro("O salário mensal será de R$ 3.000,00 acrescido de benefícios.");
        assert_eq!(fin.starting_salary.as_deref(), Some("R$ 3.000,00"));
        assert_eq!(fin.registration_fee.as_deref(), Some("R$ 3.000,00"));
    }

    #[test]
    fn test_serialized_names() {
        let json = serde_json::to_value(extract_vagas(OFFER)).unwrap();
        assert_eq!(json["ampla_concorrencia"], 30);
        let json = serde_json::to_value(extract_financeiro(OFFER)).unwrap();
        assert_eq!(json["taxa_inscricao"], "R$ 120,00");
    }
}
