//! # Fallback por Rótulos Fixos
//!
//! Segunda linha de extração, usada pelo resumo do edital quando o motor
//! principal não resolve nenhum campo. Procura rótulos literais comuns
//! ("Recebimento de inscrições", "Data provável das provas", ...) seguidos de
//! datas em formatos mais soltos: dia e mês com um ou dois dígitos e
//! separadores `/`, `.` ou `-`.
//!
//! A busca é restrita ao trecho entre o título do cronograma e o próximo
//! `ANEXO` (até [`FALLBACK_SECTION_CHARS`] caracteres); sem esse trecho, o
//! texto inteiro é usado.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::{Captures, Regex};

use crate::dates::date_from_parts;
use crate::resolver::CronogramaResult;
use crate::text::forward_chars;

/// Tamanho máximo do trecho de cronograma usado pelo fallback.
pub const FALLBACK_SECTION_CHARS: usize = 8_000;

const LOOSE_DATE: &str = r"(\d{1,2})[./\-](\d{1,2})[./\-](\d{4})";

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)CRONOGRAMA|DATAS\s+IMPORTANTES").expect("HEADING_RE compila")
});

static ANNEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\nANEXO").expect("ANNEX_RE compila"));

fn labeled(label: &str, tail: &str) -> Regex {
    Regex::new(&format!(r"(?i){label}\s*[:\-]?\s*{tail}")).expect("padrão de fallback compila")
}

static REGISTRATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    let range = format!(r"{LOOSE_DATE}\s+(?:a|ate|até)\s+{LOOSE_DATE}");
    vec![
        labeled(r"Recebimento de Inscri[çc](?:ões|oes|ão|ao)", &range),
        labeled(r"Per[íi]odo de Inscri[çc](?:ões|oes|ão|ao)", &range),
    ]
});

static EXEMPTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![labeled(
        r"(?:Per[íi]odo de )?Solicita[çc][ãa]o de isen[çc][ãa]o",
        LOOSE_DATE,
    )]
});

static EXAM_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        labeled(
            r"Data prov[áa]vel (?:das|da) provas?",
            &format!(r"(?:Entre\s+)?{LOOSE_DATE}"),
        ),
        labeled(r"Data (?:das|da) provas?", LOOSE_DATE),
        labeled(r"Realiza[çc][ãa]o (?:das|da) provas?", LOOSE_DATE),
    ]
});

/// Trecho de cronograma para o fallback: do título até o próximo anexo ou
/// até uma quebra de linha final.
fn fallback_section(text: &str) -> Option<&str> {
    HEADING_RE.find_iter(text).find_map(|heading| {
        let start = heading.end();
        let cap = forward_chars(text, start, FALLBACK_SECTION_CHARS);
        let end = match ANNEX_RE.find_at(text, start) {
            Some(annex) if annex.start() <= cap => annex.start(),
            _ if text.ends_with('\n') && text.len() - 1 <= cap => text.len() - 1,
            _ => return None,
        };
        Some(&text[start..end])
    })
}

fn date_at(caps: &Captures<'_>, first_group: usize) -> Option<NaiveDate> {
    date_from_parts(
        &caps[first_group],
        &caps[first_group + 1],
        &caps[first_group + 2],
    )
    .ok()
}

fn first_match<'t>(patterns: &[Regex], text: &'t str) -> Option<Captures<'t>> {
    patterns.iter().find_map(|re| re.captures(text))
}

/// Extrai os campos do cronograma por rótulos fixos.
pub fn extract_labeled(text: &str) -> CronogramaResult {
    let scope = match fallback_section(text) {
        Some(section) => {
            tracing::debug!(chars = section.chars().count(), "fallback restrito ao cronograma");
            section
        }
        None => text,
    };

    let mut result = CronogramaResult::default();
    if let Some(caps) = first_match(&REGISTRATION_PATTERNS, scope) {
        result.registration_start = date_at(&caps, 1);
        result.registration_end = date_at(&caps, 4);
    }
    if let Some(caps) = first_match(&EXEMPTION_PATTERNS, scope) {
        result.exemption_start = date_at(&caps, 1);
    }
    if let Some(caps) = first_match(&EXAM_PATTERNS, scope) {
        result.exam_date = date_at(&caps, 1);
    }

    tracing::debug!(populated = result.populated(), "fallback por rótulos concluído");
    result
}
