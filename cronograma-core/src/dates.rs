//! # Gramática de Datas — Reconhecimento e Conversão
//!
//! Editais expressam datas em três formas, todas com tokens `DD/MM/AAAA`:
//!
//! | Forma                         | Exemplo                          | Resultado                 |
//! |-------------------------------|----------------------------------|---------------------------|
//! | Intervalo com "a"             | `10/02/2026 a 20/02/2026`        | (2026-02-10, 2026-02-20)  |
//! | "Entre" com "e"/"a" opcional  | `Entre 10/02/2026 e 20/02/2026`  | (2026-02-10, 2026-02-20)  |
//! | Data única                    | `10/02/2026`                     | (2026-02-10, —)           |
//!
//! O [`find_date_blocks`] localiza os blocos da esquerda para a direita, sem
//! sobreposição, testando as alternativas nessa ordem de prioridade em cada
//! posição. O [`parse_date_block`] converte um bloco em [`DateRange`]; qualquer
//! token inválido descarta o bloco inteiro (não há resultados parciais).

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::DateError;

/// Alternância de blocos de data, em ordem de prioridade.
static DATE_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\d{2}/\d{2}/\d{4}\s*a\s*\d{2}/\d{2}/\d{4}|Entre\s+\d{2}/\d{2}/\d{4}(?:\s*(?:e|a)\s*\d{2}/\d{2}/\d{4})?|\d{2}/\d{2}/\d{4}",
    )
    .expect("DATE_BLOCK_RE compila")
});

/// Um único token `DD/MM/AAAA`.
static DATE_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{2}/\d{2}/\d{4}").expect("DATE_TOKEN_RE compila"));

/// Datas por extenso: "12 de março de 2026".
static LONG_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(\d{1,2})\s+de\s+(\w+)\s+de\s+(\d{4})\s*$").expect("LONG_DATE_RE compila")
});

/// Nomes de mês aceitos em datas por extenso (com e sem acento).
const MONTHS: &[(&str, u32)] = &[
    ("janeiro", 1),
    ("fevereiro", 2),
    ("março", 3),
    ("marco", 3),
    ("abril", 4),
    ("maio", 5),
    ("junho", 6),
    ("julho", 7),
    ("agosto", 8),
    ("setembro", 9),
    ("outubro", 10),
    ("novembro", 11),
    ("dezembro", 12),
];

/// Um trecho do texto reconhecido pela gramática de datas.
///
/// `start` e `end` são offsets de byte, como os de `regex::Match`; as janelas
/// medidas em caracteres partem deles via `back_chars`/`forward_chars`
/// (módulo `text`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateBlock<'a> {
    /// O texto do bloco (ex: "Entre 10/02/2026 e 20/02/2026").
    pub text: &'a str,
    /// Offset de byte inicial no texto pesquisado (inclusive).
    pub start: usize,
    /// Offset de byte final no texto pesquisado (exclusivo).
    pub end: usize,
}

/// Par de datas de calendário; `end` é `None` para datas únicas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn single(start: NaiveDate) -> Self {
        Self { start, end: None }
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }
}

/// Todos os blocos de data do texto, em ordem, sem sobreposição.
pub fn find_date_blocks(text: &str) -> Vec<DateBlock<'_>> {
    DATE_BLOCK_RE
        .find_iter(text)
        .map(|m| DateBlock {
            text: m.as_str(),
            start: m.start(),
            end: m.end(),
        })
        .collect()
}

/// Interpreta um token `DD/MM/AAAA` (espaços ao redor são ignorados).
///
/// Dia e mês aceitam um ou dois dígitos; o ano exige quatro.
pub fn parse_br_date(token: &str) -> Result<NaiveDate, DateError> {
    let trimmed = token.trim();
    let mut parts = trimmed.split('/');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(day), Some(month), Some(year), None) => date_from_parts(day, month, year),
        _ => Err(DateError::Malformed(trimmed.to_string())),
    }
}

/// Monta uma data a partir de componentes textuais já separados.
pub fn date_from_parts(day: &str, month: &str, year: &str) -> Result<NaiveDate, DateError> {
    let raw = format!("{day}/{month}/{year}");
    let numeric = |s: &str, min: usize, max: usize| {
        (min..=max).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
    };
    if !numeric(day, 1, 2) || !numeric(month, 1, 2) || !numeric(year, 4, 4) {
        return Err(DateError::Malformed(raw));
    }
    let (Ok(d), Ok(m), Ok(y)) = (day.parse::<u32>(), month.parse::<u32>(), year.parse::<i32>())
    else {
        return Err(DateError::Malformed(raw));
    };
    NaiveDate::from_ymd_opt(y, m, d).ok_or(DateError::OutOfRange(raw))
}

/// Interpreta datas por extenso como "12 de março de 2026".
pub fn parse_long_date(text: &str) -> Result<NaiveDate, DateError> {
    let caps = LONG_DATE_RE
        .captures(text)
        .ok_or_else(|| DateError::Malformed(text.trim().to_string()))?;
    let month_name = caps[2].to_lowercase();
    let month = MONTHS
        .iter()
        .find(|(name, _)| *name == month_name)
        .map(|(_, m)| *m)
        .ok_or_else(|| DateError::Malformed(text.trim().to_string()))?;
    date_from_parts(&caps[1], &month.to_string(), &caps[3])
}

/// Converte `DD/MM/AAAA` para ISO `AAAA-MM-DD`; `None` se inválida.
pub fn to_iso(token: &str) -> Option<String> {
    parse_br_date(token)
        .ok()
        .map(|d| d.format("%Y-%m-%d").to_string())
}

/// Converte um bloco reconhecido em intervalo de datas; `None` se inválido.
pub fn parse_date_block(block: &str) -> Option<DateRange> {
    try_parse_date_block(block).ok()
}

/// Versão falível de [`parse_date_block`], preservando o motivo da falha.
pub fn try_parse_date_block(block: &str) -> Result<DateRange, DateError> {
    let block = block.trim();

    // "Entre" tem prioridade sobre o separador " a "
    if block.to_lowercase().starts_with("entre") {
        let tokens: Vec<&str> = DATE_TOKEN_RE.find_iter(block).map(|m| m.as_str()).collect();
        return match tokens.as_slice() {
            [first, second] => Ok(DateRange::between(
                parse_br_date(first)?,
                parse_br_date(second)?,
            )),
            [only] => Ok(DateRange::single(parse_br_date(only)?)),
            _ => Err(DateError::EmptyBlock(block.to_string())),
        };
    }

    let parts: Vec<&str> = block.split(" a ").collect();
    if let [first, second] = parts.as_slice() {
        return Ok(DateRange::between(
            parse_br_date(first)?,
            parse_br_date(second)?,
        ));
    }

    parse_br_date(block).map(DateRange::single)
}
