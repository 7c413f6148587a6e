//! # Extração de Eventos em Duas Estratégias
//!
//! Um evento é uma data (ou intervalo) associada a um rótulo e uma categoria.
//! Os eventos são encontrados de dois jeitos complementares:
//!
//! - **Contexto** (data → rótulo): para cada bloco de data, olha até
//!   150 caracteres para trás, descarta notas de portal, fica com o trecho
//!   após o último ponto e o classifica com [`classify`].
//! - **Palavra-chave** (rótulo → data): para cada ocorrência de
//!   inscrição/isenção/prova, procura a primeira data válida nos 200
//!   caracteres seguintes. A categoria vem da própria palavra-chave.
//!
//! As duas estratégias compartilham um único conjunto de deduplicação, local
//! à chamada. A saída traz primeiro os eventos de contexto, em ordem de texto,
//! e depois os de palavra-chave agrupados na ordem da lista de palavras-chave.

use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::classifier::{classify, Category, Tier};
use crate::dates::{find_date_blocks, parse_date_block, try_parse_date_block, DateRange};
use crate::normalizer::normalize;
use crate::text::{back_chars, forward_chars, prefix_chars};

/// Caracteres examinados antes de uma data para achar seu rótulo.
pub const CONTEXT_WINDOW: usize = 150;
/// Caracteres examinados após uma palavra-chave para achar sua data.
pub const FORWARD_WINDOW: usize = 200;
/// Caracteres antes da palavra-chave incluídos no rótulo.
pub const LABEL_BEFORE: usize = 50;
/// Caracteres a partir da palavra-chave incluídos no rótulo.
pub const LABEL_AFTER: usize = 100;
/// Prefixo do rótulo que entra na chave de deduplicação por contexto.
const LABEL_KEY_PREFIX: usize = 50;

static INFO_NOTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Nota Informativa.*").expect("INFO_NOTE_RE compila"));

static TRAILING_CONNECTORS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[:\-–]+$").expect("TRAILING_CONNECTORS_RE compila"));

/// Palavras-chave da estratégia direta, na ordem em que são varridas.
static KEYWORDS: LazyLock<Vec<(Regex, Category)>> = LazyLock::new(|| {
    [
        (r"(?i)inscri[çc][õo]es?", Category::Registration),
        (r"(?i)isen[çc][ãa]o", Category::FeeExemption),
        (
            r"(?i)(?:aplica[çc][ãa]o\s+da\s+)?provas?(?:\s+objetivas?)?",
            Category::ExamDate,
        ),
        (r"(?i)realiza[çc][ãa]o\s+da\s+provas?", Category::ExamDate),
    ]
    .into_iter()
    .map(|(pattern, category)| {
        (
            Regex::new(pattern).expect("palavra-chave compila"),
            category,
        )
    })
    .collect()
});

/// Como um evento foi encontrado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Data → rótulo (olhando para trás).
    Context,
    /// Palavra-chave → data (olhando para frente).
    Keyword,
}

/// Um evento datado do cronograma. Vive apenas durante uma extração.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub label: String,
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
    pub category: Category,
    pub tier: Tier,
    pub strategy: Strategy,
}

impl Event {
    fn new(label: String, range: DateRange, category: Category, strategy: Strategy) -> Self {
        let tier = Tier::of(category, &label);
        Self {
            label,
            start: range.start,
            end: range.end,
            category,
            tier,
            strategy,
        }
    }

    pub fn range(&self) -> DateRange {
        DateRange {
            start: self.start,
            end: self.end,
        }
    }
}

/// Chave de deduplicação compartilhada entre as estratégias.
///
/// Eventos de contexto incluem o prefixo do rótulo para não fundir eventos
/// distintos no mesmo dia; eventos de palavra-chave não.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DedupKey {
    start: NaiveDate,
    end: Option<NaiveDate>,
    category: Category,
    label_prefix: Option<String>,
}

/// Extrator de eventos com as duas estratégias e deduplicação por chamada.
#[derive(Debug, Default)]
pub struct DualStrategyExtractor {
    seen: HashSet<DedupKey>,
    events: Vec<Event>,
}

impl DualStrategyExtractor {
    /// Normaliza o texto e devolve todos os eventos encontrados.
    pub fn extract(text: &str) -> Vec<Event> {
        let normalized = normalize(text);
        let mut extractor = Self::default();
        extractor.context_pass(&normalized);
        extractor.keyword_pass(&normalized);
        extractor.events
    }

    fn push(&mut self, event: Event, label_prefix: Option<String>) -> bool {
        let key = DedupKey {
            start: event.start,
            end: event.end,
            category: event.category,
            label_prefix,
        };
        if self.seen.insert(key) {
            tracing::trace!(
                category = event.category.code(),
                tier = event.tier.code(),
                start = %event.start,
                "evento registrado"
            );
            self.events.push(event);
            true
        } else {
            false
        }
    }

    /// Estratégia de contexto: cada data procura seu rótulo para trás.
    fn context_pass(&mut self, text: &str) {
        for block in find_date_blocks(text) {
            let range = match try_parse_date_block(block.text) {
                Ok(range) => range,
                Err(e) => {
                    tracing::trace!(block = block.text, %e, "bloco de datas inválido descartado");
                    continue;
                }
            };
            let context_start = back_chars(text, block.start, CONTEXT_WINDOW);
            let label = context_label(&text[context_start..block.start]);
            let category = classify(&label);
            let prefix = prefix_chars(&label, LABEL_KEY_PREFIX).to_string();
            self.push(
                Event::new(label, range, category, Strategy::Context),
                Some(prefix),
            );
        }
    }

    /// Estratégia de palavra-chave: cada ocorrência procura sua data à frente.
    fn keyword_pass(&mut self, text: &str) {
        for (pattern, category) in KEYWORDS.iter() {
            for keyword in pattern.find_iter(text) {
                let window_end = forward_chars(text, keyword.start(), FORWARD_WINDOW);
                let window = &text[keyword.start()..window_end];
                for block in find_date_blocks(window) {
                    let Some(range) = parse_date_block(block.text) else {
                        continue;
                    };
                    let label_start = back_chars(text, keyword.start(), LABEL_BEFORE);
                    let label_end = forward_chars(text, keyword.start(), LABEL_AFTER);
                    let label = strip_connectors(&text[label_start..label_end]);
                    // só a primeira data nova de cada ocorrência
                    if self.push(Event::new(label, range, *category, Strategy::Keyword), None) {
                        break;
                    }
                }
            }
        }
    }
}

/// Rótulo de um evento a partir do texto que antecede a data.
fn context_label(context: &str) -> String {
    let cleaned = INFO_NOTE_RE.replace_all(context, "");
    let last_sentence = cleaned.trim().rsplit('.').next().unwrap_or_default();
    strip_connectors(last_sentence)
}

/// Remove espaços e conectores finais (":", "-", "–").
fn strip_connectors(text: &str) -> String {
    TRAILING_CONNECTORS_RE
        .replace(text.trim(), "")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_context_label() {
        assert_eq!(context_label("Período de inscrição: "), "Período de inscrição");
        assert_eq!(
            context_label("Resultado publicado. Prazo de recurso - "),
            "Prazo de recurso"
        );
        assert_eq!(
            context_label("Aplicação da prova Nota Informativa nº 3 do portal\n"),
            "Aplicação da prova"
        );
    }

    #[test]
    fn test_simple_date_extraction() {
        let events = DualStrategyExtractor::extract("Inscrição 10/02/2026");
        assert!(!events.is_empty());
        assert_eq!(events[0].start, ymd(2026, 2, 10));
        assert_eq!(events[0].category, Category::Registration);
        assert_eq!(events[0].strategy, Strategy::Context);
    }

    #[test]
    fn test_date_range_extraction() {
        let events = DualStrategyExtractor::extract("Inscrição 10/02/2026 a 20/02/2026");
        assert_eq!(events[0].start, ymd(2026, 2, 10));
        assert_eq!(events[0].end, Some(ymd(2026, 2, 20)));
    }

    #[test]
    fn test_no_dates_in_text() {
        let events =
            DualStrategyExtractor::extract("Texto qualquer sem nenhuma data, inscrições em breve");
        assert!(events.is_empty());
    }

    #[test]
    fn test_invalid_dates_are_dropped() {
        let events = DualStrategyExtractor::extract("Resultado 31/02/2026. Recurso 99/99/9999.");
        assert!(events.is_empty());
    }

    #[test]
    fn test_context_events_precede_keyword_events() {
        let text = "Período de inscrições: 10/02/2026 a 15/02/2026.\nIsenção: 12/02/2026.\nProva objetiva: 20/03/2026.";
        let events = DualStrategyExtractor::extract(text);

        let strategies: Vec<Strategy> = events.iter().map(|e| e.strategy).collect();
        let first_keyword = strategies
            .iter()
            .position(|s| *s == Strategy::Keyword)
            .unwrap();
        assert!(strategies[..first_keyword]
            .iter()
            .all(|s| *s == Strategy::Context));
        assert!(strategies[first_keyword..]
            .iter()
            .all(|s| *s == Strategy::Keyword));

        let keyword_categories: Vec<Category> = events[first_keyword..]
            .iter()
            .map(|e| e.category)
            .collect();
        assert_eq!(
            keyword_categories,
            vec![Category::Registration, Category::FeeExemption, Category::ExamDate]
        );
    }

    #[test]
    fn test_keyword_takes_first_date_only() {
        let text = "Inscrições: de 10/02/2026 a 15/02/2026, prorrogáveis até 20/02/2026.";
        let events = DualStrategyExtractor::extract(text);
        let keyword_events: Vec<&Event> = events
            .iter()
            .filter(|e| e.strategy == Strategy::Keyword)
            .collect();
        assert_eq!(keyword_events.len(), 1);
        assert_eq!(keyword_events[0].range(), DateRange::between(ymd(2026, 2, 10), ymd(2026, 2, 15)));
    }

    #[test]
    fn test_duplicate_events_are_dropped() {
        let text = "Inscrições 10/02/2026 a 15/02/2026.\nInscrições 10/02/2026 a 15/02/2026.";
        let events = DualStrategyExtractor::extract(text);
        // um evento de contexto e um de palavra-chave
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].strategy, Strategy::Context);
        assert_eq!(events[1].strategy, Strategy::Keyword);
    }

    #[test]
    fn test_keyword_event_bypasses_classifier() {
        // o rótulo de contexto da data é "Recurso"; a palavra-chave "isenção" vem antes
        let text = "Pedido de isenção. Recurso 05/03/2026";
        let events = DualStrategyExtractor::extract(text);
        let context = events.iter().find(|e| e.strategy == Strategy::Context).unwrap();
        assert_eq!(context.category, Category::Appeal);
        let keyword = events.iter().find(|e| e.strategy == Strategy::Keyword).unwrap();
        assert_eq!(keyword.category, Category::FeeExemption);
        assert_eq!(keyword.tier, Tier::High);
    }

    #[test]
    fn test_keyword_ignores_dates_beyond_forward_window() {
        let text = format!("Inscrições {} 10/02/2026", "x".repeat(FORWARD_WINDOW));
        let events = DualStrategyExtractor::extract(&text);
        assert!(events.iter().all(|e| e.strategy == Strategy::Context));
    }

    #[test]
    fn test_forward_window_cuts_range_to_single_date() {
        // o intervalo começa no caractere 190; a data final fica fora da janela
        let text = format!("Inscrições {} 10/02/2026 a 15/02/2026", "x".repeat(178));
        let events = DualStrategyExtractor::extract(&text);
        let keyword: Vec<DateRange> = events
            .iter()
            .filter(|e| e.strategy == Strategy::Keyword)
            .map(Event::range)
            .collect();
        assert_eq!(keyword, vec![DateRange::single(ymd(2026, 2, 10))]);
        let context = events.iter().find(|e| e.strategy == Strategy::Context).unwrap();
        assert_eq!(context.end, Some(ymd(2026, 2, 15)));
    }

    #[test]
    fn test_context_window_limits_classification() {
        let far = format!("Isenção {} 12/02/2026", "x".repeat(CONTEXT_WINDOW));
        let events = DualStrategyExtractor::extract(&far);
        let context = events.iter().find(|e| e.strategy == Strategy::Context).unwrap();
        assert_eq!(context.category, Category::Other);

        let near = format!("Isenção {} 12/02/2026", "x".repeat(100));
        let events = DualStrategyExtractor::extract(&near);
        let context = events.iter().find(|e| e.strategy == Strategy::Context).unwrap();
        assert_eq!(context.category, Category::FeeExemption);
    }

    #[test]
    fn test_same_day_context_events_with_distinct_labels_are_kept() {
        let text = "Resultado preliminar: 20/03/2026. Resultado definitivo: 20/03/2026.";
        let events = DualStrategyExtractor::extract(text);
        let labels: Vec<&str> = events.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Resultado preliminar", "Resultado definitivo"]);
        assert!(events.iter().all(|e| e.category == Category::Result));
        assert!(events.iter().all(|e| e.start == ymd(2026, 3, 20)));
    }
}
