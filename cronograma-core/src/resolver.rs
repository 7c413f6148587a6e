//! # Resolução dos Campos do Cronograma
//!
//! Ponto de entrada do motor: [`extract`] recebe o texto do edital e devolve
//! um [`CronogramaResult`] com quatro campos opcionais.
//!
//! ## Fluxo
//!
//! 1. Procura a seção de cronograma ([`locate_section`]) e extrai eventos dela.
//! 2. Se não houver seção, ou se ela render menos de [`MIN_SECTION_EVENTS`]
//!    eventos, o resultado da seção é descartado e o documento inteiro é
//!    varrido (substituição, não mescla).
//! 3. Os eventos são separados por nível de confiança: primeiro os `HC`,
//!    depois os `LC`, cada grupo na ordem de descoberta. O primeiro evento de
//!    cada categoria preenche seu campo.
//! 4. Para a prova, um intervalo sempre vence uma data única, não importa
//!    qual foi encontrado antes.
//!
//! Nenhum erro escapa: ausência é sempre `None`.

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::classifier::{Category, Tier};
use crate::extractor::{DualStrategyExtractor, Event};
use crate::section::locate_section;

/// Eventos mínimos para que o resultado da seção seja aceito.
pub const MIN_SECTION_EVENTS: usize = 3;

/// As datas-chave de um edital. Datas serializam como `AAAA-MM-DD` ou `null`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CronogramaResult {
    pub registration_start: Option<NaiveDate>,
    pub registration_end: Option<NaiveDate>,
    pub exemption_start: Option<NaiveDate>,
    pub exam_date: Option<NaiveDate>,
}

impl CronogramaResult {
    /// Quantos campos foram preenchidos.
    pub fn populated(&self) -> usize {
        [
            self.registration_start,
            self.registration_end,
            self.exemption_start,
            self.exam_date,
        ]
        .iter()
        .filter(|f| f.is_some())
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.populated() == 0
    }
}

/// De onde vieram os eventos usados na resolução.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scope {
    /// Seção de cronograma aceita.
    Section { heading: String, events: usize },
    /// Nenhum título de cronograma encontrado.
    NoSection,
    /// A seção existia mas rendeu poucos eventos.
    InsufficientSection { heading: String, events: usize },
}

/// Eventos coletados de um texto e o escopo de onde vieram.
#[derive(Debug, Clone)]
pub struct Harvest {
    pub scope: Scope,
    pub events: Vec<Event>,
}

/// Coleta eventos da seção de cronograma ou, na falta dela, do texto inteiro.
pub fn collect_events(text: &str) -> Harvest {
    let Some(section) = locate_section(text) else {
        tracing::debug!("seção de cronograma não encontrada; usando o documento inteiro");
        return Harvest {
            scope: Scope::NoSection,
            events: DualStrategyExtractor::extract(text),
        };
    };

    let events = DualStrategyExtractor::extract(section.body);
    if events.len() >= MIN_SECTION_EVENTS {
        tracing::debug!(
            heading = section.heading,
            events = events.len(),
            "seção de cronograma aceita"
        );
        return Harvest {
            scope: Scope::Section {
                heading: section.heading.to_string(),
                events: events.len(),
            },
            events,
        };
    }

    tracing::debug!(
        heading = section.heading,
        events = events.len(),
        "seção com poucos eventos; usando o documento inteiro"
    );
    Harvest {
        scope: Scope::InsufficientSection {
            heading: section.heading.to_string(),
            events: events.len(),
        },
        events: DualStrategyExtractor::extract(text),
    }
}

/// Campo de saída preenchido por um evento.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Registration,
    Exemption,
    ExamDate,
    /// Intervalo de prova que substituiu a data única.
    ExamRange,
}

/// Registro de qual evento preencheu qual campo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldResolution {
    pub field: Field,
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
    pub tier: Tier,
    pub label: String,
}

impl FieldResolution {
    fn from_event(field: Field, event: &Event) -> Self {
        Self {
            field,
            start: event.start,
            end: event.end,
            tier: event.tier,
            label: event.label.clone(),
        }
    }
}

/// Resolve os campos a partir dos eventos.
pub fn resolve(events: &[Event]) -> CronogramaResult {
    resolve_traced(events).0
}

/// Como [`resolve`], devolvendo também as decisões tomadas, em ordem.
pub fn resolve_traced(events: &[Event]) -> (CronogramaResult, Vec<FieldResolution>) {
    let mut result = CronogramaResult::default();
    let mut trace = Vec::new();
    let mut exam_range: Option<&Event> = None;

    for tier in [Tier::High, Tier::Low] {
        for event in events.iter().filter(|e| e.tier == tier) {
            match event.category {
                Category::Registration if result.registration_start.is_none() => {
                    result.registration_start = Some(event.start);
                    result.registration_end = event.end;
                    trace.push(FieldResolution::from_event(Field::Registration, event));
                }
                Category::FeeExemption if result.exemption_start.is_none() => {
                    result.exemption_start = Some(event.start);
                    trace.push(FieldResolution::from_event(Field::Exemption, event));
                }
                Category::ExamDate => {
                    if event.end.is_some() {
                        exam_range.get_or_insert(event);
                    } else if result.exam_date.is_none() {
                        result.exam_date = Some(event.start);
                        trace.push(FieldResolution::from_event(Field::ExamDate, event));
                    }
                }
                _ => {}
            }
        }
    }

    if let Some(range) = exam_range {
        if result.exam_date.is_some_and(|single| single != range.start) {
            tracing::debug!(
                single = ?result.exam_date,
                range_start = %range.start,
                "intervalo de prova substitui a data única"
            );
        }
        result.exam_date = Some(range.start);
        trace.push(FieldResolution::from_event(Field::ExamRange, range));
    }

    for resolution in &trace {
        tracing::debug!(
            field = ?resolution.field,
            tier = resolution.tier.code(),
            start = %resolution.start,
            "campo resolvido"
        );
    }

    (result, trace)
}

/// Extrai as datas-chave do texto de um edital.
///
/// Texto vazio resulta em todos os campos `None`.
pub fn extract(text: &str) -> CronogramaResult {
    if text.trim().is_empty() {
        return CronogramaResult::default();
    }
    resolve(&collect_events(text).events)
}

/// Extrai vários editais em paralelo, preservando a ordem de entrada.
pub fn extract_batch(texts: &[&str]) -> Vec<CronogramaResult> {
    texts.par_iter().map(|text| extract(text)).collect()
}
