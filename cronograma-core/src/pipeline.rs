//! # Pipeline de Extração — Orquestrador com Eventos Observáveis
//!
//! Executa o mesmo fluxo de [`extract`](crate::resolver::extract) emitindo um
//! [`PipelineEvent`] a cada decisão, via canal `mpsc`, para que o servidor
//! WebSocket possa mostrar o progresso em tempo real.
//!
//! Também reúne os extratores do edital completo em [`EditalExtractor`]:
//! metadados, vagas, valores e cronograma.

use std::sync::mpsc;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::extractor::Event;
use crate::fallback::extract_labeled;
use crate::metadata::{extract_metadata, EditalMetadata};
use crate::offer::{extract_financeiro, extract_vagas, Financeiro, Vagas};
use crate::resolver::{
    collect_events, extract, resolve_traced, CronogramaResult, FieldResolution, Scope,
};
use crate::whitelist::Whitelists;

/// Eventos emitidos durante a extração.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PipelineEvent {
    /// **Passo 1**: seção de cronograma aceita; os eventos vêm só dela.
    SectionLocated { heading: String, events: usize },
    /// **Passo 1**: sem seção utilizável; o documento inteiro foi varrido.
    SectionSkipped { reason: Scope },
    /// **Passo 2**: um evento datado encontrado, na ordem de descoberta.
    EventFound { index: usize, event: Event },
    /// **Passo 3**: um campo de saída preenchido.
    FieldResolved { resolution: FieldResolution },
    /// **Conclusão**: resultado final e estatísticas.
    Done {
        result: CronogramaResult,
        total_events: usize,
        processing_ms: u64,
    },
}

/// Executa a extração enviando eventos de progresso pelo canal `tx`.
///
/// # Fluxo de Eventos
/// 1. `SectionLocated` ou `SectionSkipped`.
/// 2. `EventFound` (loop): cada evento coletado.
/// 3. `FieldResolved` (loop): cada decisão de campo.
/// 4. `Done`: resultado consolidado.
///
/// Envios para um receptor já descartado são ignorados.
pub fn extract_streaming(text: &str, tx: mpsc::Sender<PipelineEvent>) {
    let start = Instant::now();

    if text.trim().is_empty() {
        let _ = tx.send(PipelineEvent::Done {
            result: CronogramaResult::default(),
            total_events: 0,
            processing_ms: start.elapsed().as_millis() as u64,
        });
        return;
    }

    // === Passo 1: escopo ===
    let harvest = collect_events(text);
    let _ = tx.send(match &harvest.scope {
        Scope::Section { heading, events } => PipelineEvent::SectionLocated {
            heading: heading.clone(),
            events: *events,
        },
        other => PipelineEvent::SectionSkipped {
            reason: other.clone(),
        },
    });

    // === Passo 2: eventos ===
    for (index, event) in harvest.events.iter().enumerate() {
        let _ = tx.send(PipelineEvent::EventFound {
            index,
            event: event.clone(),
        });
    }

    // === Passo 3: resolução ===
    let (result, trace) = resolve_traced(&harvest.events);
    for resolution in trace {
        let _ = tx.send(PipelineEvent::FieldResolved { resolution });
    }

    let _ = tx.send(PipelineEvent::Done {
        result,
        total_events: harvest.events.len(),
        processing_ms: start.elapsed().as_millis() as u64,
    });
}

/// Consome o fluxo de [`extract_streaming`] e devolve o resultado de `Done`.
pub fn extract_observed(text: &str) -> CronogramaResult {
    let (tx, rx) = mpsc::channel();
    extract_streaming(text, tx);
    let mut result = CronogramaResult::default();
    while let Ok(event) = rx.recv() {
        if let PipelineEvent::Done { result: done, .. } = event {
            result = done;
        }
    }
    result
}

/// Resumo estruturado de um edital.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditalSummary {
    pub metadata: EditalMetadata,
    pub vagas: Vagas,
    pub financeiro: Financeiro,
    pub cronograma: CronogramaResult,
}

/// Extrator do edital completo, com as whitelists explicitamente carregadas.
#[derive(Debug, Clone, Default)]
pub struct EditalExtractor {
    pub whitelists: Whitelists,
}

impl EditalExtractor {
    pub fn new(whitelists: Whitelists) -> Self {
        Self { whitelists }
    }

    /// Extrai metadados, vagas, valores e cronograma.
    ///
    /// O cronograma vem do motor principal; o fallback por rótulos só é
    /// consultado quando o motor não resolve nenhum campo.
    pub fn summarize(&self, text: &str) -> EditalSummary {
        let mut cronograma = extract(text);
        if cronograma.is_empty() && !text.trim().is_empty() {
            tracing::debug!("motor sem campos resolvidos; aplicando fallback por rótulos");
            cronograma = extract_labeled(text);
        }
        tracing::info!(cronograma = cronograma.populated(), "edital resumido");

        EditalSummary {
            metadata: extract_metadata(text, &self.whitelists),
            vagas: extract_vagas(text),
            financeiro: extract_financeiro(text),
            cronograma,
        }
    }
}
