//! # cronograma-core — Extração de Cronogramas de Editais de Concurso
//!
//! Este crate lê o texto (já extraído do PDF) de um edital de concurso público
//! brasileiro e encontra as datas-chave do certame: início e fim das
//! inscrições, início do pedido de isenção da taxa e data da prova.
//!
//! ## Arquitetura do Sistema
//!
//! O motor é uma função pura, sem estado compartilhado entre chamadas:
//!
//! 1.  **Entrada**: texto bruto do edital (pode ser vazio).
//! 2.  **Seção** ([`section`]): recorta o bloco "CRONOGRAMA"/"DATAS IMPORTANTES".
//! 3.  **Normalização** ([`normalizer`]): repara quebras de linha e tabelas do PDF.
//! 4.  **Eventos** ([`extractor`]): duas estratégias encontram pares rótulo/data,
//!     classificados por [`classifier`] e interpretados por [`dates`].
//! 5.  **Resolução** ([`resolver`]): eventos de alta confiança primeiro; um
//!     intervalo de prova sempre vence uma data única.
//! 6.  **Saída**: [`CronogramaResult`] com quatro datas opcionais.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use cronograma_core::extract;
//!
//! let text = "Período de inscrição: 10/02/2026 a 15/02/2026\nIsenção: 12/02/2026\nProva: 20/02/2026";
//! let result = extract(text);
//!
//! assert_eq!(result.registration_start.unwrap().to_string(), "2026-02-10");
//! assert_eq!(result.registration_end.unwrap().to_string(), "2026-02-15");
//! assert_eq!(result.exemption_start.unwrap().to_string(), "2026-02-12");
//! assert_eq!(result.exam_date.unwrap().to_string(), "2026-02-20");
//! ```
//!
//! ## Módulos Principais
//!
//! - [`resolver`]: ponto de entrada ([`extract`], [`extract_batch`]).
//! - [`pipeline`]: a mesma extração com eventos observáveis, e o resumo do
//!   edital completo ([`EditalExtractor`]).
//! - [`metadata`], [`offer`]: órgão, banca, cargo, vagas e valores.
//! - [`corpus`]: editais de demonstração.

pub mod classifier;
pub mod corpus;
pub mod dates;
pub mod error;
pub mod extractor;
pub mod fallback;
pub mod metadata;
pub mod normalizer;
pub mod offer;
pub mod pipeline;
pub mod resolver;
pub mod section;
pub mod whitelist;

mod text;

pub use classifier::{classify, Category, Tier};
pub use dates::{parse_date_block, to_iso, DateRange};
pub use error::{DateError, WhitelistError};
pub use extractor::{DualStrategyExtractor, Event};
pub use normalizer::normalize;
pub use pipeline::{extract_streaming, EditalExtractor, EditalSummary, PipelineEvent};
pub use resolver::{extract, extract_batch, CronogramaResult};
pub use whitelist::Whitelists;
