//! # Classificação de Eventos do Cronograma
//!
//! Associa o rótulo próximo a uma data a uma categoria semântica por
//! **contenção de substring**, sem diferenciar maiúsculas, em ordem fixa de
//! prioridade. A primeira categoria cujo radical aparece no rótulo vence,
//! mesmo que radicais de categorias posteriores também apareçam.
//!
//! | Prioridade | Categoria      | Radicais                                         |
//! |------------|----------------|--------------------------------------------------|
//! | 1          | `FeeExemption` | isen                                             |
//! | 2          | `Registration` | inscri                                           |
//! | 3          | `ExamDate`     | prova, aplicac, aplicaç, realizac, realizaç      |
//! | 4          | `Result`       | resultado                                        |
//! | 5          | `Appeal`       | recurso                                          |
//! | 6          | `Publication`  | publica                                          |
//! | —          | `Other`        | (nenhum)                                         |
//!
//! A isenção vem antes da inscrição porque "isenção da taxa de inscrição"
//! contém os dois radicais e a categoria mais rara e específica deve vencer.

use serde::{Deserialize, Serialize};

/// Categoria semântica de um evento do cronograma.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Período de inscrições.
    Registration,
    /// Solicitação de isenção da taxa de inscrição.
    FeeExemption,
    /// Aplicação/realização das provas.
    ExamDate,
    Result,
    Appeal,
    Publication,
    Other,
}

impl Category {
    /// Código curto usado nos logs (ex: "inscricao").
    pub fn code(&self) -> &'static str {
        match self {
            Category::Registration => "inscricao",
            Category::FeeExemption => "isencao",
            Category::ExamDate => "prova",
            Category::Result => "resultado",
            Category::Appeal => "recurso",
            Category::Publication => "publicacao",
            Category::Other => "outro",
        }
    }

    /// Radicais cuja presença no rótulo comprova a categoria.
    ///
    /// Só as três categorias que alimentam campos de saída têm radicais de
    /// confirmação; para as demais a lista é vazia.
    fn confirming_stems(&self) -> &'static [&'static str] {
        match self {
            Category::Registration => &["inscri"],
            Category::FeeExemption => &["isen"],
            Category::ExamDate => &["prova", "aplica", "realiza"],
            _ => &[],
        }
    }
}

/// Tabela de classificação em ordem de prioridade.
const CLASSIFICATION_STEMS: &[(Category, &[&str])] = &[
    (Category::FeeExemption, &["isen"]),
    (Category::Registration, &["inscri"]),
    (
        Category::ExamDate,
        &["prova", "aplicac", "aplicaç", "realizac", "realizaç"],
    ),
    (Category::Result, &["resultado"]),
    (Category::Appeal, &["recurso"]),
    (Category::Publication, &["publica"]),
];

/// Nível de confiança de um evento.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// O rótulo contém literalmente o radical que define a categoria.
    High,
    /// A categoria veio só do contexto; o radical não está no rótulo.
    Low,
}

impl Tier {
    /// Calcula o nível de um evento a partir da categoria e do rótulo.
    pub fn of(category: Category, label: &str) -> Self {
        let lower = label.to_lowercase();
        if category
            .confirming_stems()
            .iter()
            .any(|stem| lower.contains(stem))
        {
            Tier::High
        } else {
            Tier::Low
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Tier::High => "HC",
            Tier::Low => "LC",
        }
    }
}

/// Classifica um rótulo; a primeira categoria da tabela que casar vence.
pub fn classify(label: &str) -> Category {
    let lower = label.to_lowercase();
    CLASSIFICATION_STEMS
        .iter()
        .find(|(_, stems)| stems.iter().any(|stem| lower.contains(stem)))
        .map_or(Category::Other, |(category, _)| *category)
}
