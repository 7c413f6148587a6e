//! # Localização da Seção de Cronograma
//!
//! Editais costumam concentrar as datas numa seção "CRONOGRAMA" ou "DATAS
//! IMPORTANTES". Restringir a busca a essa seção evita que datas de outros
//! capítulos (concursos anteriores, vigência, legislação) disputem os campos.
//!
//! A seção começa na linha seguinte ao título e termina antes da primeira
//! linha que abra outro bloco do edital:
//!
//! - `ANEXO …` ou `CAPÍTULO …` (qualquer caixa);
//! - um título numerado como `4. DAS PROVAS`.
//!
//! O corpo precisa ter ao menos [`MIN_SECTION_CHARS`] caracteres e no máximo
//! [`MAX_SECTION_CHARS`]. Sem terminador dentro do limite, o corpo vai até o
//! fim do texto se couber; senão o título é ignorado e o próximo é tentado.

use std::sync::LazyLock;

use regex::Regex;

use crate::text::forward_chars;

/// Tamanho mínimo do corpo da seção, em caracteres.
pub const MIN_SECTION_CHARS: usize = 100;
/// Tamanho máximo do corpo da seção, em caracteres.
pub const MAX_SECTION_CHARS: usize = 12_000;

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:CRONOGRAMA|DATAS?\s+IMPORTANTES?)[^\n]*\n").expect("HEADING_RE compila")
});

static TERMINATOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n\s*(?:(?i:ANEXO|CAPÍTULO)|\d+\.\s+\p{Lu})").expect("TERMINATOR_RE compila")
});

/// Seção de cronograma encontrada no texto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section<'a> {
    /// Linha do título, sem a quebra final.
    pub heading: &'a str,
    /// Corpo da seção (sem o título).
    pub body: &'a str,
    /// Offset de byte do corpo no texto original.
    pub offset: usize,
}

/// Procura a primeira seção de cronograma válida.
pub fn locate_section(text: &str) -> Option<Section<'_>> {
    HEADING_RE.find_iter(text).find_map(|heading| {
        let body_start = heading.end();
        let rest = &text[body_start..];
        if rest.chars().nth(MIN_SECTION_CHARS - 1).is_none() {
            return None;
        }

        let min_end = forward_chars(text, body_start, MIN_SECTION_CHARS);
        let cap_end = forward_chars(text, body_start, MAX_SECTION_CHARS);
        let body_end = match TERMINATOR_RE.find_at(text, min_end) {
            Some(term) if term.start() <= cap_end => term.start(),
            _ if cap_end == text.len() => text.len(),
            _ => {
                tracing::debug!(
                    heading = heading.as_str().trim_end(),
                    "seção sem terminador dentro do limite; título ignorado"
                );
                return None;
            }
        };

        Some(Section {
            heading: heading.as_str().trim_end(),
            body: &text[body_start..body_end],
            offset: body_start,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILLER: &str = "Os eventos abaixo seguem o horário oficial de Brasília e podem ser alterados por comunicado oficial.";

    #[test]
    fn test_section_ends_at_annex() {
        let text = format!(
            "EDITAL Nº 1/2026\nCRONOGRAMA\n{FILLER}\nInscrições: 10/02/2026 a 15/02/2026.\n\nANEXO I\nConteúdo programático."
        );
        let section = locate_section(&text).unwrap();
        assert_eq!(section.heading, "CRONOGRAMA");
        assert!(section.body.starts_with("Os eventos"));
        assert!(section.body.ends_with("15/02/2026."));
        assert!(!section.body.contains("ANEXO"));
        assert_eq!(&text[section.offset..section.offset + 3], "Os ");
    }

    #[test]
    fn test_section_ends_at_numbered_heading() {
        let text = format!(
            "Datas importantes\n{FILLER}\nProva: 20/03/2026.\n5. DAS PROVAS\nAs provas terão duração de 4 horas."
        );
        let section = locate_section(&text).unwrap();
        assert_eq!(section.heading, "Datas importantes");
        assert!(section.body.ends_with("20/03/2026."));
    }

    #[test]
    fn test_section_runs_to_end_of_text() {
        let text = format!("CRONOGRAMA PREVISTO\n{FILLER}\nResultado final: 30/04/2026.");
        let section = locate_section(&text).unwrap();
        assert!(section.body.ends_with("30/04/2026."));
    }

    #[test]
    fn test_short_body_is_rejected() {
        assert!(locate_section("CRONOGRAMA\nProva: 20/03/2026.\n\nANEXO I").is_none());
    }

    #[test]
    fn test_terminator_inside_minimum_body_is_ignored() {
        let text = format!("CRONOGRAMA\nANEXO citado abaixo.\n{FILLER}\nANEXO II\nfim");
        let section = locate_section(&text).unwrap();
        assert!(section.body.starts_with("ANEXO citado"));
        assert!(!section.body.contains("ANEXO II"));
    }

    #[test]
    fn test_oversized_section_is_skipped() {
        let long_body = "x".repeat(MAX_SECTION_CHARS + 10);
        let text = format!("CRONOGRAMA\n{long_body}\nmais texto");
        assert!(locate_section(&text).is_none());
    }

    #[test]
    fn test_no_heading() {
        assert!(locate_section("Edital sem seção de datas.").is_none());
    }
}
