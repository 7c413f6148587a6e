//! # Corpus de Editais de Demonstração
//!
//! Trechos de editais fictícios, escritos para exercitar as formas que os
//! textos extraídos de PDF costumam ter:
//!
//! - seção "CRONOGRAMA" com datas fora dela que não devem ser usadas;
//! - tabela "DATAS IMPORTANTES" quebrada pela conversão, com URL no meio;
//! - edital sem seção, com data única e intervalo para a mesma prova;
//! - datas em formato solto, que só o fallback por rótulos reconhece.
//!
//! Cada edital traz as datas esperadas do motor principal, usadas como teste
//! de regressão.

/// Datas esperadas de [`extract`](crate::resolver::extract), em ISO.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpectedDates {
    pub registration_start: Option<&'static str>,
    pub registration_end: Option<&'static str>,
    pub exemption_start: Option<&'static str>,
    pub exam_date: Option<&'static str>,
}

/// Um edital de demonstração.
pub struct DemoEdital {
    pub title: &'static str,
    pub text: &'static str,
    pub expected: ExpectedDates,
}

/// Retorna os editais de demonstração.
pub fn demo_editais() -> Vec<DemoEdital> {
    vec![
        DemoEdital {
            title: "Tribunal: seção de cronograma",
            text: "TRIBUNAL REGIONAL FEDERAL DA 9ª REGIÃO\nEDITAL Nº 1/2026, DE 5 DE JANEIRO DE 2026\nCargo: Analista Judiciário\nO concurso será executado pela Fundação Getulio Vargas (FGV).\nTotal de vagas: 40\nTaxa de inscrição: R$ 120,00\nAs inscrições do concurso anterior ocorreram em 01/01/2025 a 05/01/2025.\n\nCRONOGRAMA\nPeríodo de inscrições: 10/02/2026 a 15/02/2026.\nSolicitação de isenção: 11/02/2026.\nAplicação da prova objetiva: 20/03/2026.\nResultado final: 30/04/2026.\n\nANEXO I\nConteúdo programático.",
            expected: ExpectedDates {
                registration_start: Some("2026-02-10"),
                registration_end: Some("2026-02-15"),
                exemption_start: Some("2026-02-11"),
                exam_date: Some("2026-03-20"),
            },
        },
        DemoEdital {
            title: "Prefeitura: tabela quebrada",
            text: "PREFEITURA MUNICIPAL DE EXEMPLO\nEDITAL DE ABERTURA Nº 02/2026\nDATAS IMPORTANTES\nEvento Data\n10/03/2026 a https://www.exemplo.gov.br/concurso\nPeríodo de inscrições\n20/03/2026\nSolicitação de isenção da taxa\n12/03/2026\nRealização das provas Entre\n05/04/2026 e 06/04/2026\nDivulgação do resultado: 30/04/2026\n\n1. DAS DISPOSIÇÕES PRELIMINARES\nO concurso reger-se-á por este edital.",
            expected: ExpectedDates {
                registration_start: Some("2026-03-10"),
                registration_end: Some("2026-03-20"),
                exemption_start: Some("2026-03-12"),
                exam_date: Some("2026-04-05"),
            },
        },
        DemoEdital {
            title: "Universidade: prova em duas etapas",
            text: "UNIVERSIDADE FEDERAL DE EXEMPLO\nEDITAL Nº 45/2026\nCONCURSO PÚBLICO PARA PROVIMENTO DE PROFESSOR DO MAGISTÉRIO SUPERIOR\nO certame será conduzido por comissão examinadora designada pela Reitoria.\nAs inscrições serão recebidas Entre\n02/03/2026 e 31/03/2026.\nA prova escrita será aplicada em 10/05/2026.\nA prova didática ocorrerá de 20/05/2026 a 22/05/2026.\nPublicado em 15 de fevereiro de 2026.",
            expected: ExpectedDates {
                registration_start: Some("2026-03-02"),
                registration_end: Some("2026-03-31"),
                exemption_start: None,
                exam_date: Some("2026-05-20"),
            },
        },
        DemoEdital {
            title: "Autarquia: datas em formato solto",
            text: "SERVIÇO AUTÔNOMO DE ÁGUA E ESGOTO\nEDITAL DE ABERTURA Nº 7/2026\nBanca organizadora: realizada por Instituto Alfa de Concursos.\nVagas: 12 (PcD: 1)\nRemuneração: R$ 4.250,00\nCRONOGRAMA\nRecebimento de inscrições: 1/6/2026 até 30.6.2026\nData provável da prova: 9.8.2026\nANEXO I\nAtribuições do cargo.",
            expected: ExpectedDates::default(),
        },
    ]
}

/// Pares (título, texto) exibidos pela interface web.
pub fn demo_texts() -> Vec<(&'static str, &'static str)> {
    demo_editais()
        .into_iter()
        .map(|demo| (demo.title, demo.text))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::EditalExtractor;
    use crate::resolver::extract;

    fn iso(date: Option<chrono::NaiveDate>) -> Option<String> {
        date.map(|d| d.format("%Y-%m-%d").to_string())
    }

    #[test]
    fn test_demo_editais_expected_dates() {
        for demo in demo_editais() {
            let result = extract(demo.text);
            let expected = demo.expected;
            assert_eq!(
                iso(result.registration_start).as_deref(),
                expected.registration_start,
                "{}",
                demo.title
            );
            assert_eq!(
                iso(result.registration_end).as_deref(),
                expected.registration_end,
                "{}",
                demo.title
            );
            assert_eq!(
                iso(result.exemption_start).as_deref(),
                expected.exemption_start,
                "{}",
                demo.title
            );
            assert_eq!(
                iso(result.exam_date).as_deref(),
                expected.exam_date,
                "{}",
                demo.title
            );
        }
    }

    #[test]
    fn test_loose_demo_resolved_by_summary() {
        let demos = demo_editais();
        let loose = demos.last().unwrap();
        let summary = EditalExtractor::default().summarize(loose.text);
        assert_eq!(iso(summary.cronograma.registration_start).as_deref(), Some("2026-06-01"));
        assert_eq!(iso(summary.cronograma.registration_end).as_deref(), Some("2026-06-30"));
        assert_eq!(iso(summary.cronograma.exam_date).as_deref(), Some("2026-08-09"));
        assert_eq!(summary.vagas.total, Some(12));
        assert_eq!(summary.vagas.pcd, Some(1));
        assert_eq!(summary.financeiro.starting_salary.as_deref(), Some("R$ 4.250,00"));
    }

    #[test]
    fn test_demo_texts_titles() {
        let texts = demo_texts();
        assert_eq!(texts.len(), demo_editais().len());
        assert!(texts.iter().all(|(title, text)| !title.is_empty() && !text.is_empty()));
    }
}
