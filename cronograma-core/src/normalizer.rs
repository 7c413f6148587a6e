//! # Normalização de Texto Extraído de PDF
//!
//! A conversão PDF → texto quebra linhas no meio de intervalos de datas,
//! separa rótulos de tabela das suas datas e deixa URLs de portais no meio
//! das linhas. Antes de procurar datas, o texto passa por uma sequência fixa
//! de reescritas; **a ordem importa** (a reparação de tabela precisa ver a URL
//! que depois será removida).
//!
//! | Passo | Reescrita                                                          |
//! |-------|--------------------------------------------------------------------|
//! | 1     | `DATA a <lixo>\nRÓTULO\nDATA` → `RÓTULO DATA a DATA`               |
//! | 2     | `inscrição…\nDATA` (idem isenção, prova) → uma linha               |
//! | 3     | remove `http(s)://…` e `www.…`                                     |
//! | 4     | `DATA a\nDATA` → `DATA a DATA`                                     |
//! | 5     | `Entre\nDATA` → `Entre DATA`                                       |
//! | 6     | `Entre DATA a <lixo> DATA` → `Entre DATA a DATA`                   |
//! | 7     | espaços/tabs repetidos → um espaço; 3+ quebras de linha → 2        |

use std::sync::LazyLock;

use regex::Regex;

/// Uma reescrita regex nomeada.
struct Rewrite {
    name: &'static str,
    pattern: Regex,
    replacement: &'static str,
}

impl Rewrite {
    fn new(name: &'static str, pattern: &str, replacement: &'static str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("padrão de normalização compila"),
            replacement,
        }
    }
}

static REWRITES: LazyLock<Vec<Rewrite>> = LazyLock::new(|| {
    vec![
        Rewrite::new(
            "table_row",
            r"(\d{2}/\d{2}/\d{4})\s+a\s+[^\n]*\n\s*([^\n]+)\n\s*(\d{2}/\d{2}/\d{4})",
            "${2} ${1} a ${3}",
        ),
        Rewrite::new(
            "registration_label",
            r"(?i)(inscri[çc][ãõ][^\n]{0,100})\n\s*(\d{2}/\d{2}/\d{4}(?:\s+a\s+\d{2}/\d{2}/\d{4})?)",
            "${1} ${2}",
        ),
        Rewrite::new(
            "exemption_label",
            r"(?i)(isen[çc][ãa]o[^\n]{0,100})\n\s*(\d{2}/\d{2}/\d{4}(?:\s+a\s+\d{2}/\d{2}/\d{4})?)",
            "${1} ${2}",
        ),
        Rewrite::new(
            "exam_label",
            r"(?i)((?:aplica[çc][ãa]o\s+da\s+)?provas?[^\n]{0,100})\n\s*(\d{2}/\d{2}/\d{4}(?:\s+a\s+\d{2}/\d{2}/\d{4})?)",
            "${1} ${2}",
        ),
        Rewrite::new("urls", r"https?://\S+|www\.\S+", ""),
        Rewrite::new(
            "broken_range",
            r"(\d{2}/\d{2}/\d{4})\s*a\s*\n\s*(\d{2}/\d{2}/\d{4})",
            "${1} a ${2}",
        ),
        Rewrite::new(
            "broken_entre",
            r"(?i)Entre\s*\n\s*(\d{2}/\d{2}/\d{4})",
            "Entre ${1}",
        ),
        Rewrite::new(
            "entre_with_noise",
            r"(?i)(Entre\s+\d{2}/\d{2}/\d{4})\s+a\s*\n?\s*([^\d\n]+)?\s*(\d{2}/\d{2}/\d{4})",
            "${1} a ${3}",
        ),
        Rewrite::new("inline_whitespace", r"[ \t]+", " "),
        Rewrite::new("blank_lines", r"\n{3,}", "\n\n"),
    ]
});

/// Aplica todas as reescritas, em ordem, e remove espaços nas pontas.
pub fn normalize(text: &str) -> String {
    let mut current = text.to_string();
    for rewrite in REWRITES.iter() {
        if rewrite.pattern.is_match(&current) {
            tracing::trace!(step = rewrite.name, "reescrita aplicada");
            current = rewrite
                .pattern
                .replace_all(&current, rewrite.replacement)
                .into_owned();
        }
    }
    current.trim().to_string()
}
