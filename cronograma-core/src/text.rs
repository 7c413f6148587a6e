//! Janelas de texto medidas em caracteres.
//!
//! Os offsets do motor são índices de byte (como os de `regex::Match`), mas as
//! janelas de contexto ("150 caracteres antes da data") são contadas em
//! caracteres Unicode. Estas funções convertem entre os dois sem nunca cortar
//! um caractere multibyte ao meio ("ç", "ã", "–").

/// Offset de byte que fica até `n` caracteres antes de `idx`.
///
/// Se houver menos de `n` caracteres antes de `idx`, retorna 0.
pub(crate) fn back_chars(text: &str, idx: usize, n: usize) -> usize {
    if n == 0 {
        return idx;
    }
    text[..idx]
        .char_indices()
        .rev()
        .take(n)
        .last()
        .map_or(idx, |(i, _)| i)
}

/// Offset de byte que fica até `n` caracteres depois de `idx`.
///
/// Se houver menos de `n` caracteres após `idx`, retorna `text.len()`.
pub(crate) fn forward_chars(text: &str, idx: usize, n: usize) -> usize {
    text[idx..]
        .char_indices()
        .nth(n)
        .map_or(text.len(), |(i, _)| idx + i)
}

/// Os primeiros `n` caracteres de `s`.
pub(crate) fn prefix_chars(s: &str, n: usize) -> &str {
    &s[..forward_chars(s, 0, n)]
}

/// Capitaliza cada palavra: "analista judiciário" → "Analista Judiciário".
///
/// Uma palavra é qualquer sequência de letras; dígitos e pontuação a encerram.
pub(crate) fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
