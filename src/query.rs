//! Normalização de nomes para consulta ao índice de pesquisa.
//!
//! Três passos, todos determinísticos e sem I/O:
//!
//! 1. Escapar os caracteres com significado especial na sintaxe de consulta
//!    do índice de texto completo.
//! 2. Substituir alcunhas e formas curtas conhecidas pelo nome completo,
//!    via uma tabela estática ("Cavaco" → "Aníbal Cavaco Silva"). A tabela é
//!    uma substituição integral, indexada pela string já escapada, não uma
//!    transformação.
//! 3. Unir os tokens do nome com o operador `AND`, para que a consulta
//!    exija todas as partes do nome.
//!
//! Inclui ainda [`clean_mention`], que remove honoríficos e ruído de OCR
//! das menções detetadas pelo NER.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

/// Caracteres reservados da sintaxe de consulta do índice.
const QUERY_SPECIAL_CHARS: &[char] = &[
    '\\', '+', '-', '!', '(', ')', ':', '^', '[', ']', '"', '{', '}', '~', '*', '?', '|', '&', '/',
];

/// Ruído habitual nas menções extraídas de títulos: honoríficos, legendas
/// de fotografia e pontuação solta.
const MENTION_NOISE: &[&str] = &[
    "Sr.", "sr.", "Dr.", "dr.", "doutor", "[", "”", "Foto", "Parabéns",
];

/// Escapa os caracteres reservados da sintaxe de consulta com `\`.
pub fn escape_query(name: &str) -> String {
    let mut escaped = String::with_capacity(name.len());
    for ch in name.chars() {
        if QUERY_SPECIAL_CHARS.contains(&ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Tabela de alcunhas e formas curtas frequentes na imprensa portuguesa.
///
/// As chaves estão na forma *escapada* (nota: "Aguiar\-Branco" leva o hífen
/// escapado, porque a substituição corre depois de [`escape_query`]).
pub fn default_alias_table() -> HashMap<String, String> {
    [
        ("António Costa", "António Luís Santos da Costa"),
        ("Costa", "António Luís Santos da Costa"),
        ("Carrilho", "Manuel Maria Carrilho"),
        ("Cavaco Silva", "Aníbal Cavaco Silva"),
        ("Cavaco", "Aníbal Cavaco Silva"),
        ("Durão", "Durão Barroso"),
        ("Ferreira de o Amaral", "Joaquim Ferreira do Amaral"),
        ("Jerónimo", "Jerónimo de Sousa"),
        ("José Pedro Aguiar\\-Branco", "José Pedro Aguiar Branco"),
        ("Louçã", "Francisco Louçã"),
        ("Louça", "Francisco Louçã"),
        ("Marcelo", "Marcelo Rebelo de Sousa"),
        ("Rebelo de Sousa", "Marcelo Rebelo de Sousa"),
        ("Marques Mendes", "Luís Marques Mendes"),
        ("Menezes", "Luís Filipe Menezes"),
        ("Moura Guedes", "Manuela Moura Guedes"),
        ("Nobre", "Fernando Nobre"),
        ("Passos", "Pedro Passos Coelho"),
        ("Portas", "Paulo Portas"),
        ("Relvas", "Miguel Relvas"),
        ("Santana", "Pedro Santana Lopes"),
        ("Santos Silva", "Augusto Santos Silva"),
        ("Soares", "Mário Soares"),
        ("Sousa Tavares", "Miguel Sousa Tavares"),
        ("Vieira da Silva", "José Vieira da Silva"),
        ("Vitor Gaspar", "Vítor Gaspar"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// Constrói a consulta conjuntiva final: escapa, resolve a alcunha e une os
/// tokens com " AND ".
pub fn build_query(name: &str, alias_table: &HashMap<String, String>) -> String {
    let escaped = escape_query(name);
    let resolved = alias_table.get(&escaped).cloned().unwrap_or(escaped);
    resolved
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" AND ")
}

/// Remove honoríficos e ruído de uma menção e apara os espaços.
pub fn clean_mention(text: &str) -> String {
    static NOISE_RE: OnceLock<Regex> = OnceLock::new();
    let re = NOISE_RE.get_or_init(|| {
        let pattern = MENTION_NOISE
            .iter()
            .map(|n| regex::escape(n))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&pattern).expect("padrão de ruído estático é válido")
    });
    re.replace_all(text, "").trim().to_string()
}
