//! Expansão de menções a partir do texto completo do artigo.
//!
//! Os títulos encurtam o nome para um apelido ("Menezes"); o corpo do artigo
//! quase sempre contém o nome completo. A expansão re-executa o NER sobre o
//! texto completo, retém as deteções que contêm a menção curta como
//! substring e funde variantes parciais ou com gralhas numa única forma
//! maximal.
//!
//! A fusão assenta no princípio "one sense per discourse": se a mesma forma
//! polissémica ocorre várias vezes num texto, é quase certo que todas as
//! ocorrências partilham o mesmo referente (Gale et al., 1992).

use crate::query::clean_mention;

/// Reconhecedor de nomes de pessoas.
///
/// Devolve as formas de superfície distintas reconhecidas como pessoa, pela
/// ordem da primeira ocorrência no texto. A implementação real (gramática de
/// regras + modelo estatístico) vive fora deste crate.
pub trait NerTagger {
    fn tag(&self, text: &str) -> Vec<String>;
}

/// Expande menções curtas e funde deteções redundantes.
#[derive(Debug, Clone, Copy)]
pub struct MentionExpander {
    /// Distância de Levenshtein máxima para fundir variantes com gralhas.
    max_edit_distance: usize,
}

impl MentionExpander {
    pub fn new(max_edit_distance: usize) -> Self {
        Self { max_edit_distance }
    }

    /// Procura no texto completo formas mais específicas da menção.
    ///
    /// Retém as deteções do NER que (a) contêm a menção como substring e
    /// (b) são estritamente mais longas do que ela; limpa cada uma e funde
    /// o conjunto via [`merge_substrings`](Self::merge_substrings). Texto
    /// vazio devolve `[]` sem invocar o reconhecedor.
    pub fn expand<N: NerTagger>(&self, mention: &str, text: &str, ner: &N) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        let expanded: Vec<String> = ner
            .tag(text)
            .into_iter()
            .filter(|person| person.contains(mention) && person != mention)
            .map(|person| clean_mention(&person))
            .collect();
        self.merge_substrings(&expanded)
    }

    /// Elimina menções que são substrings (ou quase-duplicados) de outras.
    ///
    /// Ordena por comprimento crescente e descarta cada menção que esteja
    /// contida numa mais longa, ou a uma distância de edição pequena de
    /// outra que sobrevive — isto colapsa variantes de OCR/gralha do mesmo
    /// nome completo ("Luis Filipe Menezes" / "Luís Filipe Menezes") numa
    /// só forma canónica.
    pub fn merge_substrings(&self, mentions: &[String]) -> Vec<String> {
        let mut cleaned: Vec<String> = mentions
            .iter()
            .map(|m| clean_mention(m))
            .filter(|m| !m.is_empty())
            .collect();
        cleaned.sort_by_key(|m| m.chars().count());

        let mut merged: Vec<String> = Vec::new();
        for (idx, mention) in cleaned.iter().enumerate() {
            let absorbed = cleaned[idx + 1..].iter().any(|longer| {
                longer.contains(mention.as_str())
                    || strsim::levenshtein(mention, longer) <= self.max_edit_distance
            });
            if !absorbed && !merged.contains(mention) {
                merged.push(mention.clone());
            }
        }
        merged
    }
}

impl Default for MentionExpander {
    fn default() -> Self {
        Self::new(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedNer(Vec<&'static str>);

    impl NerTagger for FixedNer {
        fn tag(&self, _text: &str) -> Vec<String> {
            self.0.iter().map(|s| s.to_string()).collect()
        }
    }

    struct PanicNer;

    impl NerTagger for PanicNer {
        fn tag(&self, _text: &str) -> Vec<String> {
            panic!("o NER não deve ser invocado com texto vazio");
        }
    }

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_expand_keeps_only_longer_superstrings() {
        let expander = MentionExpander::default();
        let ner = FixedNer(vec!["Luís Filipe Menezes", "Menezes", "Paulo Portas"]);
        let result = expander.expand("Menezes", "corpo do artigo", &ner);
        assert_eq!(result, owned(&["Luís Filipe Menezes"]));
    }

    #[test]
    fn test_expand_empty_text_skips_ner() {
        let expander = MentionExpander::default();
        assert!(expander.expand("Menezes", "", &PanicNer).is_empty());
        assert!(expander.expand("Menezes", "   ", &PanicNer).is_empty());
    }

    #[test]
    fn test_merge_drops_honorific_variants() {
        let expander = MentionExpander::default();
        let result = expander.merge_substrings(&owned(&[
            "Luís Filipe Menezes",
            "Dr. Menezes",
            "doutor Menezes",
        ]));
        assert_eq!(result, owned(&["Luís Filipe Menezes"]));
    }

    #[test]
    fn test_merge_drops_short_form() {
        let expander = MentionExpander::default();
        let result =
            expander.merge_substrings(&owned(&["Luís Marques Mendes", "Marques Mendes"]));
        assert_eq!(result, owned(&["Luís Marques Mendes"]));
    }

    #[test]
    fn test_merge_keeps_longest_regardless_of_order() {
        let expander = MentionExpander::default();
        let result =
            expander.merge_substrings(&owned(&["Freitas do Amaral", "Diogo Freitas do Amaral"]));
        assert_eq!(result, owned(&["Diogo Freitas do Amaral"]));
    }

    #[test]
    fn test_merge_collapses_stray_quote_duplicates() {
        let expander = MentionExpander::default();
        let result =
            expander.merge_substrings(&owned(&["Pedro Silva Pereira", "”Pedro Silva Pereira"]));
        assert_eq!(result, owned(&["Pedro Silva Pereira"]));
    }

    #[test]
    fn test_merge_collapses_typo_variants_by_edit_distance() {
        let expander = MentionExpander::default();
        let result = expander
            .merge_substrings(&owned(&["Luis Filipe Menezes", "Luís Filipe Menezes"]));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0], "Luís Filipe Menezes");
    }

    #[test]
    fn test_merge_keeps_genuinely_distinct_names() {
        let expander = MentionExpander::default();
        let result = expander
            .merge_substrings(&owned(&["Maria Nogueira Pinto", "Jaime Nogueira Pinto"]));
        assert_eq!(result.len(), 2);
    }
}
