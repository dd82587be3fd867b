//! Desambiguação conservadora entre vários candidatos.
//!
//! Quando a expansão devolve várias formas e a recuperação devolve vários
//! candidatos, um candidato só é aceite se explicar *todas* as formas
//! expandidas observadas no artigo — não basta explicar uma. Empates nunca
//! são decididos aqui: o chamador trata listas com tamanho diferente de um
//! como "não resolvido".

use crate::kb::Candidate;
use crate::matching::is_exact;

/// Devolve os candidatos que coincidem exatamente com *todas* as menções
/// expandidas (semântica para-todo).
pub fn disambiguate(expanded: &[String], candidates: &[Candidate]) -> Vec<Candidate> {
    if expanded.is_empty() {
        return Vec::new();
    }
    candidates
        .iter()
        .filter(|candidate| expanded.iter().all(|mention| is_exact(mention, candidate)))
        .cloned()
        .collect()
}
