//! Comparação de menções com candidatos: exata e difusa.
//!
//! A comparação exata é a única prova de desambiguação aceite pelo motor; a
//! difusa serve apenas de último recurso quando já só resta um candidato e a
//! exata falhou (ex: hífenes, acentos trocados, gralhas de OCR).

use crate::kb::Candidate;

/// Limiar de aceitação da comparação difusa, escolhido empiricamente sobre
/// os dados do arquivo. Configurável via [`crate::LinkerConfig`].
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.77;

/// A menção é igual, ignorando maiúsculas, ao rótulo ou a algum alias?
pub fn is_exact(mention: &str, candidate: &Candidate) -> bool {
    let target = mention.trim().to_lowercase();
    candidate
        .surface_forms()
        .any(|form| form.to_lowercase() == target)
}

/// Filtra os candidatos cuja forma de superfície coincide totalmente com a
/// menção, preservando a ordem de entrada. Sem tolerância difusa.
pub fn exact_matches(mention: &str, candidates: &[Candidate]) -> Vec<Candidate> {
    candidates
        .iter()
        .filter(|c| is_exact(mention, c))
        .cloned()
        .collect()
}

/// Aceita o candidato se a semelhança de bigramas de caracteres com o rótulo
/// ou com algum alias ultrapassar o limiar.
///
/// Função pura; nunca deve ser usada para escolher entre vários candidatos
/// concorrentes — essa é a tarefa da desambiguação.
pub fn fuzzy_match(mention: &str, candidate: &Candidate, threshold: f64) -> bool {
    candidate
        .surface_forms()
        .any(|form| strsim::sorensen_dice(mention, form) > threshold)
}
