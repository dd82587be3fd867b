//! Registos da base de conhecimento e o trait do índice de pesquisa.
//!
//! Cada [`Candidate`] corresponde a uma pessoa real na base de conhecimento
//! (na prática, um item Wikidata com rótulo canónico e aliases). O índice
//! real é um motor de pesquisa de texto completo; aqui existe apenas o trait
//! [`KbIndex`] e uma implementação em memória ([`MemoryKb`]) que reproduz a
//! semântica conjuntiva das consultas para testes e demonstrações.

use serde::{Deserialize, Serialize};

use crate::error::LinkError;

/// Um registo da base de conhecimento para uma pessoa.
///
/// Produzido pelo índice de pesquisa, nunca mutado pelo motor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Identificador externo estável (ex: "Q550243").
    #[serde(alias = "wiki")]
    pub id: String,
    /// Nome canónico de exibição.
    pub label: String,
    /// Formas alternativas: alcunhas, variantes ortográficas. Pode estar
    /// ausente ou ser `null` nos dumps originais.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aliases: Option<Vec<String>>,
    /// Data da última modificação do item, quando o dump a traz.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
}

impl Candidate {
    /// Candidato sem aliases, útil em testes e tabelas estáticas.
    pub fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            aliases: None,
            last_modified: None,
        }
    }

    /// Candidato com aliases.
    pub fn with_aliases(id: &str, label: &str, aliases: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            aliases: Some(aliases.iter().map(|a| a.to_string()).collect()),
            last_modified: None,
        }
    }

    /// Itera o rótulo seguido de todos os aliases.
    pub fn surface_forms(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.label.as_str())
            .chain(self.aliases.iter().flatten().map(|a| a.as_str()))
    }
}

/// Índice de pesquisa de texto completo sobre os registos da base de
/// conhecimento.
///
/// A consulta chega já normalizada (tokens escapados unidos por " AND ", ver
/// [`crate::query::build_query`]). Falhas do backend devem ser devolvidas
/// como [`LinkError::Search`] — nunca mascaradas como lista vazia, para que
/// o chamador consiga distinguir "sem candidatos" de "índice em baixo".
pub trait KbIndex {
    fn search(&self, query: &str) -> Result<Vec<Candidate>, LinkError>;
}

/// Índice em memória com a mesma semântica conjuntiva do índice real: um
/// registo é devolvido se *todos* os tokens da consulta ocorrerem como
/// palavra em alguma das suas formas de superfície.
pub struct MemoryKb {
    records: Vec<Candidate>,
}

impl MemoryKb {
    pub fn new(records: Vec<Candidate>) -> Self {
        Self { records }
    }
}

impl KbIndex for MemoryKb {
    fn search(&self, query: &str) -> Result<Vec<Candidate>, LinkError> {
        // Desfaz o escape da sintaxe de pesquisa; o índice real analisaria
        // os termos, aqui basta comparar palavras sem maiúsculas.
        let tokens: Vec<String> = query
            .split(" AND ")
            .map(|t| t.replace('\\', "").to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();

        if tokens.is_empty() {
            return Ok(Vec::new());
        }

        let hits = self
            .records
            .iter()
            .filter(|record| {
                tokens.iter().all(|token| {
                    record.surface_forms().any(|form| {
                        form.to_lowercase()
                            .split_whitespace()
                            .any(|word| word == token)
                    })
                })
            })
            .cloned()
            .collect();

        Ok(hits)
    }
}
