//! Taxonomia de erros do motor de ligação.
//!
//! Apenas falhas de infraestrutura (índice de pesquisa, repositório de
//! artigos, escrita do registo de auditoria) são erros. Incerteza de decisão
//! — nenhum candidato, menção ambígua — é um resultado normal (`Ok(None)`)
//! acompanhado de uma entrada de auditoria, porque é esperada em operação
//! contínua e não deve parar o pipeline de extração.

use thiserror::Error;

/// Erro de uma dependência externa, apagado para um trait object.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum LinkError {
    /// O índice de pesquisa da base de conhecimento falhou ou está inacessível.
    #[error("falha na pesquisa da base de conhecimento: {source}")]
    Search {
        #[source]
        source: BoxError,
    },

    /// O repositório de artigos falhou (distinto de "artigo sem texto").
    #[error("falha ao obter o texto completo do artigo: {source}")]
    ArticleStore {
        #[source]
        source: BoxError,
    },

    /// Falha de escrita no registo de auditoria.
    #[error("falha ao escrever no registo de auditoria: {0}")]
    Audit(#[from] std::io::Error),
}

impl LinkError {
    /// Envolve um erro arbitrário do backend de pesquisa.
    pub fn search(source: impl Into<BoxError>) -> Self {
        LinkError::Search { source: source.into() }
    }

    /// Envolve um erro arbitrário do repositório de artigos.
    pub fn article_store(source: impl Into<BoxError>) -> Self {
        LinkError::ArticleStore { source: source.into() }
    }
}
