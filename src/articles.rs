//! Acesso ao texto completo dos artigos.
//!
//! Os títulos encurtam nomes ("Menezes critica Governo"); o corpo do artigo
//! normalmente contém o nome completo pelo menos uma vez, e é essa a matéria
//! prima da expansão de menções. O repositório real é uma cache sobre o
//! crawler; aqui fica o trait e uma implementação em memória para testes.

use std::collections::HashMap;

use crate::error::LinkError;

/// Repositório de texto completo de artigos, indexado por URL.
pub trait ArticleStore {
    /// Devolve o corpo do artigo, `Ok(None)` se não estiver disponível.
    ///
    /// `Ok(None)` degrada graciosamente para "expansão sem resultados";
    /// `Err` sinaliza falha do próprio repositório e propaga-se ao chamador.
    fn full_text(&self, url: &str) -> Result<Option<String>, LinkError>;
}

/// Repositório em memória (URL → texto).
#[derive(Default)]
pub struct MemoryArticles {
    texts: HashMap<String, String>,
}

impl MemoryArticles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, url: &str, text: &str) {
        self.texts.insert(url.to_string(), text.to_string());
    }
}

impl ArticleStore for MemoryArticles {
    fn full_text(&self, url: &str) -> Result<Option<String>, LinkError> {
        Ok(self.texts.get(url).cloned())
    }
}
