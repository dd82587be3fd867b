//! Recuperação de candidatos com memoização.
//!
//! O mesmo nome repete-se em milhares de títulos de arquivo, pelo que cada
//! lista de candidatos fica numa cache LRU limitada, indexada pela menção em
//! bruto. A cache vive atrás de um `Mutex` para que o mesmo recuperador
//! possa ser partilhado entre threads do pipeline exterior — as entradas são
//! funções puras da menção, logo é seguro duplicá-las entre processos.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Mutex;

use lru::LruCache;
use tracing::debug;

use crate::error::LinkError;
use crate::kb::{Candidate, KbIndex};
use crate::query::build_query;

/// Capacidade por omissão da cache de memoização.
pub const DEFAULT_CACHE_SIZE: usize = 2000;

/// Envolve o índice de pesquisa com normalização de consulta e cache LRU.
pub struct CandidateRetriever<K> {
    index: K,
    alias_table: HashMap<String, String>,
    cache: Mutex<LruCache<String, Vec<Candidate>>>,
}

impl<K: KbIndex> CandidateRetriever<K> {
    pub fn new(index: K, alias_table: HashMap<String, String>, cache_size: usize) -> Self {
        let capacity = NonZeroUsize::new(cache_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            index,
            alias_table,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Lista completa de candidatos para a menção (memoizada).
    ///
    /// Menção vazia devolve `[]` sem tocar no índice. Falhas do índice
    /// propagam-se; respostas vazias legítimas também são memoizadas.
    pub fn all(&self, mention: &str) -> Result<Vec<Candidate>, LinkError> {
        let key = mention.trim();
        if key.is_empty() {
            return Ok(Vec::new());
        }

        if let Some(hits) = self.lock_cache().get(key) {
            return Ok(hits.clone());
        }

        let query = build_query(key, &self.alias_table);
        let hits = self.index.search(&query)?;
        debug!(
            mention = key,
            query = %query,
            hits = hits.len(),
            "consulta ao índice da base de conhecimento"
        );
        self.lock_cache().put(key.to_string(), hits.clone());
        Ok(hits)
    }

    /// Apenas o candidato mais bem classificado, ou `None`.
    pub fn top(&self, mention: &str) -> Result<Option<Candidate>, LinkError> {
        Ok(self.all(mention)?.into_iter().next())
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, LruCache<String, Vec<Candidate>>> {
        // Um panic noutra thread não corrompe a cache; recupera o guard.
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::query::default_alias_table;

    /// Índice que conta as consultas recebidas.
    struct CountingIndex {
        calls: AtomicUsize,
        hits: Vec<Candidate>,
    }

    impl CountingIndex {
        fn new(hits: Vec<Candidate>) -> Self {
            Self { calls: AtomicUsize::new(0), hits }
        }
    }

    impl KbIndex for CountingIndex {
        fn search(&self, _query: &str) -> Result<Vec<Candidate>, LinkError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.hits.clone())
        }
    }

    struct FailingIndex;

    impl KbIndex for FailingIndex {
        fn search(&self, _query: &str) -> Result<Vec<Candidate>, LinkError> {
            Err(LinkError::search("índice inacessível"))
        }
    }

    #[test]
    fn test_repeated_lookups_hit_cache() {
        let index = CountingIndex::new(vec![Candidate::new("Q1", "Paulo Portas")]);
        let retriever = CandidateRetriever::new(index, default_alias_table(), 16);

        let first = retriever.all("Portas").unwrap();
        let second = retriever.all("Portas").unwrap();
        assert_eq!(first, second);
        assert_eq!(retriever.index.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_empty_mention_short_circuits() {
        let index = CountingIndex::new(vec![]);
        let retriever = CandidateRetriever::new(index, HashMap::new(), 16);
        assert!(retriever.all("  ").unwrap().is_empty());
        assert_eq!(retriever.index.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_empty_result_is_also_memoized() {
        let index = CountingIndex::new(vec![]);
        let retriever = CandidateRetriever::new(index, HashMap::new(), 16);
        assert!(retriever.all("Nome Desconhecido").unwrap().is_empty());
        assert!(retriever.all("Nome Desconhecido").unwrap().is_empty());
        assert_eq!(retriever.index.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_top_returns_first_hit() {
        let index = CountingIndex::new(vec![
            Candidate::new("Q1", "Mário Soares"),
            Candidate::new("Q2", "João Soares"),
        ]);
        let retriever = CandidateRetriever::new(index, HashMap::new(), 16);
        assert_eq!(retriever.top("Soares").unwrap().unwrap().id, "Q1");
    }

    #[test]
    fn test_index_failure_propagates() {
        let retriever = CandidateRetriever::new(FailingIndex, HashMap::new(), 16);
        assert!(matches!(
            retriever.all("Soares"),
            Err(LinkError::Search { .. })
        ));
    }
}
