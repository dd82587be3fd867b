//! Orquestrador da ligação de entidades.
//!
//! Compõe a recuperação, o filtro exato, a expansão, a desambiguação e a
//! comparação difusa no procedimento de decisão descrito em [`EntityLinker::link`].
//! A invariante central: o motor nunca devolve um candidato quando o passo
//! de filtragem que sustentou a decisão deixou mais do que uma
//! correspondência — ambiguidade colapsa sempre para `None` mais uma
//! entrada de auditoria, nunca para um palpite.

use std::collections::HashMap;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::articles::ArticleStore;
use crate::audit::{AuditEntry, AuditLog};
use crate::disambiguation::disambiguate;
use crate::error::LinkError;
use crate::expansion::{MentionExpander, NerTagger};
use crate::kb::{Candidate, KbIndex};
use crate::matching::{exact_matches, fuzzy_match, DEFAULT_FUZZY_THRESHOLD};
use crate::query::default_alias_table;
use crate::retriever::{CandidateRetriever, DEFAULT_CACHE_SIZE};

/// Parâmetros do motor. Os valores por omissão são as constantes escolhidas
/// empiricamente sobre o arquivo; trate-os como ponto de partida para
/// calibração, não como ótimos.
#[derive(Debug, Clone)]
pub struct LinkerConfig {
    /// Limiar de aceitação da comparação difusa.
    pub fuzzy_threshold: f64,
    /// Distância de edição máxima na fusão de variantes expandidas.
    pub max_edit_distance: usize,
    /// Capacidade da cache LRU de candidatos.
    pub cache_size: usize,
    /// Tabela alcunha → nome completo, indexada pela forma escapada.
    pub alias_table: HashMap<String, String>,
}

impl Default for LinkerConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            max_edit_distance: 3,
            cache_size: DEFAULT_CACHE_SIZE,
            alias_table: default_alias_table(),
        }
    }
}

/// O motor de ligação de entidades.
///
/// Os três colaboradores externos (NER, índice da base de conhecimento,
/// repositório de artigos) são injetados, o que torna o motor testável com
/// dublês e instanciável por worker — não há estado global.
pub struct EntityLinker<N, K, A> {
    ner: N,
    retriever: CandidateRetriever<K>,
    articles: A,
    audit: AuditLog,
    expander: MentionExpander,
    fuzzy_threshold: f64,
}

impl<N, K, A> EntityLinker<N, K, A>
where
    N: NerTagger,
    K: KbIndex,
    A: ArticleStore,
{
    /// Motor com a configuração por omissão.
    pub fn new(ner: N, kb: K, articles: A, audit: AuditLog) -> Self {
        Self::with_config(ner, kb, articles, audit, LinkerConfig::default())
    }

    pub fn with_config(ner: N, kb: K, articles: A, audit: AuditLog, config: LinkerConfig) -> Self {
        Self {
            ner,
            retriever: CandidateRetriever::new(kb, config.alias_table, config.cache_size),
            articles,
            audit,
            expander: MentionExpander::new(config.max_edit_distance),
            fuzzy_threshold: config.fuzzy_threshold,
        }
    }

    /// Resolve uma menção para um registo único da base de conhecimento.
    ///
    /// Procedimento de decisão, avaliado por ordem, concluindo no primeiro
    /// passo conclusivo:
    ///
    /// 1. Recupera todos os candidatos para a menção. Zero candidatos:
    ///    audita e devolve `None`.
    /// 2. Exatamente um candidato: devolve-o (a consulta conjuntiva já é
    ///    suficientemente restritiva).
    /// 3. Vários candidatos: filtro exato contra a menção em bruto; se
    ///    sobra exatamente um, devolve-o.
    /// 4. Caso contrário, expande a menção com o texto completo do artigo:
    ///    - zero formas expandidas → audita e devolve `None`;
    ///    - uma forma → filtro exato contra os candidatos já obtidos;
    ///      senão re-consulta o índice com a forma expandida, repete o
    ///      filtro exato e, com um único candidato restante, aceita-o por
    ///      comparação difusa; senão audita e devolve `None`;
    ///    - várias formas → desambiguação para-todo contra os candidatos
    ///      originais; só um sobrevivente é aceite.
    ///
    /// `Ok(None)` garante exatamente uma entrada no registo de auditoria.
    /// Falhas de infraestrutura propagam-se como `Err`.
    pub fn link(&self, mention: &str, url: &str) -> Result<Option<Candidate>, LinkError> {
        let candidates = self.retriever.all(mention)?;

        if candidates.is_empty() {
            warn!(mention, url, "sem candidatos na base de conhecimento");
            self.audit.record(&AuditEntry::no_candidates(mention, url))?;
            return Ok(None);
        }

        if candidates.len() == 1 {
            debug!(mention, id = %candidates[0].id, "candidato único, aceite diretamente");
            return Ok(candidates.into_iter().next());
        }

        let exact = exact_matches(mention, &candidates);
        if exact.len() == 1 {
            debug!(mention, id = %exact[0].id, "correspondência exata única entre vários candidatos");
            return Ok(exact.into_iter().next());
        }

        // O título não chegou; procura o nome completo no corpo do artigo.
        let text = self.articles.full_text(url)?;
        let expanded = match text.as_deref() {
            Some(body) => self.expander.expand(mention, body, &self.ner),
            None => Vec::new(),
        };
        debug!(mention, url, expanded = ?expanded, "formas expandidas a partir do texto completo");

        match expanded.len() {
            0 => {
                warn!(mention, url, "expansão sem resultados, não resolvido");
                self.audit
                    .record(&AuditEntry::unresolved(mention, &expanded, &candidates, url))?;
                Ok(None)
            }
            1 => self.resolve_single_expansion(mention, &expanded, &candidates, url),
            _ => {
                let matches = disambiguate(&expanded, &candidates);
                if matches.len() == 1 {
                    debug!(mention, id = %matches[0].id, "desambiguação para-todo concluída");
                    return Ok(matches.into_iter().next());
                }
                warn!(
                    mention,
                    url,
                    survivors = matches.len(),
                    "várias formas expandidas sem candidato consistente único"
                );
                self.audit
                    .record(&AuditEntry::unresolved(mention, &expanded, &candidates, url))?;
                Ok(None)
            }
        }
    }

    /// Caso "uma só forma expandida": tenta os candidatos já obtidos e, se
    /// necessário, re-consulta o índice com a forma expandida.
    fn resolve_single_expansion(
        &self,
        mention: &str,
        expanded: &[String],
        candidates: &[Candidate],
        url: &str,
    ) -> Result<Option<Candidate>, LinkError> {
        let expansion = &expanded[0];

        let exact = exact_matches(expansion, candidates);
        if exact.len() == 1 {
            debug!(mention, expansion = %expansion, id = %exact[0].id, "forma expandida coincide com candidato já obtido");
            return Ok(exact.into_iter().next());
        }

        let requeried = self.retriever.all(expansion)?;
        if requeried.is_empty() {
            warn!(mention, expansion = %expansion, url, "re-consulta com a forma expandida sem candidatos");
            self.audit
                .record(&AuditEntry::unresolved(mention, expanded, &requeried, url))?;
            return Ok(None);
        }

        let exact = exact_matches(expansion, &requeried);
        if exact.len() == 1 {
            debug!(mention, expansion = %expansion, id = %exact[0].id, "correspondência exata após re-consulta");
            return Ok(exact.into_iter().next());
        }

        if requeried.len() == 1 && fuzzy_match(expansion, &requeried[0], self.fuzzy_threshold) {
            debug!(mention, expansion = %expansion, id = %requeried[0].id, "aceite por comparação difusa de último recurso");
            return Ok(requeried.into_iter().next());
        }

        warn!(mention, expansion = %expansion, url, "forma expandida não desambiguou, não resolvido");
        self.audit
            .record(&AuditEntry::unresolved(mention, expanded, &requeried, url))?;
        Ok(None)
    }
}

impl<N, K, A> EntityLinker<N, K, A>
where
    N: NerTagger + Sync,
    K: KbIndex + Sync,
    A: ArticleStore + Sync,
{
    /// Resolve vários pares (menção, URL) em paralelo.
    ///
    /// A cache e o registo de auditoria já são partilháveis entre threads;
    /// cada resultado fica na posição do par que o originou.
    pub fn link_batch(
        &self,
        pairs: &[(String, String)],
    ) -> Vec<Result<Option<Candidate>, LinkError>> {
        pairs
            .par_iter()
            .map(|(mention, url)| self.link(mention, url))
            .collect()
    }
}
