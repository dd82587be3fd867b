//! # politilink — Ligação de Entidades para Notícias Políticas Portuguesas
//!
//! Este crate resolve menções textuais de figuras políticas (ex: "Cavaco",
//! "Marques Mendes") para entidades canónicas de uma base de conhecimento
//! (identificadores Wikidata), a partir de títulos ruidosos de arquivos de
//! notícias (arquivo.pt, publico.pt).
//!
//! ## Arquitetura do Sistema
//!
//! O motor segue um procedimento de decisão em camadas, do mais barato ao
//! mais caro:
//!
//! 1.  **Normalização** ([`query`]): escapa a sintaxe do índice de pesquisa,
//!     aplica a tabela de alcunhas conhecidas e remove honoríficos.
//! 2.  **Recuperação de candidatos** ([`retriever`]): consulta conjuntiva
//!     (`AND` entre tokens do nome) ao índice, com cache LRU por menção.
//! 3.  **Filtro exato** ([`matching`]): igualdade total, sem sensibilidade a
//!     maiúsculas, contra o rótulo e os aliases de cada candidato.
//! 4.  **Expansão da menção** ([`expansion`]): re-executa o NER sobre o texto
//!     completo do artigo para recuperar o nome próprio que o título omitiu,
//!     fundindo deteções parciais por substring e distância de edição.
//! 5.  **Desambiguação** ([`disambiguation`]): um candidato só sobrevive se
//!     explicar *todas* as formas expandidas observadas.
//! 6.  **Comparação difusa** ([`matching`]): último recurso, aplicada apenas
//!     quando resta exatamente um candidato.
//!
//! Casos não resolvidos nunca são adivinhados: o orquestrador ([`linker`])
//! devolve `None` e escreve uma entrada no registo de auditoria ([`audit`])
//! para revisão manual.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use politilink::{AuditLog, Candidate, EntityLinker, MemoryArticles, MemoryKb, NerTagger};
//!
//! struct NoopNer;
//! impl NerTagger for NoopNer {
//!     fn tag(&self, _text: &str) -> Vec<String> { vec![] }
//! }
//!
//! let kb = MemoryKb::new(vec![Candidate::new("Q183406", "Aníbal Cavaco Silva")]);
//! let linker = EntityLinker::new(NoopNer, kb, MemoryArticles::default(), AuditLog::sink());
//!
//! let resolved = linker.link("Cavaco Silva", "https://publico.pt/123").unwrap();
//! assert_eq!(resolved.unwrap().id, "Q183406");
//! ```
//!
//! ## Colaboradores Externos
//!
//! O reconhecedor de entidades ([`NerTagger`]), o índice de pesquisa
//! ([`KbIndex`]) e o repositório de artigos ([`ArticleStore`]) são traits
//! injetados: as implementações reais (NER estatístico, Elasticsearch,
//! crawler de artigos) vivem fora deste crate, e as implementações em
//! memória ([`MemoryKb`], [`MemoryArticles`]) servem testes e demonstrações.

pub mod articles;
pub mod audit;
pub mod disambiguation;
pub mod error;
pub mod expansion;
pub mod kb;
pub mod linker;
pub mod matching;
pub mod query;
pub mod retriever;

pub use articles::{ArticleStore, MemoryArticles};
pub use audit::{AuditEntry, AuditLog};
pub use error::LinkError;
pub use expansion::{MentionExpander, NerTagger};
pub use kb::{Candidate, KbIndex, MemoryKb};
pub use linker::{EntityLinker, LinkerConfig};
pub use retriever::CandidateRetriever;
