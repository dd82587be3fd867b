//! Registo de auditoria das menções não resolvidas.
//!
//! Ficheiro JSON-lines, apenas-acrescento: uma linha por tentativa falhada,
//! com a menção original, as formas expandidas calculadas (ou a sentinela
//! `"no_candidates"` quando a recuperação nem devolveu candidatos), o
//! conjunto de candidatos considerado e o URL do artigo. É o único canal
//! pelo qual os casos ambíguos chegam à revisão manual — descartar um caso
//! em silêncio é um defeito, não uma otimização.
//!
//! Cada registo é escrito e descarregado numa só linha, pelo que o ficheiro
//! pode ser partilhado por vários workers sem bloqueio entre processos.

use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;

use serde::Serialize;

use crate::error::LinkError;
use crate::kb::Candidate;

/// Sentinela registada quando a recuperação inicial não devolveu nada.
pub const NO_CANDIDATES: &str = "no_candidates";

/// Campo `expanded` de uma entrada: lista de formas ou a sentinela.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Expanded<'a> {
    Sentinel(&'a str),
    Mentions(&'a [String]),
}

/// Uma tentativa de ligação não resolvida.
#[derive(Debug, Serialize)]
pub struct AuditEntry<'a> {
    pub entity: &'a str,
    pub expanded: Expanded<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidates: Option<&'a [Candidate]>,
    pub url: &'a str,
}

impl<'a> AuditEntry<'a> {
    /// Entrada para o caso "zero candidatos logo na primeira consulta".
    pub fn no_candidates(entity: &'a str, url: &'a str) -> Self {
        Self {
            entity,
            expanded: Expanded::Sentinel(NO_CANDIDATES),
            candidates: None,
            url,
        }
    }

    /// Entrada para um caso ambíguo ou sem correspondência após expansão.
    pub fn unresolved(
        entity: &'a str,
        expanded: &'a [String],
        candidates: &'a [Candidate],
        url: &'a str,
    ) -> Self {
        Self {
            entity,
            expanded: Expanded::Mentions(expanded),
            candidates: Some(candidates),
            url,
        }
    }
}

/// Escritor JSON-lines apenas-acrescento, partilhável entre threads.
pub struct AuditLog {
    writer: Mutex<BufWriter<Box<dyn Write + Send>>>,
}

impl AuditLog {
    /// Abre (ou cria) o ficheiro em modo append.
    pub fn append(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::from_writer(file))
    }

    /// Constrói sobre um escritor arbitrário; útil em testes.
    pub fn from_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            writer: Mutex::new(BufWriter::new(Box::new(writer))),
        }
    }

    /// Registo que descarta tudo, para pipelines que não auditam.
    pub fn sink() -> Self {
        Self::from_writer(io::sink())
    }

    /// Acrescenta uma entrada como uma linha JSON e descarrega de imediato,
    /// para que a linha seja a unidade de atomicidade.
    pub fn record(&self, entry: &AuditEntry<'_>) -> Result<(), LinkError> {
        let line = serde_json::to_string(entry).map_err(io::Error::from)?;
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        writeln!(writer, "{line}")?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_no_candidates_entry_serializes_sentinel() {
        let entry = AuditEntry::no_candidates("Nome Desconhecido", "https://publico.pt/1");
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            r#"{"entity":"Nome Desconhecido","expanded":"no_candidates","url":"https://publico.pt/1"}"#
        );
    }

    #[test]
    fn test_unresolved_entry_includes_candidates() {
        let expanded = vec!["Luís Filipe Menezes".to_string()];
        let candidates = vec![Candidate::new("Q6706787", "Luís Filipe Menezes")];
        let entry =
            AuditEntry::unresolved("Menezes", &expanded, &candidates, "https://publico.pt/2");
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains(r#""expanded":["Luís Filipe Menezes"]"#));
        assert!(json.contains(r#""candidates":[{"id":"Q6706787""#));
    }

    #[test]
    fn test_record_appends_one_line_per_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_wiki_id.jsonl");
        let log = AuditLog::append(&path).unwrap();

        log.record(&AuditEntry::no_candidates("A", "u1")).unwrap();
        log.record(&AuditEntry::no_candidates("B", "u2")).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert_eq!(value["expanded"], "no_candidates");
        }
    }

    #[test]
    fn test_append_reopens_without_truncating() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_wiki_id.jsonl");

        AuditLog::append(&path)
            .unwrap()
            .record(&AuditEntry::no_candidates("A", "u1"))
            .unwrap();
        AuditLog::append(&path)
            .unwrap()
            .record(&AuditEntry::no_candidates("B", "u2"))
            .unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
    }
}
