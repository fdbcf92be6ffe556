use tracing::{debug, info};

use crate::classify::UrlClassifier;
use crate::data::{UrlRecord, UrlStore};
use crate::error::Result;
use crate::scope::ScopeOracle;

/// Outcome of a bulk URL import: the candidates that passed the admission
/// gate (input order, duplicates as given) and how many rows were actually
/// new in the namespace.
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub accepted: Vec<String>,
    pub new_records: u64,
}

/// Validated write front for the URL store.
///
/// Collaborators are injected explicitly; the importer holds no state of
/// its own.
pub struct UrlImporter<'a> {
    store: &'a UrlStore,
    classifier: &'a UrlClassifier,
    scope: &'a dyn ScopeOracle,
}

impl<'a> UrlImporter<'a> {
    pub fn new(
        store: &'a UrlStore,
        classifier: &'a UrlClassifier,
        scope: &'a dyn ScopeOracle,
    ) -> Self {
        UrlImporter {
            store,
            classifier,
            scope,
        }
    }

    /// Add a single discovered URL. `found` carries the upstream fetch
    /// verdict: any value, even `Some(false)`, means the URL has already
    /// been visited. Returns `false` when the candidate fails the
    /// admission gate; nothing is written in that case.
    pub fn add_url(&self, target: &str, url: &str, found: Option<bool>) -> Result<bool> {
        if !self.classifier.is_url(url) {
            debug!(target, url, "rejected candidate");
            return Ok(false);
        }
        // Nasty bugs happen without this.
        let url = url.trim();
        let visited = found.is_some();
        let scope = self.scope.is_in_scope(url, target);
        self.store.upsert(target, url, visited, scope)?;
        Ok(true)
    }

    /// Import a raw candidate list. Candidates failing the admission gate
    /// are dropped silently; survivors land unvisited with default scope.
    /// Scope classification is deferred on this path: a later `add_url` of
    /// the same URL replaces the record with an oracle-derived value.
    pub fn import_urls<I, S>(&self, target: &str, candidates: I) -> Result<ImportOutcome>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut accepted = Vec::new();
        let mut cleaned = Vec::new();
        for candidate in candidates {
            let candidate = candidate.as_ref();
            if self.classifier.is_url(candidate) {
                accepted.push(candidate.to_string());
                cleaned.push(candidate.trim().to_string());
            }
        }
        let new_records = self.store.import_batch(target, &cleaned)?;
        info!(target, "{} URLs have been added and classified", new_records);
        Ok(ImportOutcome {
            accepted,
            new_records,
        })
    }

    /// Restore records that were classified elsewhere, verbatim and in
    /// input order. No re-validation: this path trusts the caller.
    pub fn import_processed(&self, target: &str, records: &[UrlRecord]) -> Result<()> {
        self.store.bulk_upsert(target, records)
    }
}
