use url::Url;

/// Decides whether a URL sits inside a target's assessment boundary.
///
/// Consulted once, at write time; stored records keep whatever the oracle
/// said when they were written.
pub trait ScopeOracle {
    fn is_in_scope(&self, url: &str, target: &str) -> bool;
}

/// Host-based scope: a URL is in scope when its host equals one of the
/// configured roots or is a subdomain of one. Unparseable URLs are simply
/// out of scope.
#[derive(Debug, Clone)]
pub struct HostScope {
    roots: Vec<String>,
}

impl HostScope {
    pub fn new<I, S>(roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        HostScope {
            roots: roots
                .into_iter()
                .map(|root| normalize_root(&root.into()))
                .collect(),
        }
    }

    /// Scope bounded by a single target, named either as a bare host or as
    /// a full URL.
    pub fn single(target: &str) -> Self {
        HostScope::new([target])
    }
}

impl ScopeOracle for HostScope {
    fn is_in_scope(&self, url: &str, _target: &str) -> bool {
        let Some(host) = host_of(url) else {
            return false;
        };
        self.roots
            .iter()
            .any(|root| host == *root || host.ends_with(&format!(".{root}")))
    }
}

fn host_of(url: &str) -> Option<String> {
    Url::parse(url.trim())
        .ok()
        .and_then(|parsed| parsed.host_str().map(|host| host.to_ascii_lowercase()))
}

fn normalize_root(root: &str) -> String {
    // Roots may arrive as bare hosts ("example.com") or full URLs.
    host_of(root).unwrap_or_else(|| root.trim().trim_end_matches('/').to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_and_subdomains_are_in_scope() {
        let scope = HostScope::single("example.com");
        assert!(scope.is_in_scope("http://example.com/login", "example.com"));
        assert!(scope.is_in_scope("https://api.example.com/v1", "example.com"));
        assert!(!scope.is_in_scope("http://example.org/", "example.com"));
        // Suffix match must not cross label boundaries.
        assert!(!scope.is_in_scope("http://notexample.com/", "example.com"));
    }

    #[test]
    fn roots_accept_full_urls() {
        let scope = HostScope::single("https://example.com:8443/app");
        assert!(scope.is_in_scope("http://example.com/other", "example.com"));
    }

    #[test]
    fn unparseable_urls_are_out_of_scope() {
        let scope = HostScope::single("example.com");
        assert!(!scope.is_in_scope("not a url", "example.com"));
        assert!(!scope.is_in_scope("", "example.com"));
    }
}
