use std::collections::HashSet;

use crate::error::ResolveError;
use crate::normalize::normalize;
use crate::store::EntryStore;

pub const DEFAULT_MAX_HOPS: usize = 10;

/// Terminal entry reached after following redirects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub name: String,
    pub content: String,
    /// Redirects followed to get here
    pub hops: usize,
}

/// Follows `#REDIRECT` chains through an [`EntryStore`]
#[derive(Debug, Clone, Copy)]
pub struct Resolver {
    max_hops: usize,
}

impl Default for Resolver {
    fn default() -> Self {
        Self {
            max_hops: DEFAULT_MAX_HOPS,
        }
    }
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_hops(max_hops: usize) -> Self {
        Self { max_hops }
    }

    pub fn max_hops(&self) -> usize {
        self.max_hops
    }

    /// Resolve `name` to the first non-redirect entry.
    ///
    /// At most `max_hops` entries are read, so a chain needing `max_hops`
    /// redirects fails. A cycle and an overlong chain are reported the same
    /// way, as [`ResolveError::RedirectLoop`].
    pub fn resolve(&self, name: &str, store: &dyn EntryStore) -> Result<Resolved, ResolveError> {
        let mut visited = HashSet::new();
        let mut current = store
            .get(name)
            .ok_or_else(|| ResolveError::NotFound(name.to_string()))?;
        visited.insert(normalize(&current.name));

        let mut hops = 0;
        while let Some(target) = current.redirect_target() {
            hops += 1;
            if hops >= self.max_hops {
                return Err(ResolveError::RedirectLoop {
                    start: name.to_string(),
                    hops,
                });
            }

            if !visited.insert(normalize(target)) {
                tracing::debug!("Redirect cycle at {target} while resolving {name}");
                return Err(ResolveError::RedirectLoop {
                    start: name.to_string(),
                    hops,
                });
            }

            tracing::trace!("Redirect {} -> {}", current.name, target);
            current = store
                .get(target)
                .ok_or_else(|| ResolveError::NotFound(target.to_string()))?;
        }

        Ok(Resolved {
            name: current.name.clone(),
            content: current.raw_content.clone(),
            hops,
        })
    }
}

/// Resolve with the default hop bound
pub fn resolve(name: &str, store: &dyn EntryStore) -> Result<Resolved, ResolveError> {
    Resolver::default().resolve(name, store)
}
