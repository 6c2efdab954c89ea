use dfwiki_core::library::DEFAULT_MAX_MATCHES;
use dfwiki_core::redirect::{DEFAULT_MAX_HOPS, Resolver};
use serde::{Deserialize, Serialize};

fn default_max_matches() -> usize {
    DEFAULT_MAX_MATCHES
}

fn default_max_redirects() -> usize {
    DEFAULT_MAX_HOPS
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LookupConfig {
    /// 0 returns every match
    #[serde(default = "default_max_matches")]
    pub max_matches: usize,
    /// Entries read per resolution; a chain needing this many redirects fails
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            max_matches: default_max_matches(),
            max_redirects: default_max_redirects(),
        }
    }
}

impl LookupConfig {
    pub fn resolver(&self) -> Resolver {
        Resolver::with_max_hops(self.max_redirects)
    }
}
