/// Why an entry name could not be turned into final content
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("Entry not found: {0}")]
    NotFound(String),

    #[error("Redirect loop or chain too long starting at {start} ({hops} hops)")]
    RedirectLoop { start: String, hops: usize },
}
