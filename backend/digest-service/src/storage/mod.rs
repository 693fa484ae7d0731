mod memory;

pub use memory::TokenRegistry;

/// Operations every token store has to support.
pub trait ManageTokens: Send + Sync {
    /// Record a token as active. Returns `false` if the write did not happen.
    fn add_token(&self, token: &str) -> bool;

    /// Whether the token was registered and is still active. Unknown tokens are inactive.
    fn is_active_token(&self, token: &str) -> bool;
}
