use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

use super::ManageTokens;

/// In-memory active-token set
///
/// Readers share the lock; `add_token` takes it exclusively. Entries are never
/// removed, so a token's effective lifetime is bounded by its own expiry.
#[derive(Debug, Default)]
pub struct TokenRegistry {
    tokens: RwLock<HashMap<String, bool>>,
}

impl TokenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tokens.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.read().is_empty()
    }
}

impl ManageTokens for TokenRegistry {
    fn add_token(&self, token: &str) -> bool {
        let mut tokens = self.tokens.write();
        tokens.insert(token.to_string(), true);
        debug!(active_tokens = tokens.len(), "Token registered");
        true
    }

    fn is_active_token(&self, token: &str) -> bool {
        self.tokens.read().get(token).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_unknown_token_is_inactive() {
        let registry = TokenRegistry::new();
        assert!(!registry.is_active_token("never-issued"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_add_then_active() {
        let registry = TokenRegistry::new();
        assert!(registry.add_token("aValidToken"));
        assert!(registry.is_active_token("aValidToken"));
        assert!(!registry.is_active_token("aValidToken "));
    }

    #[test]
    fn test_add_is_idempotent() {
        let registry = TokenRegistry::new();
        assert!(registry.add_token("aValidToken"));
        assert!(registry.add_token("aValidToken"));
        assert!(registry.is_active_token("aValidToken"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_concurrent_readers_and_writers() {
        let registry = Arc::new(TokenRegistry::new());

        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    for i in 0..100 {
                        let token = format!("token-{}-{}", worker, i);
                        assert!(registry.add_token(&token));
                        assert!(registry.is_active_token(&token));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.len(), 800);
        assert!(registry.is_active_token("token-7-99"));
    }
}
