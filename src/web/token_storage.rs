use cached::{Cached, TimedSizedCache};
use uuid::Uuid;

const TOKEN_STORAGE_SIZE: usize = 10_000;
const TOKEN_LIFESPAN_IN_SECONDS: u64 = 60 * 60 * 24 * 8;

/// Access tokens issued at login, each one associated to the identifier of the logged user.
/// Tokens expire after eight days. When the storage is full, the oldest tokens are dropped first.
#[derive(Debug)]
pub struct TokenStorage {
    tokens: TimedSizedCache<String, String>,
}

impl TokenStorage {
    /// Create a new opaque token for the user.
    pub fn issue(&mut self, user_id: String) -> String {
        let token = Uuid::new_v4().to_string();
        self.tokens.cache_set(token.clone(), user_id);
        token
    }

    pub fn get(&mut self, token: &str) -> Option<&String> {
        self.tokens.cache_get(token)
    }

    pub fn revoke(&mut self, token: &str) -> Option<String> {
        self.tokens.cache_remove(token)
    }
}

impl Default for TokenStorage {
    fn default() -> Self {
        let tokens =
            TimedSizedCache::with_size_and_lifespan(TOKEN_STORAGE_SIZE, TOKEN_LIFESPAN_IN_SECONDS);
        Self { tokens }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Storage holding a single token for the given user.
    pub fn storage_with_token(user_id: &str) -> (String, Mutex<TokenStorage>) {
        let mut storage = TokenStorage::default();
        let token = storage.issue(user_id.to_owned());
        (token, Mutex::new(storage))
    }

    #[test]
    fn should_issue_distinct_tokens() {
        let mut storage = TokenStorage::default();

        let first = storage.issue("user-1".to_owned());
        let second = storage.issue("user-1".to_owned());

        assert_ne!(first, second);
        assert_eq!(Some(&"user-1".to_owned()), storage.get(&first));
        assert_eq!(Some(&"user-1".to_owned()), storage.get(&second));
    }

    #[test]
    fn should_revoke_token() {
        let mut storage = TokenStorage::default();
        let token = storage.issue("user-1".to_owned());

        assert_eq!(Some("user-1".to_owned()), storage.revoke(&token));
        assert_eq!(None, storage.get(&token));
        assert_eq!(None, storage.revoke(&token));
    }

    #[test]
    fn should_drop_oldest_token_when_full() {
        let mut storage = TokenStorage::default();
        let first = storage.issue("user-0".to_owned());
        (1..TOKEN_STORAGE_SIZE).for_each(|id| {
            storage.issue(format!("user-{id}"));
        });
        assert_eq!(TOKEN_STORAGE_SIZE, storage.tokens.cache_size());

        storage.issue("last".to_owned());

        assert_eq!(TOKEN_STORAGE_SIZE, storage.tokens.cache_size());
        assert_eq!(None, storage.get(&first));
    }

    #[test]
    fn should_not_find_unknown_token() {
        let mut storage = TokenStorage::default();

        assert_eq!(None, storage.get("0ea9a5fb-0f46-4057-902a-2552ed956bde"));
    }
}
