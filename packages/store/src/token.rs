//! Bearer token persistence.

use crate::kv::KeyValueStore;

/// Storage key holding the bearer token between visits.
pub const TOKEN_KEY: &str = "token";

/// Read the persisted token. An empty value counts as no token.
pub fn load_token<S: KeyValueStore + ?Sized>(store: &S) -> Option<String> {
    store
        .get(TOKEN_KEY)
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

pub fn save_token<S: KeyValueStore + ?Sized>(store: &S, token: &str) {
    store.set(TOKEN_KEY, token);
}

pub fn clear_token<S: KeyValueStore + ?Sized>(store: &S) {
    store.remove(TOKEN_KEY);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    #[test]
    fn test_token_lifecycle() {
        let store = MemoryStore::new();
        assert!(load_token(&store).is_none());

        save_token(&store, "abc.def");
        assert_eq!(load_token(&store).as_deref(), Some("abc.def"));

        clear_token(&store);
        assert!(load_token(&store).is_none());
    }

    #[test]
    fn test_blank_token_is_absent() {
        let store = MemoryStore::new();
        store.set(TOKEN_KEY, "   ");
        assert!(load_token(&store).is_none());
    }
}
