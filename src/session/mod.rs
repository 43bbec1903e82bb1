pub mod token_store;

pub use token_store::TokenStore;

pub const AUTH_TOKEN_KEY: &str = "authToken";

/// Explicit session handle passed into every gateway call, so token
/// lifecycle is testable without any global storage.
#[derive(Clone, Debug)]
pub struct Session {
    store: TokenStore,
}

impl Session {
    pub fn new(store: TokenStore) -> Self {
        Self { store }
    }

    pub fn store_token(&self, token: &str) -> anyhow::Result<()> {
        self.store.set(AUTH_TOKEN_KEY, token)
    }

    pub fn token(&self) -> Option<String> {
        self.store.get(AUTH_TOKEN_KEY)
    }

    pub fn clear(&self) {
        self.store.remove(AUTH_TOKEN_KEY)
    }
}
