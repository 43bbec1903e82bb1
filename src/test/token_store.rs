#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::Utc;
    use tempfile::tempdir;

    use crate::session::{AUTH_TOKEN_KEY, Session, TokenStore, token_store::ENTRY_TTL_MS};

    #[test]
    fn set_then_get_returns_value() {
        let dir = tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("session.json"));

        store.set(AUTH_TOKEN_KEY, "abc").unwrap();

        assert_eq!(store.get(AUTH_TOKEN_KEY), Some("abc".to_string()));
    }

    #[test]
    fn unexpired_entry_survives_immediate_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = TokenStore::new(path.clone());

        let expiry = Utc::now().timestamp_millis() + 1000;
        fs::write(
            &path,
            format!(r#"{{"authToken":{{"value":"abc","expiry":{}}}}}"#, expiry),
        )
        .unwrap();

        assert_eq!(store.get(AUTH_TOKEN_KEY), Some("abc".to_string()));
    }

    #[test]
    fn expired_entry_is_evicted_on_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = TokenStore::new(path.clone());

        let expiry = Utc::now().timestamp_millis() - 1;
        fs::write(
            &path,
            format!(r#"{{"authToken":{{"value":"abc","expiry":{}}}}}"#, expiry),
        )
        .unwrap();

        assert_eq!(store.get(AUTH_TOKEN_KEY), None);

        // The eviction must also be persisted
        let contents = fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("abc"));
    }

    #[test]
    fn stored_entry_carries_the_expiry_window() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = TokenStore::new(path.clone());

        let before = Utc::now().timestamp_millis();
        store.set(AUTH_TOKEN_KEY, "abc").unwrap();

        let items: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let expiry = items[AUTH_TOKEN_KEY]["expiry"].as_i64().unwrap();
        assert!(expiry >= before + ENTRY_TTL_MS);
    }

    #[test]
    fn corrupt_store_reads_as_empty_and_is_discarded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = TokenStore::new(path.clone());

        fs::write(&path, "not json").unwrap();

        assert_eq!(store.get(AUTH_TOKEN_KEY), None);
        assert!(!path.exists());
    }

    #[test]
    fn remove_deletes_unconditionally() {
        let dir = tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("session.json"));

        store.set(AUTH_TOKEN_KEY, "abc").unwrap();
        store.remove(AUTH_TOKEN_KEY);

        assert_eq!(store.get(AUTH_TOKEN_KEY), None);
    }

    #[test]
    fn session_round_trip() {
        let dir = tempdir().unwrap();
        let session = Session::new(TokenStore::new(dir.path().join("session.json")));

        assert_eq!(session.token(), None);

        session.store_token("abc").unwrap();
        assert_eq!(session.token(), Some("abc".to_string()));

        session.clear();
        assert_eq!(session.token(), None);
    }
}
