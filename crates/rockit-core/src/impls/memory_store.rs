//! InMemoryStore - 開発・テスト用のキー・バリューストア

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::ports::{KeyValueStore, StorageError};

/// InMemoryStore はプロセス内のキー・バリューストア
///
/// # 実装詳細
/// - `Arc<Mutex<HashMap>>` なので clone したハンドル同士で中身を共有する
/// - テストでは store に渡したハンドルとは別の clone から中身を確認できる
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 初期値つきで作成（保存済みゲームの再現用）
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        if let Ok(mut entries) = store.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        store
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .lock()
            .map(|entries| entries.contains_key(key))
            .unwrap_or(false)
    }

    fn locked(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.entries
            .lock()
            .map_err(|e| StorageError::Unavailable(format!("lock poisoned: {e}")))
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.locked()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.locked()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.locked()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let store = InMemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap(), Some("v2".to_string()));

        store.remove("k").unwrap();
        assert!(!store.contains("k"));
        // 存在しないキーの削除も成功
        store.remove("k").unwrap();
    }

    #[test]
    fn clones_share_entries() {
        let store = InMemoryStore::new();
        let handle = store.clone();
        store.set("k", "v").unwrap();
        assert!(handle.contains("k"));
    }
}
