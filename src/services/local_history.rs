use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{errors::AppResult, models::domain::LessonPlan};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct LocalHistoryEntry {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub plan: LessonPlan,
}

/// Most-recent-first record of generated lesson plans kept in one JSON file.
/// The file never holds more than `capacity` entries in total; readers only
/// see their own. A missing or unreadable file reads as empty history.
pub struct LocalHistory {
    path: PathBuf,
    capacity: usize,
    lock: Mutex<()>,
}

impl LocalHistory {
    pub fn new(path: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            path: path.into(),
            capacity,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn record(&self, plan: &LessonPlan) -> AppResult<LocalHistoryEntry> {
        let _guard = self.lock.lock().await;

        let entry = LocalHistoryEntry {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            plan: plan.clone(),
        };

        let mut entries = self.read_entries().await;
        entries.insert(0, entry.clone());
        entries.truncate(self.capacity);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(&entries)?;
        tokio::fs::write(&self.path, json).await?;

        Ok(entry)
    }

    pub async fn list_for_user(&self, user_id: &str) -> Vec<LocalHistoryEntry> {
        let _guard = self.lock.lock().await;
        self.read_entries()
            .await
            .into_iter()
            .filter(|e| e.plan.user_id == user_id)
            .collect()
    }

    async fn read_entries(&self) -> Vec<LocalHistoryEntry> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                log::warn!("Could not read local history {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            log::warn!(
                "Local history {} is corrupt, starting empty: {}",
                self.path.display(),
                e
            );
            Vec::new()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;

    fn temp_history(capacity: usize) -> LocalHistory {
        let path = std::env::temp_dir()
            .join(format!("sahayak-history-{}", Uuid::new_v4()))
            .join("history.json");
        LocalHistory::new(path, capacity)
    }

    async fn cleanup(history: &LocalHistory) {
        if let Some(dir) = history.path().parent() {
            let _ = tokio::fs::remove_dir_all(dir).await;
        }
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_empty() {
        let history = temp_history(50);
        assert!(history.list_for_user("teacher-1").await.is_empty());
    }

    #[tokio::test]
    async fn test_entries_are_most_recent_first_and_bounded() {
        let history = temp_history(50);

        for i in 0..55 {
            let mut plan = fixtures::lesson_plan("teacher-1");
            plan.title = format!("Plan {}", i);
            history.record(&plan).await.unwrap();
        }

        let entries = history.list_for_user("teacher-1").await;
        assert_eq!(entries.len(), 50);
        assert_eq!(entries[0].plan.title, "Plan 54");
        assert_eq!(entries[49].plan.title, "Plan 5");

        cleanup(&history).await;
    }

    #[tokio::test]
    async fn test_users_only_see_their_own_entries() {
        let history = temp_history(50);

        history.record(&fixtures::lesson_plan("teacher-2")).await.unwrap();
        for _ in 0..3 {
            history.record(&fixtures::lesson_plan("teacher-1")).await.unwrap();
        }

        let own = history.list_for_user("teacher-1").await;
        assert_eq!(own.len(), 3);
        assert!(own.iter().all(|e| e.plan.user_id == "teacher-1"));
        assert_eq!(history.list_for_user("teacher-2").await.len(), 1);

        cleanup(&history).await;
    }

    #[tokio::test]
    async fn test_file_stays_bounded_across_many_users() {
        let history = temp_history(50);

        for i in 0..60 {
            let plan = fixtures::lesson_plan(&format!("teacher-{}", i));
            history.record(&plan).await.unwrap();
        }

        let bytes = tokio::fs::read(history.path()).await.unwrap();
        let stored: Vec<LocalHistoryEntry> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(stored.len(), 50);
        assert_eq!(stored[0].plan.user_id, "teacher-59");
        assert_eq!(stored[49].plan.user_id, "teacher-10");

        assert!(history.list_for_user("teacher-9").await.is_empty());
        assert_eq!(history.list_for_user("teacher-10").await.len(), 1);

        cleanup(&history).await;
    }

    #[tokio::test]
    async fn test_corrupt_file_reads_as_empty_and_is_replaced() {
        let history = temp_history(50);
        if let Some(dir) = history.path().parent() {
            tokio::fs::create_dir_all(dir).await.unwrap();
        }
        tokio::fs::write(history.path(), b"{not json").await.unwrap();

        assert!(history.list_for_user("teacher-1").await.is_empty());

        history.record(&fixtures::lesson_plan("teacher-1")).await.unwrap();
        assert_eq!(history.list_for_user("teacher-1").await.len(), 1);

        cleanup(&history).await;
    }
}
