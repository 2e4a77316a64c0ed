use super::GenerationSettings;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedResult {
    pub id: Uuid,
    pub prompt: String,
    pub result: String,
    pub settings: GenerationSettings,
    pub created_at: DateTime<Utc>,
}

impl SavedResult {
    pub fn new(prompt: String, result: String, settings: GenerationSettings) -> Self {
        Self {
            id: Uuid::new_v4(),
            prompt,
            result,
            settings,
            created_at: Utc::now(),
        }
    }
}

/// Generated results, newest first. Owned by the caller and handed to the
/// generator explicitly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct History {
    entries: Vec<SavedResult>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: SavedResult) -> &SavedResult {
        self.entries.insert(0, entry);
        &self.entries[0]
    }

    pub fn remove(&mut self, id: Uuid) -> Option<SavedResult> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(index))
    }

    pub fn get(&self, id: Uuid) -> Option<&SavedResult> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn entries(&self) -> &[SavedResult] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(prompt: &str) -> SavedResult {
        SavedResult::new(
            prompt.to_string(),
            format!("result for {prompt}"),
            GenerationSettings::default(),
        )
    }

    #[test]
    fn test_newest_first() {
        let mut history = History::new();
        history.record(entry("first"));
        history.record(entry("second"));

        let prompts: Vec<_> = history.entries().iter().map(|e| e.prompt.as_str()).collect();
        assert_eq!(prompts, vec!["second", "first"]);
    }

    #[test]
    fn test_remove_and_get() {
        let mut history = History::new();
        let id = history.record(entry("keep me")).id;
        let other = history.record(entry("drop me")).id;

        assert_eq!(history.remove(other).unwrap().prompt, "drop me");
        assert!(history.remove(other).is_none());
        assert_eq!(history.get(id).unwrap().result, "result for keep me");
        assert_eq!(history.len(), 1);

        history.clear();
        assert!(history.is_empty());
    }
}
