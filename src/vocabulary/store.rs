//! Storage operations for vocabulary items
//!
//! Layout under the data directory:
//! ```text
//! vocabulary/
//! ├── global.json              # Shared seed corpus
//! └── learners/
//!     └── learner-{id}.json    # One document per learner scope
//! ```
//!
//! Each document is a JSON array of items. Every mutation is a single
//! load-mutate-save of one document with an atomic replace, which is
//! what gives per-item read-modify-write atomicity under the
//! single-writer model.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};

use super::models::{normalize_key, ItemDraft, Origin, VocabularyItem};
use super::scheduler::{apply_review, SchedulerConfig};
use crate::collaborators::CancellationToken;
use crate::storage::file_storage::write_json_atomic;
use crate::storage::{DataRoot, LearnerContext, OwnerScope, Result, StorageError};

/// Storage manager for vocabulary items
pub struct VocabularyStore {
    vocab_dir: PathBuf,
    learners_dir: PathBuf,
    scheduler: SchedulerConfig,
}

impl VocabularyStore {
    /// Open the vocabulary store, creating its directories if needed
    pub fn new(root: &DataRoot, scheduler: SchedulerConfig) -> Result<Self> {
        let vocab_dir = root.vocabulary_dir();
        let learners_dir = vocab_dir.join("learners");

        fs::create_dir_all(&learners_dir).map_err(|e| {
            StorageError::Unavailable(format!(
                "cannot open vocabulary store at {}: {}",
                vocab_dir.display(),
                e
            ))
        })?;

        Ok(Self {
            vocab_dir,
            learners_dir,
            scheduler,
        })
    }

    /// Get the document path for a scope
    fn scope_path(&self, scope: &OwnerScope) -> PathBuf {
        match scope {
            OwnerScope::Global => self.vocab_dir.join("global.json"),
            OwnerScope::Learner { .. } => self
                .learners_dir
                .join(format!("{}.json", scope.storage_name())),
        }
    }

    /// Load the items of one scope document
    fn load_scope(&self, scope: &OwnerScope) -> Result<Vec<VocabularyItem>> {
        let path = self.scope_path(scope);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)?;
        let items: Vec<VocabularyItem> = serde_json::from_str(&content)?;
        Ok(items)
    }

    /// Save the items of one scope document (atomic replace)
    fn save_scope(&self, scope: &OwnerScope, items: &[VocabularyItem]) -> Result<()> {
        write_json_atomic(&self.scope_path(scope), &items)
    }

    /// All items visible in the context: the scope's own items plus,
    /// for learner scopes, the global corpus.
    pub fn get_all(&self, ctx: &LearnerContext) -> Result<Vec<VocabularyItem>> {
        let mut items = self.load_scope(&ctx.scope)?;
        if !ctx.scope.is_global() {
            items.extend(self.load_scope(&OwnerScope::Global)?);
        }
        Ok(items)
    }

    fn visible_keys(&self, ctx: &LearnerContext) -> Result<HashSet<String>> {
        Ok(self.get_all(ctx)?.iter().map(|i| i.key()).collect())
    }

    // ===== Insertion =====

    /// Insert a single item. Returns false (without touching storage)
    /// when the key already exists in the visible scope.
    pub fn add(&self, ctx: &LearnerContext, draft: ItemDraft, origin: Origin) -> Result<bool> {
        if draft.word.trim().is_empty() {
            return Err(StorageError::InvalidOperation(
                "cannot add an item with an empty word".to_string(),
            ));
        }

        if self.visible_keys(ctx)?.contains(&normalize_key(&draft.word)) {
            return Ok(false);
        }

        let item = VocabularyItem::new(draft, origin);
        let mut items = self.load_scope(&ctx.scope)?;
        items.push(item);
        self.save_scope(&ctx.scope, &items)?;
        Ok(true)
    }

    /// Like [`add`](Self::add), but surfaces the duplicate as an error
    /// for callers that need to tell the learner why nothing happened.
    pub fn add_strict(
        &self,
        ctx: &LearnerContext,
        draft: ItemDraft,
        origin: Origin,
    ) -> Result<VocabularyItem> {
        let word = draft.word.clone();
        if !self.add(ctx, draft, origin)? {
            return Err(StorageError::DuplicateWord(word));
        }
        // Just inserted, so the lookup cannot miss
        self.get(ctx, &word)?
            .ok_or_else(|| StorageError::WordNotFound(word))
    }

    /// Insert a batch of items, silently skipping duplicates (within
    /// the batch as well as against stored items). Returns the number
    /// actually inserted.
    ///
    /// Checks the cancellation token between items. Items inserted
    /// before cancellation stay committed.
    pub fn add_batch(
        &self,
        ctx: &LearnerContext,
        drafts: Vec<ItemDraft>,
        origin: Origin,
        cancel: Option<&CancellationToken>,
    ) -> Result<usize> {
        let mut seen = self.visible_keys(ctx)?;
        let mut items = self.load_scope(&ctx.scope)?;
        let mut inserted = 0;

        for draft in drafts {
            if cancel.map(|c| c.is_cancelled()).unwrap_or(false) {
                log::info!("batch insert cancelled after {} items", inserted);
                break;
            }
            if draft.word.trim().is_empty() {
                continue;
            }
            let key = normalize_key(&draft.word);
            if !seen.insert(key) {
                continue;
            }
            items.push(VocabularyItem::new(draft, origin));
            inserted += 1;
        }

        if inserted > 0 {
            self.save_scope(&ctx.scope, &items)?;
        }
        Ok(inserted)
    }

    // ===== Lookup =====

    pub fn exists(&self, ctx: &LearnerContext, word: &str) -> Result<bool> {
        Ok(self.visible_keys(ctx)?.contains(&normalize_key(word)))
    }

    pub fn get(&self, ctx: &LearnerContext, word: &str) -> Result<Option<VocabularyItem>> {
        let key = normalize_key(word);
        Ok(self.get_all(ctx)?.into_iter().find(|i| i.key() == key))
    }

    /// Case-insensitive substring search over word and translation
    pub fn search(&self, ctx: &LearnerContext, query: &str) -> Result<Vec<VocabularyItem>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        Ok(self
            .get_all(ctx)?
            .into_iter()
            .filter(|item| {
                item.word.to_lowercase().contains(&needle)
                    || item.translation.to_lowercase().contains(&needle)
            })
            .collect())
    }

    /// Items due for review at `now`, oldest due date first. Due-ness
    /// is computed here on demand, nothing schedules reviews in the
    /// background.
    pub fn due_for_review(
        &self,
        ctx: &LearnerContext,
        now: DateTime<Utc>,
    ) -> Result<Vec<VocabularyItem>> {
        let mut due: Vec<VocabularyItem> = self
            .get_all(ctx)?
            .into_iter()
            .filter(|item| item.is_due(now))
            .collect();
        due.sort_by(|a, b| a.next_review.cmp(&b.next_review));
        Ok(due)
    }

    // ===== Counters =====

    pub fn total_count(&self, ctx: &LearnerContext) -> Result<usize> {
        Ok(self.get_all(ctx)?.len())
    }

    pub fn mastered_count(&self, ctx: &LearnerContext) -> Result<usize> {
        Ok(self.get_all(ctx)?.iter().filter(|i| i.mastered).count())
    }

    /// Total number of reviews recorded across all visible items
    pub fn total_review_count(&self, ctx: &LearnerContext) -> Result<u64> {
        Ok(self
            .get_all(ctx)?
            .iter()
            .map(|i| i.times_reviewed as u64)
            .sum())
    }

    /// Re-insert an item carrying existing review state (import and
    /// restore paths). Duplicates in the visible scope are skipped.
    /// The interval is clamped back into bounds in case the document
    /// was edited by hand, and the due date is recomputed from it.
    pub fn restore(&self, ctx: &LearnerContext, mut item: VocabularyItem) -> Result<bool> {
        if self.visible_keys(ctx)?.contains(&item.key()) {
            return Ok(false);
        }

        item.review_interval_days = self.scheduler.clamp_interval(item.review_interval_days);
        item.next_review = item
            .last_reviewed
            .map(|d| d + chrono::Duration::days(item.review_interval_days as i64));

        let mut items = self.load_scope(&ctx.scope)?;
        items.push(item);
        self.save_scope(&ctx.scope, &items)?;
        Ok(true)
    }

    // ===== Mutation =====

    /// Find the scope document holding a word (own scope first, then
    /// global) together with the item's position in it
    fn locate(
        &self,
        ctx: &LearnerContext,
        key: &str,
    ) -> Result<Option<(OwnerScope, Vec<VocabularyItem>, usize)>> {
        let mut scopes = vec![ctx.scope.clone()];
        if !ctx.scope.is_global() {
            scopes.push(OwnerScope::Global);
        }

        for scope in scopes {
            let items = self.load_scope(&scope)?;
            if let Some(pos) = items.iter().position(|i| i.key() == key) {
                return Ok(Some((scope, items, pos)));
            }
        }
        Ok(None)
    }

    /// Run `mutate` against the item in whichever scope document holds
    /// it, saving that document back
    fn with_item<F>(&self, ctx: &LearnerContext, word: &str, mutate: F) -> Result<VocabularyItem>
    where
        F: FnOnce(&mut VocabularyItem),
    {
        let key = normalize_key(word);
        let (scope, mut items, pos) = self
            .locate(ctx, &key)?
            .ok_or_else(|| StorageError::WordNotFound(word.to_string()))?;

        mutate(&mut items[pos]);
        let updated = items[pos].clone();
        self.save_scope(&scope, &items)?;
        Ok(updated)
    }

    /// Record a review outcome for an item.
    ///
    /// A correct answer marks the item mastered (stamping the mastered
    /// date only the first time) and grows the interval. An incorrect
    /// answer shrinks the interval and leaves mastery untouched.
    pub fn mark_reviewed(
        &self,
        ctx: &LearnerContext,
        word: &str,
        was_correct: bool,
    ) -> Result<VocabularyItem> {
        let now = Utc::now();
        let scheduler = self.scheduler.clone();

        self.with_item(ctx, word, |item| {
            let outcome = apply_review(item, was_correct, now, &scheduler);
            item.times_reviewed += 1;
            item.last_reviewed = Some(now);
            item.review_interval_days = outcome.interval_days;
            item.next_review = Some(outcome.next_review);
            item.mastered = outcome.mastered;
            item.mastered_date = outcome.mastered_date;
        })
    }

    /// Explicitly demote an item back to learning. The mastered date
    /// is kept as history, the interval restarts at the floor.
    pub fn unmaster(&self, ctx: &LearnerContext, word: &str) -> Result<VocabularyItem> {
        let floor = self.scheduler.interval_floor_days;
        self.with_item(ctx, word, |item| {
            item.mastered = false;
            item.review_interval_days = floor;
            item.next_review = item
                .last_reviewed
                .map(|d| d + chrono::Duration::days(floor as i64));
        })
    }

    /// Replace translation and example without touching review state
    pub fn update_content(
        &self,
        ctx: &LearnerContext,
        word: &str,
        translation: String,
        example: String,
    ) -> Result<VocabularyItem> {
        self.with_item(ctx, word, |item| {
            item.translation = translation;
            item.example = example;
        })
    }
}
