//! Versioned vocabulary export and import
//!
//! The export is a plain JSON document so learners can move their
//! words between devices or back them up by hand. Import follows the
//! batch-insert rules: duplicates are skipped, malformed records are
//! collected per record, and one bad entry never sinks the rest.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::file_storage::{Result, StorageError};
use super::models::LearnerContext;
use crate::collaborators::CancellationToken;
use crate::vocabulary::{VocabularyItem, VocabularyStore};

/// Current export document version
pub const EXPORT_VERSION: u32 = 1;

/// Full-content export of everything visible in a scope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyExport {
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    pub item_count: usize,
    pub items: Vec<VocabularyItem>,
}

/// One rejected import record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportError {
    /// Position of the record in the document
    pub index: usize,
    #[serde(default)]
    pub word: String,
    pub reason: String,
}

/// Outcome of an import run. `success` means every record was either
/// imported or skipped as a duplicate; skips alone are not a failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub success: bool,
    pub imported_count: usize,
    pub skipped_count: usize,
    pub errors: Vec<ImportError>,
}

/// Envelope used on the import side. Items stay raw so a single
/// malformed record can be reported instead of failing the document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExportEnvelope {
    version: u32,
    #[serde(default)]
    items: Vec<serde_json::Value>,
}

/// Serialize the full visible content of a scope
pub fn export_vocabulary(
    store: &VocabularyStore,
    ctx: &LearnerContext,
) -> Result<VocabularyExport> {
    let items = store.get_all(ctx)?;
    Ok(VocabularyExport {
        version: EXPORT_VERSION,
        exported_at: Utc::now(),
        item_count: items.len(),
        items,
    })
}

/// Import a previously exported document into a scope.
///
/// Duplicate keys are skipped, malformed records are collected in the
/// report, and cancellation stops further work without rolling back
/// records already imported.
pub fn import_vocabulary(
    store: &VocabularyStore,
    ctx: &LearnerContext,
    payload: &str,
    cancel: Option<&CancellationToken>,
) -> Result<ImportReport> {
    let envelope: ExportEnvelope = serde_json::from_str(payload)?;

    if envelope.version > EXPORT_VERSION {
        return Err(StorageError::InvalidOperation(format!(
            "unsupported export version {} (newest known is {})",
            envelope.version, EXPORT_VERSION
        )));
    }

    let mut report = ImportReport {
        success: true,
        imported_count: 0,
        skipped_count: 0,
        errors: Vec::new(),
    };

    for (index, raw) in envelope.items.into_iter().enumerate() {
        if cancel.map(|c| c.is_cancelled()).unwrap_or(false) {
            log::info!("import cancelled after {} records", report.imported_count);
            break;
        }

        let word = raw
            .get("word")
            .and_then(|w| w.as_str())
            .unwrap_or_default()
            .to_string();

        let item: VocabularyItem = match serde_json::from_value(raw) {
            Ok(item) => item,
            Err(e) => {
                report.errors.push(ImportError {
                    index,
                    word,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        if item.word.trim().is_empty() || item.translation.trim().is_empty() {
            report.errors.push(ImportError {
                index,
                word: item.word,
                reason: "empty word or translation".to_string(),
            });
            continue;
        }

        if store.restore(ctx, item)? {
            report.imported_count += 1;
        } else {
            report.skipped_count += 1;
        }
    }

    report.success = report.errors.is_empty();
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::DataRoot;
    use crate::vocabulary::{ItemDraft, Origin, SchedulerConfig};
    use tempfile::TempDir;

    fn open_store(dir: &TempDir) -> VocabularyStore {
        let root = DataRoot::new(dir.path().to_path_buf());
        root.init().unwrap();
        VocabularyStore::new(&root, SchedulerConfig::default()).unwrap()
    }

    fn seed(store: &VocabularyStore, ctx: &LearnerContext, words: &[&str]) {
        for word in words {
            store
                .add(ctx, ItemDraft::new(*word, format!("{}-en", word), ""), Origin::Seed)
                .unwrap();
        }
    }

    #[test]
    fn test_round_trip_into_empty_store() {
        let dir_a = TempDir::new().unwrap();
        let store_a = open_store(&dir_a);
        let ctx = LearnerContext::learner("anna");

        seed(&store_a, &ctx, &["eins", "zwei", "drei"]);
        store_a.mark_reviewed(&ctx, "eins", true).unwrap();

        let export = export_vocabulary(&store_a, &ctx).unwrap();
        let payload = serde_json::to_string(&export).unwrap();

        let dir_b = TempDir::new().unwrap();
        let store_b = open_store(&dir_b);
        let report = import_vocabulary(&store_b, &ctx, &payload, None).unwrap();

        assert!(report.success);
        assert_eq!(report.imported_count, export.item_count);
        assert_eq!(report.skipped_count, 0);

        let restored = store_b.get(&ctx, "eins").unwrap().unwrap();
        assert!(restored.mastered);
        assert_eq!(restored.review_interval_days, 2);
        assert_eq!(store_b.total_count(&ctx).unwrap(), 3);
    }

    #[test]
    fn test_overlapping_keys_are_skipped() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        let ctx = LearnerContext::learner("anna");

        seed(&store, &ctx, &["eins", "zwei"]);
        let export = export_vocabulary(&store, &ctx).unwrap();
        let payload = serde_json::to_string(&export).unwrap();

        let report = import_vocabulary(&store, &ctx, &payload, None).unwrap();
        assert!(report.success);
        assert_eq!(report.imported_count, 0);
        assert_eq!(report.skipped_count, 2);
        assert_eq!(store.total_count(&ctx).unwrap(), 2);
    }

    #[test]
    fn test_malformed_records_do_not_abort_import() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        let ctx = LearnerContext::learner("anna");

        let payload = r#"{
            "version": 1,
            "exportedAt": "2026-01-05T10:00:00Z",
            "itemCount": 3,
            "items": [
                {"word": "eins", "translation": "one", "createdAt": "2026-01-05T10:00:00Z"},
                {"word": "kaputt"},
                {"word": "", "translation": "empty", "createdAt": "2026-01-05T10:00:00Z"}
            ]
        }"#;

        let report = import_vocabulary(&store, &ctx, payload, None).unwrap();
        assert!(!report.success);
        assert_eq!(report.imported_count, 1);
        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.errors[0].index, 1);
        assert_eq!(report.errors[0].word, "kaputt");
        assert!(store.exists(&ctx, "eins").unwrap());
    }

    #[test]
    fn test_future_version_is_rejected() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        let ctx = LearnerContext::global();

        let payload = r#"{"version": 99, "items": []}"#;
        let err = import_vocabulary(&store, &ctx, payload, None).unwrap_err();
        assert!(matches!(err, StorageError::InvalidOperation(_)));
    }

    #[test]
    fn test_import_clamps_tampered_interval() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        let ctx = LearnerContext::global();

        let payload = r#"{
            "version": 1,
            "items": [
                {"word": "wild", "translation": "wild",
                 "createdAt": "2026-01-05T10:00:00Z",
                 "lastReviewed": "2026-01-05T10:00:00Z",
                 "reviewIntervalDays": 4000}
            ]
        }"#;

        let report = import_vocabulary(&store, &ctx, payload, None).unwrap();
        assert_eq!(report.imported_count, 1);
        let item = store.get(&ctx, "wild").unwrap().unwrap();
        assert_eq!(item.review_interval_days, 90);
    }

    #[test]
    fn test_cancelled_import_keeps_committed_records() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        let ctx = LearnerContext::global();

        let cancel = CancellationToken::new();
        cancel.cancel();

        let payload = r#"{
            "version": 1,
            "items": [
                {"word": "eins", "translation": "one", "createdAt": "2026-01-05T10:00:00Z"}
            ]
        }"#;
        let report = import_vocabulary(&store, &ctx, payload, Some(&cancel)).unwrap();
        assert_eq!(report.imported_count, 0);
        assert_eq!(store.total_count(&ctx).unwrap(), 0);
    }
}
