#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

//! Integration tests for dictionary loading: filesystem source, cache
//! coalescing, failure recovery.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use keysmith::{
    generate_passphrase_with_dictionary, DictionaryError, DictionaryLoader, DictionarySource,
    FetchError, FileSystemSource, Language,
};
use keysmith_core::{GenerationMetadata, PassphraseOptions};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

const EFF_SAMPLE: &str = "\
# name: EFF Large (sample)
# format: INDEX WORD
# language: en
# dice: 5
# size: 7776
11111 abacus
11112 abdomen
11113 abdominal
11114 abide
11115 abiding
11116 ability
";

/// Write `text` at `{root}{source_id}`, creating parent directories.
fn write_list(root: &Path, source_id: &str, text: &str) {
    let path = root.join(source_id.trim_start_matches('/'));
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, text).unwrap();
}

/// Counts fetches and sleeps so concurrent callers overlap.
struct SlowCountingSource {
    text: String,
    fetches: AtomicUsize,
}

#[async_trait]
impl DictionarySource for SlowCountingSource {
    async fn fetch(&self, _source_id: &str) -> Result<String, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok(self.text.clone())
    }
}

/// Fails the first `failures` fetches, then serves `text`.
struct FlakySource {
    text: String,
    failures: AtomicUsize,
    fetches: AtomicUsize,
}

#[async_trait]
impl DictionarySource for FlakySource {
    async fn fetch(&self, source_id: &str) -> Result<String, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let remaining = self.failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures.store(remaining - 1, Ordering::SeqCst);
            return Err(FetchError::NotFound(source_id.to_owned()));
        }
        Ok(self.text.clone())
    }
}

// ---------------------------------------------------------------------------
// Filesystem
// ---------------------------------------------------------------------------

#[tokio::test]
async fn loads_catalog_path_from_disk() {
    let dir = TempDir::new().unwrap();
    write_list(dir.path(), "/dictionaries/en/eff_large_diceware.txt", EFF_SAMPLE);

    let loader = DictionaryLoader::new(FileSystemSource::new(dir.path()));
    let dict = loader
        .load("/dictionaries/en/eff_large_diceware.txt")
        .await
        .unwrap();

    assert_eq!(dict.metadata().name, "EFF Large (sample)");
    assert_eq!(dict.metadata().dice, Some(5));
    // Declared size is advisory; the entry list is authoritative.
    assert_eq!(dict.metadata().size, 7776);
    assert_eq!(dict.word_count(), 6);

    let words: Vec<_> = dict.entries().iter().map(|e| e.word.as_str()).collect();
    assert_eq!(
        words,
        ["abacus", "abdomen", "abdominal", "abide", "abiding", "ability"]
    );
    assert_eq!(dict.entries()[5].index, "11116");
}

#[tokio::test]
async fn crlf_files_parse_like_lf() {
    let dir = TempDir::new().unwrap();
    write_list(dir.path(), "/lf.txt", "#name: T\napple\nbanana\n");
    write_list(dir.path(), "/crlf.txt", "#name: T\r\napple\r\nbanana\r\n");

    let loader = DictionaryLoader::new(FileSystemSource::new(dir.path()));
    let lf = loader.load("/lf.txt").await.unwrap();
    let crlf = loader.load("/crlf.txt").await.unwrap();
    assert_eq!(lf.entries(), crlf.entries());
    assert_eq!(crlf.metadata().name, "T");
}

#[tokio::test]
async fn missing_file_is_source_error() {
    let dir = TempDir::new().unwrap();
    let loader = DictionaryLoader::new(FileSystemSource::new(dir.path()));

    let err = loader.load("/dictionaries/en/beale_diceware.txt").await.unwrap_err();
    let DictionaryError::Source { source_id, source } = err else {
        panic!("expected source error");
    };
    assert_eq!(source_id, "/dictionaries/en/beale_diceware.txt");
    assert!(matches!(source, FetchError::NotFound(_)));
}

#[tokio::test]
async fn traversal_is_rejected() {
    let dir = TempDir::new().unwrap();
    let loader = DictionaryLoader::new(FileSystemSource::new(dir.path().join("lists")));
    write_list(dir.path(), "/secret.txt", "hunter2\n");

    let err = loader.load("/../secret.txt").await.unwrap_err();
    assert!(matches!(
        err,
        DictionaryError::Source {
            source: FetchError::InvalidIdentifier(_),
            ..
        }
    ));
}

// ---------------------------------------------------------------------------
// Cache behaviour
// ---------------------------------------------------------------------------

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_loads_share_one_fetch() {
    let source = Arc::new(SlowCountingSource {
        text: EFF_SAMPLE.into(),
        fetches: AtomicUsize::new(0),
    });
    let loader = Arc::new(DictionaryLoader::new(Arc::clone(&source)));

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let loader = Arc::clone(&loader);
            tokio::spawn(async move { loader.load("/shared.txt").await.unwrap() })
        })
        .collect();

    let mut dictionaries = Vec::new();
    for handle in handles {
        dictionaries.push(handle.await.unwrap());
    }

    assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
    assert!(dictionaries
        .windows(2)
        .all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
}

#[tokio::test]
async fn distinct_ids_fetch_separately() {
    let source = Arc::new(SlowCountingSource {
        text: EFF_SAMPLE.into(),
        fetches: AtomicUsize::new(0),
    });
    let loader = DictionaryLoader::new(Arc::clone(&source));

    let (a, b) = tokio::join!(loader.load("/a.txt"), loader.load("/b.txt"));
    assert!(!Arc::ptr_eq(&a.unwrap(), &b.unwrap()));
    assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn failed_load_is_retried() {
    let source = Arc::new(FlakySource {
        text: "apple\nbanana\n".into(),
        failures: AtomicUsize::new(1),
        fetches: AtomicUsize::new(0),
    });
    let loader = DictionaryLoader::new(Arc::clone(&source));

    assert!(loader.load("/flaky.txt").await.is_err());
    assert!(!loader.is_cached("/flaky.txt"));

    let dict = loader.load("/flaky.txt").await.unwrap();
    assert_eq!(dict.word_count(), 2);
    assert_eq!(source.fetches.load(Ordering::SeqCst), 2);

    // Cached now: no further fetches.
    loader.load("/flaky.txt").await.unwrap();
    assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn clear_cache_refetches() {
    let source = Arc::new(SlowCountingSource {
        text: EFF_SAMPLE.into(),
        fetches: AtomicUsize::new(0),
    });
    let loader = DictionaryLoader::new(Arc::clone(&source));

    loader.preload("/x.txt").await.unwrap();
    loader.clear_cache();
    assert!(loader.get_cached("/x.txt").is_none());
    loader.load("/x.txt").await.unwrap();
    assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
}

// ---------------------------------------------------------------------------
// End to end
// ---------------------------------------------------------------------------

#[tokio::test]
async fn catalog_generation_from_disk() {
    let dir = TempDir::new().unwrap();
    write_list(dir.path(), "/dictionaries/en/eff_large_diceware.txt", EFF_SAMPLE);
    let loader = DictionaryLoader::new(FileSystemSource::new(dir.path()));

    let options = PassphraseOptions {
        word_count: 5,
        separator: ".".into(),
        include_number: true,
        ..PassphraseOptions::default()
    };
    let result = generate_passphrase_with_dictionary(&loader, Language::En, "eff-large", &options)
        .await
        .unwrap();

    let parts: Vec<_> = result.value().split('.').collect();
    assert_eq!(parts.len(), 6);
    assert!(parts[5].len() == 4 && parts[5].chars().all(|c| c.is_ascii_digit()));

    // 5 * log2(6) + log2(10000)
    let expected = 5.0 * 6f64.log2() + 10_000f64.log2();
    assert!((result.entropy() - expected).abs() < 1e-9);

    let GenerationMetadata::Passphrase { words, .. } = result.metadata() else {
        panic!("expected passphrase metadata");
    };
    assert_eq!(words.len(), 5);
}
