// tests/sync_engine.rs
//! Integration tests for the incremental sync engine: classification,
//! write policy, filename handling and journal behavior across runs.

use pretty_assertions::assert_eq;
use serde_json::json;
use std::path::Path;
use tempfile::TempDir;
use topics2md::{
    Article, ArticleAssembler, DirectoryScanIndex, SyncEngine, SyncOutcome, SyncStatus,
};

fn article(id: &str, title: &str, edited: &str) -> Article {
    let value = json!({
        "id": id,
        "title": title,
        "authors": ["Test Author"],
        "last_edited_date": edited,
        "content": {
            "type": "doc",
            "content": [
                {"type": "paragraph", "content": [{"type": "text", "text": "Body."}]}
            ]
        }
    });
    serde_json::from_value(value).expect("article fixture should deserialize")
}

async fn assemble(article: &Article) -> String {
    ArticleAssembler::new(None)
        .assemble(article)
        .await
        .expect("assembly is infallible without a resolver")
}

fn run(out_dir: &Path, articles: &[Article]) -> Vec<SyncOutcome> {
    let index = DirectoryScanIndex::scan(out_dir).expect("scan should succeed");
    let mut engine = SyncEngine::new(out_dir, index);

    let rt = tokio::runtime::Runtime::new().unwrap();
    articles
        .iter()
        .enumerate()
        .map(|(i, a)| {
            let document = rt.block_on(assemble(a));
            engine
                .sync_article(a, i + 1, &document)
                .expect("sync should succeed")
        })
        .collect()
}

fn mtime(path: &Path) -> std::time::SystemTime {
    std::fs::metadata(path).unwrap().modified().unwrap()
}

#[test]
fn first_run_classifies_everything_new() {
    let dir = TempDir::new().unwrap();
    let articles = vec![
        article("id-1", "Alpha Story", "2024-05-01"),
        article("id-2", "Beta Story", "2024-05-02"),
    ];

    let outcomes = run(dir.path(), &articles);

    assert!(outcomes.iter().all(|o| o.status == SyncStatus::New));
    assert!(dir.path().join("2024-05-01-alpha-story.md").exists());
    assert!(dir.path().join("2024-05-02-beta-story.md").exists());
}

#[test]
fn second_identical_run_is_fully_unchanged_and_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let articles = vec![
        article("id-1", "Alpha Story", "2024-05-01"),
        article("id-2", "Beta Story", "2024-05-02"),
    ];

    run(dir.path(), &articles);
    let alpha = dir.path().join("2024-05-01-alpha-story.md");
    let before = mtime(&alpha);

    let outcomes = run(dir.path(), &articles);

    assert!(outcomes.iter().all(|o| o.status == SyncStatus::Unchanged));
    assert_eq!(mtime(&alpha), before, "unchanged files must not be rewritten");
}

#[test]
fn changed_content_is_classified_updated() {
    let dir = TempDir::new().unwrap();
    run(dir.path(), &[article("id-1", "Alpha Story", "2024-05-01")]);

    let mut edited = article("id-1", "Alpha Story", "2024-05-01");
    edited.key_takeaways = "Something new.".to_string();
    let outcomes = run(dir.path(), &[edited]);

    assert_eq!(outcomes[0].status, SyncStatus::Updated);
    let content = std::fs::read_to_string(dir.path().join("2024-05-01-alpha-story.md")).unwrap();
    assert!(content.contains("Something new."));
}

#[test]
fn retitled_article_moves_and_stale_file_is_removed() {
    let dir = TempDir::new().unwrap();
    run(dir.path(), &[article("id-1", "Old Title", "2024-05-01")]);
    assert!(dir.path().join("2024-05-01-old-title.md").exists());

    let outcomes = run(dir.path(), &[article("id-1", "New Title", "2024-05-01")]);

    assert_eq!(outcomes[0].status, SyncStatus::Updated);
    assert!(dir.path().join("2024-05-01-new-title.md").exists());
    assert!(
        !dir.path().join("2024-05-01-old-title.md").exists(),
        "the identity must not exist twice in the output directory"
    );
}

#[test]
fn identity_survives_a_rename_on_disk() {
    let dir = TempDir::new().unwrap();
    run(dir.path(), &[article("id-1", "Alpha Story", "2024-05-01")]);

    // Simulate an external rename — lookup must go by embedded ID, not name.
    std::fs::rename(
        dir.path().join("2024-05-01-alpha-story.md"),
        dir.path().join("renamed-by-hand.md"),
    )
    .unwrap();

    let outcomes = run(dir.path(), &[article("id-1", "Alpha Story", "2024-05-01")]);
    assert_eq!(outcomes[0].status, SyncStatus::Unchanged);
    assert_eq!(outcomes[0].filename, "renamed-by-hand.md");
}

#[test]
fn same_date_and_title_collision_gets_a_suffix() {
    let dir = TempDir::new().unwrap();
    let articles = vec![
        article("id-1", "Same Title", "2024-05-01"),
        article("id-2", "Same Title", "2024-05-01"),
    ];

    let outcomes = run(dir.path(), &articles);

    assert_eq!(outcomes[0].filename, "2024-05-01-same-title.md");
    assert_eq!(outcomes[1].filename, "2024-05-01-same-title-2.md");
    assert!(dir.path().join("2024-05-01-same-title-2.md").exists());
}

#[test]
fn empty_slug_falls_back_to_position() {
    let dir = TempDir::new().unwrap();
    let outcomes = run(dir.path(), &[article("id-1", "???", "2024-05-01")]);
    assert_eq!(outcomes[0].filename, "2024-05-01-article-1.md");
}

#[test]
fn undated_article_omits_the_date_prefix() {
    let dir = TempDir::new().unwrap();
    let outcomes = run(dir.path(), &[article("id-1", "No Date Here", "")]);
    assert_eq!(outcomes[0].filename, "no-date-here.md");
}
