/*!
 * Export to files and import back through the bulk commands
 */

use vocabacov::bulk::{anki_path, export_book, import_book};
use vocabacov::database::{Phrase, PhraseRepository, PhraseStatus, Repository};
use vocabacov::errors::AppError;
use vocabacov::formats::BulkFormat;

use crate::common::{create_temp_dir, create_test_file, sample_phrases};

fn triples(phrases: &[Phrase]) -> Vec<(String, String, String)> {
    let mut triples: Vec<_> = phrases
        .iter()
        .map(|p| (p.lang.clone(), p.phrase.clone(), p.translation.clone()))
        .collect();
    triples.sort();
    triples
}

async fn filled_repository() -> Repository {
    let repo = Repository::new_in_memory().unwrap();
    repo.insert_all(sample_phrases()).await.unwrap();
    repo.set_status("es", PhraseStatus::Archived).await.unwrap();
    repo
}

#[tokio::test]
async fn test_internalExport_thenImport_shouldRestoreEveryPhraseAsActive() {
    let dir = create_temp_dir().unwrap();
    let path = dir.path().join("backup").join("dump.json");
    let source = filled_repository().await;

    let files = export_book(&source, BulkFormat::Internal, &path).await.unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(
        files[0].counts,
        vec![("en".to_string(), 3), ("es".to_string(), 1)]
    );

    let target = Repository::new_in_memory().unwrap();
    let stored = import_book(&target, BulkFormat::Internal, &path, None).await.unwrap();

    assert_eq!(stored, 4);
    let restored = target.query_all().await.unwrap();
    assert_eq!(triples(&restored), triples(&sample_phrases()));
    assert!(restored.iter().all(Phrase::is_active));
}

#[tokio::test]
async fn test_ankiExport_thenImport_shouldRestoreOneLanguage() {
    let dir = create_temp_dir().unwrap();
    let base = dir.path().join("cards");
    let source = filled_repository().await;

    let files = export_book(&source, BulkFormat::Anki, &base).await.unwrap();
    assert_eq!(files.len(), 2);

    let target = Repository::new_in_memory().unwrap();
    let stored = import_book(&target, BulkFormat::Anki, &anki_path(&base, "en"), Some("en"))
        .await
        .unwrap();

    assert_eq!(stored, 3);
    let en: Vec<Phrase> = sample_phrases().into_iter().filter(|p| p.lang == "en").collect();
    assert_eq!(target.query_active("en").await.unwrap(), en);
}

#[tokio::test]
async fn test_import_withBrokenFile_shouldStoreNothing() {
    let dir = create_temp_dir().unwrap();
    let path = create_test_file(
        dir.path(),
        "broken.txt",
        "#separator:tab\ncruel\tжестокий\nlonely\n",
    )
    .unwrap();
    let repo = Repository::new_in_memory().unwrap();

    let result = import_book(&repo, BulkFormat::Anki, &path, Some("en")).await;

    assert!(matches!(result, Err(AppError::Format(_))));
    assert!(repo.query_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_insertAll_toFileDatabase_shouldSurviveReopen() {
    let dir = create_temp_dir().unwrap();
    let db_path = dir.path().join("vocabacov.db");
    {
        let db = vocabacov::database::DatabaseConnection::new(&db_path).unwrap();
        Repository::new(db).insert_all(sample_phrases()).await.unwrap();
    }

    let db = vocabacov::database::DatabaseConnection::new(&db_path).unwrap();
    let stats = db.stats().await.unwrap();

    assert_eq!(stats.total_phrases, 4);
    assert_eq!(stats.active_phrases, 4);
    assert_eq!(stats.languages, 2);
}
