/*!
 * Bulk export and import of the phrase store.
 *
 * Used by the `export` and `import` subcommands. Export dumps every phrase,
 * archived ones included; import stores everything it reads as active.
 */

use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::database::repository::PhraseRepository;
use crate::errors::AppError;
use crate::formats::{BulkFormat, PhraseBook, anki, internal};

/// One file written by [`export_book`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub path: PathBuf,
    /// Languages in the file, with their phrase counts
    pub counts: Vec<(String, usize)>,
}

/// Path of the per-language Anki file derived from `base`: `<stem>_<lang>.txt`
pub fn anki_path(base: &Path, lang: &str) -> PathBuf {
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    base.with_file_name(format!("{}_{}.txt", stem, lang))
}

/// Dump every stored phrase to `path` in `format`
pub async fn export_book<R>(
    repository: &R,
    format: BulkFormat,
    path: &Path,
) -> Result<Vec<ExportedFile>, AppError>
where
    R: PhraseRepository + ?Sized,
{
    let book: PhraseBook = repository.query_all().await?.into_iter().collect();
    if book.is_empty() {
        info!("No phrases stored, nothing to export");
        return Ok(Vec::new());
    }

    let files = match format {
        BulkFormat::Internal => {
            let data = internal::write(&book)?;
            write_file(path, &data).await?;
            vec![ExportedFile {
                path: path.to_path_buf(),
                counts: book
                    .iter()
                    .map(|(lang, phrases)| (lang.to_string(), phrases.len()))
                    .collect(),
            }]
        }
        BulkFormat::Anki => {
            let mut files = Vec::new();
            for (lang, phrases) in book.iter() {
                let target = anki_path(path, lang);
                write_file(&target, &anki::write(phrases)).await?;
                files.push(ExportedFile {
                    path: target,
                    counts: vec![(lang.to_string(), phrases.len())],
                });
            }
            files
        }
    };

    for file in &files {
        for (lang, count) in &file.counts {
            info!("Exported {} {} phrases to {:?}", count, lang, file.path);
        }
    }
    Ok(files)
}

/// Load phrases from `path` and store them in one batch; returns the number stored
///
/// Anki files carry no language, so `lang` is required for them and ignored otherwise.
pub async fn import_book<R>(
    repository: &R,
    format: BulkFormat,
    path: &Path,
    lang: Option<&str>,
) -> Result<usize, AppError>
where
    R: PhraseRepository + ?Sized,
{
    let data = tokio::fs::read(path)
        .await
        .map_err(|e| AppError::File(format!("Failed to read {:?}: {}", path, e)))?;

    let book = match format {
        BulkFormat::Internal => internal::read(&data)?,
        BulkFormat::Anki => {
            let lang = lang
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .ok_or_else(|| AppError::Usage("anki import needs --lang".to_string()))?;
            let text = String::from_utf8(data)
                .map_err(|e| AppError::File(format!("{:?} is not UTF-8: {}", path, e)))?;
            anki::read(lang, &text)?
        }
    };

    for (lang, phrases) in book.iter() {
        debug!("Importing {} {} phrases", phrases.len(), lang);
    }

    let stored = repository.insert_all(book.into_phrases()).await?;
    info!("Imported {} phrases from {:?}", stored, path);
    Ok(stored)
}

async fn write_file(path: &Path, data: &[u8]) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, data)
        .await
        .map_err(|e| AppError::File(format!("Failed to write {:?}: {}", path, e)))
}
