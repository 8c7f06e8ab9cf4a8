//! Shared document tree: `file_items` rows for structure, `storage/v1`
//! objects for file bytes. Object keys must survive the storage service's
//! naming rules, hence the sanitization below.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Serialize;
use uuid::Uuid;

use crate::api::{ApiError, Backend};
use crate::models::FileEntry;

/// Storage bucket holding every uploaded document.
pub const BUCKET: &str = "documents";

/// Characters that need escaping inside an object-path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Make a file name safe for storage object keys: whitespace/underscore runs
/// become `-`, anything outside `[A-Za-z0-9_.-]` is dropped, dashes are
/// collapsed and trimmed, the stem is capped at 100 chars, and an empty stem
/// falls back to "file". The extension is preserved as-is.
pub fn sanitize_file_name(file_name: &str) -> String {
    let (stem, extension) = match file_name.rfind('.') {
        Some(idx) => file_name.split_at(idx),
        None => (file_name, ""),
    };

    let mut out = String::with_capacity(stem.len());
    let mut last_dash = false;
    for ch in stem.chars() {
        let mapped = if ch.is_whitespace() || ch == '_' {
            Some('-')
        } else if ch.is_ascii_alphanumeric() || ch == '-' || ch == '.' {
            Some(ch)
        } else {
            None
        };
        if let Some(c) = mapped {
            if c == '-' {
                if !last_dash {
                    out.push('-');
                }
                last_dash = true;
            } else {
                out.push(c);
                last_dash = false;
            }
        }
    }
    let trimmed: String = out.trim_matches('-').chars().take(100).collect();
    let stem = if trimmed.is_empty() { "file".to_string() } else { trimmed };
    format!("{stem}{extension}")
}

/// Object key for an entry, relative to the bucket root.
pub fn build_storage_path(parent_path: &str, sanitized_name: &str) -> String {
    if parent_path.is_empty() {
        sanitized_name.to_string()
    } else {
        format!("{parent_path}/{sanitized_name}")
    }
}

fn encoded_object_path(path: &str) -> String {
    path.split('/')
        .map(|seg| utf8_percent_encode(seg, PATH_SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// Browser-fetchable URL for a stored object.
pub fn public_url(backend: &Backend, path: &str) -> String {
    backend
        .config()
        .storage_url(&format!("object/public/{BUCKET}/{}", encoded_object_path(path)))
}

#[derive(Serialize)]
struct NewEntry<'a> {
    id: String,
    name: &'a str,
    sanitized_name: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    path: &'a str,
    parent_path: &'a str,
    file_size: Option<u64>,
    mime_type: Option<&'a str>,
}

/// Entries directly under `parent_path`, folders first then by name.
pub async fn list_dir(backend: &Backend, parent_path: &str) -> Result<Vec<FileEntry>, ApiError> {
    let resp = backend
        .get(&backend.config().rest_url("file_items"))
        .query(&[
            ("select", "*".to_string()),
            ("parent_path", format!("eq.{parent_path}")),
            ("order", "type.desc,name.asc".to_string()),
        ])
        .send()
        .await?;
    Ok(Backend::check(resp).await?.json().await?)
}

/// Folders exist only as rows; the storage service has no directories.
pub async fn create_folder(backend: &Backend, name: &str, parent_path: &str) -> Result<(), ApiError> {
    let sanitized = sanitize_file_name(name);
    let path = build_storage_path(parent_path, &sanitized);
    let resp = backend
        .post(&backend.config().rest_url("file_items"))
        .json(&NewEntry {
            id: Uuid::new_v4().to_string(),
            name,
            sanitized_name: &sanitized,
            kind: "folder",
            path: &path,
            parent_path,
            file_size: None,
            mime_type: None,
        })
        .send()
        .await?;
    Backend::check(resp).await?;
    Ok(())
}

/// Upload bytes to storage, then record the row. The row write only happens
/// after the object write succeeded.
pub async fn upload_file(
    backend: &Backend,
    name: &str,
    parent_path: &str,
    mime_type: &str,
    bytes: Vec<u8>,
) -> Result<(), ApiError> {
    let sanitized = sanitize_file_name(name);
    let path = build_storage_path(parent_path, &sanitized);
    let size = bytes.len() as u64;

    let object_url = backend
        .config()
        .storage_url(&format!("object/{BUCKET}/{}", encoded_object_path(&path)));
    let resp = backend
        .post(&object_url)
        .header("Content-Type", mime_type.to_string())
        .body(bytes)
        .send()
        .await?;
    Backend::check(resp).await?;

    let resp = backend
        .post(&backend.config().rest_url("file_items"))
        .json(&NewEntry {
            id: Uuid::new_v4().to_string(),
            name,
            sanitized_name: &sanitized,
            kind: "file",
            path: &path,
            parent_path,
            file_size: Some(size),
            mime_type: Some(mime_type),
        })
        .send()
        .await?;
    Backend::check(resp).await?;
    Ok(())
}

/// Rename the display name only; the stored object keeps its key.
pub async fn rename_entry(backend: &Backend, id: &str, new_name: &str) -> Result<(), ApiError> {
    let resp = backend
        .patch(&backend.config().rest_url("file_items"))
        .query(&[("id", format!("eq.{id}"))])
        .json(&serde_json::json!({ "name": new_name }))
        .send()
        .await?;
    Backend::check(resp).await?;
    Ok(())
}

/// Remove the row, and for files the stored object too. A missing object is
/// not fatal; the row removal is what the tree renders from.
pub async fn delete_entry(backend: &Backend, entry: &FileEntry) -> Result<(), ApiError> {
    if !entry.is_folder() {
        let object_url = backend
            .config()
            .storage_url(&format!("object/{BUCKET}/{}", encoded_object_path(&entry.path)));
        match backend.delete_req(&object_url).send().await {
            Ok(resp) => {
                if let Err(e) = Backend::check(resp).await {
                    log::warn!("storage object {} not removed: {e}", entry.path);
                }
            }
            Err(e) => log::warn!("storage object {} not removed: {e}", entry.path),
        }
    }
    let resp = backend
        .delete_req(&backend.config().rest_url("file_items"))
        .query(&[("id", format!("eq.{}", entry.id))])
        .send()
        .await?;
    Backend::check(resp).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_collapses_spaces_and_underscores() {
        assert_eq!(sanitize_file_name("my  report_final.pdf"), "my-report-final.pdf");
    }

    #[test]
    fn sanitize_strips_specials_and_trims_dashes() {
        assert_eq!(sanitize_file_name("--wéird (name)!--.txt"), "wird-name.txt");
    }

    #[test]
    fn sanitize_falls_back_when_stem_empties() {
        assert_eq!(sanitize_file_name("???.png"), "file.png");
        assert_eq!(sanitize_file_name("£££"), "file");
    }

    #[test]
    fn sanitize_caps_the_stem_at_100_chars() {
        let long = "a".repeat(150) + ".txt";
        let out = sanitize_file_name(&long);
        assert_eq!(out.len(), 104);
        assert!(out.ends_with(".txt"));
    }

    #[test]
    fn storage_paths_join_under_parent() {
        assert_eq!(build_storage_path("", "a.txt"), "a.txt");
        assert_eq!(build_storage_path("reports/2026", "a.txt"), "reports/2026/a.txt");
    }

    #[test]
    fn object_paths_escape_per_segment() {
        assert_eq!(encoded_object_path("a b/c#d.txt"), "a%20b/c%23d.txt");
    }
}
