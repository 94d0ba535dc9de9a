//! Vendored third-party assets for the editor and viewer pages.
//!
//! The server does not bundle CodeMirror or p5.js; `livecode fetch-assets`
//! downloads the pinned builds from cdnjs into the directory the server
//! serves under `/www/`.

use std::path::{Path, PathBuf};

const CODEMIRROR: &str = "https://cdnjs.cloudflare.com/ajax/libs/codemirror/6.65.7/";
const P5: &str = "https://cdnjs.cloudflare.com/ajax/libs/p5.js/1.7.0/";

/// One file to download: source URL and the file name it is saved as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub url: String,
    pub file_name: &'static str,
}

/// Every asset the pages reference.
pub fn vendored_assets() -> Vec<Asset> {
    vec![
        Asset {
            url: format!("{CODEMIRROR}codemirror.min.css"),
            file_name: "codemirror.min.css",
        },
        Asset {
            url: format!("{CODEMIRROR}codemirror.min.js"),
            file_name: "codemirror.min.js",
        },
        Asset {
            url: format!("{CODEMIRROR}mode/javascript/javascript.min.js"),
            file_name: "javascript.min.js",
        },
        Asset {
            url: format!("{P5}p5.min.js"),
            file_name: "p5.min.js",
        },
    ]
}

/// Errors from downloading assets.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request for {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("writing {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Downloads every asset into `dest`, creating it if needed.
///
/// A file is only written once its whole body has been received, so a
/// failed download never leaves a truncated asset behind.
pub async fn fetch_all(dest: &Path) -> Result<Vec<PathBuf>, FetchError> {
    tokio::fs::create_dir_all(dest)
        .await
        .map_err(|source| FetchError::Write {
            path: dest.to_path_buf(),
            source,
        })?;

    let client = reqwest::Client::new();
    let mut written = Vec::new();
    for asset in vendored_assets() {
        let http_err = |source| FetchError::Http {
            url: asset.url.clone(),
            source,
        };
        let body = client
            .get(&asset.url)
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(http_err)?
            .bytes()
            .await
            .map_err(http_err)?;

        let path = dest.join(asset.file_name);
        tokio::fs::write(&path, &body)
            .await
            .map_err(|source| FetchError::Write {
                path: path.clone(),
                source,
            })?;
        tracing::info!(url = %asset.url, path = %path.display(), bytes = body.len(), "downloaded");
        written.push(path);
    }
    Ok(written)
}
