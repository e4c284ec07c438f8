use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info};

use crate::error::LoadError;

/// Published CSV export of the class schedule sheet.
pub const DEFAULT_SHEET_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vSLidSfiZggDJFDotoybDCnVvjoKrv6lzY8EXxzunideDy7XqEqFK8gyCprpKt0ii2JxbE5d5JvpQdq/pub?gid=640221730&single=true&output=csv";

pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Where the raw schedule text comes from.
pub trait TextSource {
    fn fetch_text(&self) -> Result<String, LoadError>;

    /// Human readable origin, for logs
    fn describe(&self) -> String;
}

/// Fetches the export over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl TextSource for HttpSource {
    fn fetch_text(&self) -> Result<String, LoadError> {
        let transport = |source| LoadError::Transport {
            url: self.url.clone(),
            source,
        };

        info!(url = %self.url, timeout_secs = self.timeout.as_secs(), "fetching schedule");
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(transport)?;

        let response = client.get(&self.url).send().map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let text = response.text().map_err(transport)?;
        debug!(bytes = text.len(), "schedule downloaded");
        Ok(text)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Reads an export saved on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl TextSource for FileSource {
    fn fetch_text(&self) -> Result<String, LoadError> {
        info!(path = %self.path.display(), "reading schedule file");
        Ok(fs::read_to_string(&self.path)?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Serves fixed text, for tests and demos.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    text: String,
}

impl StaticSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl TextSource for StaticSource {
    fn fetch_text(&self) -> Result<String, LoadError> {
        Ok(self.text.clone())
    }

    fn describe(&self) -> String {
        "in-memory text".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn file_source_reads_text() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "header").unwrap();
        writeln!(file, "C1,Ann,S1,2024-05-01,10:00").unwrap();

        let source = FileSource::new(file.path());
        let text = source.fetch_text().unwrap();
        assert!(text.starts_with("header\nC1,Ann"));
        assert_eq!(source.describe(), file.path().display().to_string());
    }

    #[test]
    fn missing_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("nope.csv"));
        assert_matches!(source.fetch_text(), Err(LoadError::Unreadable(_)));
    }

    #[test]
    fn non_utf8_file_is_unreadable() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe, 0x00, 0x81]).unwrap();
        assert_matches!(
            FileSource::new(file.path()).fetch_text(),
            Err(LoadError::Unreadable(_))
        );
    }

    #[test]
    fn unreachable_host_is_a_transport_error() {
        // port 9 on localhost is closed in any sane test environment
        let source = HttpSource::new("http://127.0.0.1:9/sheet.csv", Duration::from_secs(2));
        assert_eq!(source.url(), "http://127.0.0.1:9/sheet.csv");
        assert_matches!(source.fetch_text(), Err(LoadError::Transport { .. }));
    }
}
