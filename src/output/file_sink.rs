use crate::output::traits::{OutputError, OutputResult, OutputSink};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Appends discovered URLs to `<directory>/<domain>/<domain>.txt`
///
/// The file is opened in append mode, so URLs from earlier runs against the
/// same domain are kept. Each batch is written and flushed as soon as it is
/// recorded.
#[derive(Debug)]
pub struct FileSink {
    domain: String,
    domain_dir: PathBuf,
    path: PathBuf,
    file: Mutex<File>,
}

impl FileSink {
    /// Creates the domain directory (and parents) and opens the URL file
    ///
    /// The file is created empty if it does not exist yet, so it is present
    /// even when the crawl discovers nothing.
    pub fn create(directory: &Path, domain: &str) -> OutputResult<Self> {
        let domain_dir = directory.join(domain);
        std::fs::create_dir_all(&domain_dir).map_err(|source| OutputError::Directory {
            path: domain_dir.clone(),
            source,
        })?;

        let path = domain_dir.join(format!("{}.txt", domain));
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| OutputError::Write {
                path: path.clone(),
                source,
            })?;

        tracing::debug!("Writing discovered URLs to {}", path.display());

        Ok(Self {
            domain: domain.to_string(),
            domain_dir,
            path,
            file: Mutex::new(file),
        })
    }

    /// The domain this sink writes for
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// `<directory>/<domain>/`
    pub fn domain_dir(&self) -> &Path {
        &self.domain_dir
    }

    /// `<directory>/<domain>/<domain>.txt`
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `<directory>/<domain>/<domain>_filtered.txt`
    pub fn filtered_path(&self) -> PathBuf {
        self.domain_dir
            .join(format!("{}_filtered.txt", self.domain))
    }
}

impl OutputSink for FileSink {
    fn record_discovered(&self, urls: &[String]) -> OutputResult<()> {
        if urls.is_empty() {
            return Ok(());
        }

        let mut buffer = String::new();
        for url in urls {
            buffer.push_str(url);
            buffer.push('\n');
        }

        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        file.write_all(buffer.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|source| OutputError::Write {
                path: self.path.clone(),
                source,
            })
    }

    fn finalize(&self) -> OutputResult<()> {
        let file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        file.sync_all().map_err(|source| OutputError::Write {
            path: self.path.clone(),
            source,
        })
    }
}
