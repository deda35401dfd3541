// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// File output for rendered project pages.
///
/// Writes one `<name>.md` file per analyzed repository into the output
/// directory.
use std::path::{Path, PathBuf};

use crate::{
    error::{Error, io_error},
    model::AnalysisRecord,
    render
};

/// Output directory receiving project pages.
#[derive(Debug, Clone)]
pub struct ProjectSink {
    directory: PathBuf
}

impl ProjectSink {
    /// Prepares the output directory, creating missing parents.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when the directory cannot be created.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use repopage::ProjectSink;
    ///
    /// # fn example() -> Result<(), repopage::Error> {
    /// let sink = ProjectSink::create("docs/_projects")?;
    /// println!("Writing to {}", sink.directory().display());
    /// # Ok(())
    /// # }
    /// ```
    pub fn create(directory: impl AsRef<Path>) -> Result<Self, Error> {
        let directory = directory.as_ref();
        std::fs::create_dir_all(directory).map_err(|e| io_error(directory, e))?;

        Ok(Self {
            directory: directory.to_path_buf()
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of the page written for `record`.
    pub fn path_for(&self, record: &AnalysisRecord) -> PathBuf {
        self.directory.join(format!("{}.md", record.name))
    }

    /// Renders and writes the page for one record, replacing any previous
    /// version.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialize`] when rendering fails and [`Error::Io`]
    /// when the file cannot be written.
    pub fn save(&self, record: &AnalysisRecord) -> Result<PathBuf, Error> {
        let page = render::document(record)?;
        let path = self.path_for(record);
        std::fs::write(&path, page).map_err(|e| io_error(&path, e))?;

        Ok(path)
    }
}
