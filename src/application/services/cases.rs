//! Case catalog
//!
//! Finds `<number>_<label>.txt` files in a case directory and reads their
//! first line as parser input.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use regex::Regex;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::strip_whitespace;
use crate::infrastructure::traits::FileSystem;

/// One input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Case {
    /// Leading number of the file name, unique per directory
    pub number: u32,
    /// File name part after the first underscore, without extension
    pub label: String,
    pub path: PathBuf,
}

impl Case {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Discovers and reads case files.
pub struct CaseCatalog {
    fs: Arc<dyn FileSystem>,
    name_regex: Regex,
}

impl CaseCatalog {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fs,
            name_regex: Regex::new(r"^(\d+)_(.+)\.txt$").expect("case name pattern is valid"),
        }
    }

    /// All cases in `dir`, sorted by number.
    ///
    /// One badly named file or a reused number rejects the whole directory.
    #[instrument(level = "debug", skip(self))]
    pub fn discover(&self, dir: &Path) -> ApplicationResult<Vec<Case>> {
        if !self.fs.is_dir(dir) {
            return Err(ApplicationError::CasesDirNotFound(dir.to_path_buf()));
        }

        let files = self
            .fs
            .list_files(dir)
            .with_path_context("list cases", dir)?;

        let mut seen: HashMap<u32, PathBuf> = HashMap::new();
        let mut cases = Vec::new();
        for path in files {
            if path.extension().and_then(|e| e.to_str()) != Some("txt") {
                debug!("ignoring non-case file {}", path.display());
                continue;
            }
            let case = self.parse_case_name(&path)?;
            if let Some(first) = seen.insert(case.number, path.clone()) {
                return Err(ApplicationError::DuplicateCaseNumber {
                    number: case.number,
                    first,
                    second: path,
                });
            }
            cases.push(case);
        }

        cases.sort_by_key(|c| c.number);
        debug!("discovered {} case(s) in {}", cases.len(), dir.display());
        Ok(cases)
    }

    fn parse_case_name(&self, path: &Path) -> ApplicationResult<Case> {
        let invalid = || ApplicationError::InvalidCaseName(path.to_path_buf());
        let file_name = path.file_name().and_then(|n| n.to_str()).ok_or_else(invalid)?;
        let caps = self.name_regex.captures(file_name).ok_or_else(invalid)?;
        let number = caps[1].parse::<u32>().map_err(|_| invalid())?;
        Ok(Case {
            number,
            label: caps[2].to_string(),
            path: path.to_path_buf(),
        })
    }

    /// Case with the given number.
    pub fn find<'a>(&self, cases: &'a [Case], number: u32) -> ApplicationResult<&'a Case> {
        cases
            .iter()
            .find(|c| c.number == number)
            .ok_or(ApplicationError::CaseNotFound(number))
    }

    /// First line of the case file with whitespace removed.
    #[instrument(level = "debug", skip(self))]
    pub fn read_input(&self, case: &Case) -> ApplicationResult<String> {
        let content = self
            .fs
            .read_to_string(&case.path)
            .with_path_context("read case", &case.path)?;
        let first_line = content.lines().next().unwrap_or_default();
        Ok(strip_whitespace(first_line))
    }
}
