use crate::error::{MajorGroupsError, Result};
use crate::utils::path_validator::PathValidator;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes the grouped result as a JSON array of arrays.
pub struct ResultWriter {
    project_path: PathBuf,
}

impl ResultWriter {
    pub fn new<P: AsRef<Path>>(project_path: P) -> Self {
        Self {
            project_path: project_path.as_ref().to_path_buf(),
        }
    }

    /// Write `groups` to `output`, or `null` when no result was produced.
    ///
    /// The target must resolve inside the project directory.
    pub fn write<P: AsRef<Path>>(
        &self,
        output: P,
        groups: Option<&[Vec<String>]>,
    ) -> Result<PathBuf> {
        let output = PathValidator::validate_output_path(output, &self.project_path)?;

        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                MajorGroupsError::OutputWrite(format!(
                    "Failed to create directory '{}': {e}",
                    parent.display()
                ))
            })?;
        }

        let mut json = serde_json::to_string_pretty(&groups)?;
        json.push('\n');

        fs::write(&output, json).map_err(|e| {
            MajorGroupsError::OutputWrite(format!(
                "Failed to write '{}': {e}",
                output.display()
            ))
        })?;

        Ok(output)
    }
}
