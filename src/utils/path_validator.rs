use crate::error::{MajorGroupsError, Result};
use std::path::{Component, Path, PathBuf};

/// Keeps the tool inside the project it was pointed at.
pub struct PathValidator;

impl PathValidator {
    /// Validates and canonicalises an incoming project path.
    pub fn validate_project_path(path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref();

        let canonical = path.canonicalize().map_err(|e| {
            MajorGroupsError::ProjectValidation(format!("Invalid path '{}': {e}", path.display()))
        })?;

        if !canonical.is_dir() {
            return Err(MajorGroupsError::ProjectValidation(format!(
                "Path '{}' is not a directory",
                canonical.display()
            )));
        }

        const FORBIDDEN: &[&str] = &["/etc", "/sys", "/proc", "/dev", "/boot"];

        for forbidden in FORBIDDEN {
            let forbidden_path = Path::new(forbidden);
            let canonical_forbidden = forbidden_path
                .canonicalize()
                .unwrap_or_else(|_| forbidden_path.to_path_buf());

            if path.starts_with(forbidden_path)
                || canonical.starts_with(forbidden_path)
                || canonical.starts_with(&canonical_forbidden)
            {
                return Err(MajorGroupsError::ProjectValidation(format!(
                    "Access to system directory '{}' is not allowed",
                    forbidden
                )));
            }
        }

        Ok(canonical)
    }

    /// Resolves a path the tool may read from, relative to the project.
    pub fn resolve_in_project(file: impl AsRef<Path>, base_dir: impl AsRef<Path>) -> PathBuf {
        let file = file.as_ref();
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            base_dir.as_ref().join(file)
        }
    }

    /// Resolves a file the tool is about to create and ensures it lands inside
    /// `base_dir`. The file and some of its parents may not exist yet.
    pub fn validate_output_path(
        file_path: impl AsRef<Path>,
        base_dir: impl AsRef<Path>,
    ) -> Result<PathBuf> {
        let base_dir = base_dir.as_ref();
        let canonical_base = base_dir.canonicalize().map_err(|e| {
            MajorGroupsError::ProjectValidation(format!(
                "Invalid base directory '{}': {e}",
                base_dir.display()
            ))
        })?;

        let candidate = Self::resolve_in_project(file_path, &canonical_base);
        if candidate
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(MajorGroupsError::ProjectValidation(format!(
                "Output path '{}' must not contain '..'",
                candidate.display()
            )));
        }

        let mut existing = candidate.as_path();
        while !existing.exists() {
            existing = existing.parent().ok_or_else(|| {
                MajorGroupsError::ProjectValidation(format!(
                    "Output path '{}' has no existing ancestor",
                    candidate.display()
                ))
            })?;
        }

        let canonical_existing = existing.canonicalize().map_err(|e| {
            MajorGroupsError::ProjectValidation(format!(
                "Invalid output path '{}': {e}",
                existing.display()
            ))
        })?;

        if !canonical_existing.starts_with(&canonical_base) {
            return Err(MajorGroupsError::ProjectValidation(
                "Output path is outside the project directory".to_string(),
            ));
        }

        let remainder = candidate.strip_prefix(existing).unwrap_or(Path::new(""));
        Ok(canonical_existing.join(remainder))
    }
}
