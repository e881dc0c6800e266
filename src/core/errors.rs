//!    Error handling
//!
//! Errors are reported with anyhow. The board is an application, so a
//! message with enough context beats a typed error hierarchy.

pub use anyhow::ensure;
use anyhow::{Context, Result};

/// Result type alias for convenience throughout the application
pub type BoardResult<T> = Result<T>;

/// Helper functions for creating common error contexts
pub trait BoardContext<T> {
    /// Add file operation context to an error
    fn with_file_context<P: AsRef<std::path::Path>>(
        self,
        operation: &str,
        path: P,
    ) -> BoardResult<T>;
}

impl<T, E> BoardContext<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_file_context<P: AsRef<std::path::Path>>(
        self,
        operation: &str,
        path: P,
    ) -> BoardResult<T> {
        self.with_context(|| {
            format!("Failed to {} file: {}", operation, path.as_ref().display())
        })
    }
}

pub fn validate_config_path<P: AsRef<std::path::Path>>(
    path: P,
) -> BoardResult<()> {
    let path = path.as_ref();

    ensure!(path.exists(), "Config file does not exist: {}", path.display());
    ensure!(
        path.is_file(),
        "Config path must be a file: {}",
        path.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_context_names_operation_and_path() {
        let result: Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "gone",
        ));
        let error = result.with_file_context("read", "board.json").unwrap_err();
        assert_eq!(error.to_string(), "Failed to read file: board.json");
    }

    #[test]
    fn directories_are_not_config_files() {
        let error = validate_config_path(std::env::temp_dir()).unwrap_err();
        assert!(error.to_string().starts_with("Config path must be a file"));
    }
}
