use std::fs::{self, OpenOptions};
use std::path::Path;

use env_logger::{Builder, Env, Target};

pub const LOG_ENV: &str = "CLACKR_LOG";

/// Route `log` output to `path`. The terminal is owned by the UI, so nothing
/// is ever written to stderr.
pub fn init(path: &Path) -> crate::error::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;

    // A second init (e.g. from tests) keeps the first logger
    let _ = Builder::from_env(Env::default().filter_or(LOG_ENV, "info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_init_creates_log_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state").join("clackr.log");

        init(&path).unwrap();

        assert!(path.exists());
    }
}
