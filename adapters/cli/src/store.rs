use std::{fs, io, path::PathBuf};

use snake_arcade_system_high_score::{parse_stored_score, HighScoreStore, StoreError};

/// High-score store keeping the record as a decimal number in a text file.
#[derive(Debug)]
pub(crate) struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&self) -> Result<Option<u32>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => parse_stored_score(&raw),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        fs::write(&self.path, format!("{score}\n"))?;
        Ok(())
    }
}
