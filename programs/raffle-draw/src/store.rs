use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anchor_lang::prelude::*;

use crate::{constants::SNAPSHOT_FILE_NAME, error::RaffleError, state::RaffleSnapshot};

/// Durable home of the raffle state, read once at startup and written after
/// every committed change.
pub trait SnapshotStore {
    fn load(&mut self) -> Result<Option<RaffleSnapshot>>;
    fn save(&mut self, snapshot: &RaffleSnapshot) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
}

/// Keeps the encoded snapshot in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    data: Option<Vec<u8>>,
}

impl MemoryStore {
    pub fn bytes(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&mut self) -> Result<Option<RaffleSnapshot>> {
        self.data
            .as_deref()
            .map(RaffleSnapshot::decode)
            .transpose()
    }

    fn save(&mut self, snapshot: &RaffleSnapshot) -> Result<()> {
        self.data = Some(snapshot.encode()?);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.data = None;
        Ok(())
    }
}

/// Stores the snapshot in a single file, replaced atomically on save.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(SNAPSHOT_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn failure(&self, action: &str, err: io::Error) -> anchor_lang::error::Error {
        msg!(
            "Failed to {} raffle snapshot at {}: {}",
            action,
            self.path.display(),
            err
        );
        error!(RaffleError::PersistenceFailure)
    }
}

impl SnapshotStore for FileStore {
    fn load(&mut self) -> Result<Option<RaffleSnapshot>> {
        match fs::read(&self.path) {
            Ok(data) => RaffleSnapshot::decode(&data).map(Some),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(self.failure("read", err)),
        }
    }

    fn save(&mut self, snapshot: &RaffleSnapshot) -> Result<()> {
        let data = snapshot.encode()?;
        let staging = self.path.with_extension("tmp");

        fs::write(&staging, data).map_err(|err| self.failure("write", err))?;
        if let Err(err) = fs::rename(&staging, &self.path) {
            let _ = fs::remove_file(&staging);
            return Err(self.failure("replace", err));
        }

        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(self.failure("remove", err)),
        }
    }
}
