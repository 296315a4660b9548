use crate::error::{SyncError, SyncErrorExt};
use crate::fsio::{self, DirEntryInfo};
use crate::report::BulkReport;
use cfgsync_domain::config::{DumpSettings, StoreSettings};
use cfgsync_store::{ConfigName, EtcdClient, Environment, KvClient, NamespacedStore, Store};
use std::io;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Runs the sync verbs for one environment.
///
/// The engine owns its store client; [`SyncEngine::close`] releases it. Nothing is cached
/// between calls and every store call is awaited before the next one starts.
#[derive(Debug)]
pub struct SyncEngine<C: KvClient> {
    store: NamespacedStore<C>,
    dump: DumpSettings,
}

impl SyncEngine<EtcdClient> {
    /// Validates `environment`, then dials the configured etcd endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidName`] for a malformed environment (before any network I/O)
    /// and [`SyncError::StoreUnavailable`] if the store cannot be reached.
    pub async fn connect(settings: &StoreSettings, environment: &str) -> Result<Self, SyncError> {
        let environment = Environment::try_from(environment)?;

        let mut builder = Store::etcd().dial_timeout(settings.dial_timeout());
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.request_timeout(timeout);
        }
        if let Some(credentials) = &settings.credentials {
            builder = builder.credentials(&credentials.username, &credentials.password);
        }

        let client = builder.endpoints(settings.endpoints.iter().cloned()).connect().await?;

        Ok(Self::from_parts(client, environment))
    }
}

impl<C: KvClient> SyncEngine<C> {
    /// Binds an already connected client to `environment`.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidName`] for a malformed environment.
    pub fn new(client: C, environment: &str) -> Result<Self, SyncError> {
        Ok(Self::from_parts(client, Environment::try_from(environment)?))
    }

    fn from_parts(client: C, environment: Environment) -> Self {
        Self { store: NamespacedStore::new(client, environment), dump: DumpSettings::default() }
    }

    /// Overrides the permissions used by [`SyncEngine::dump`].
    #[must_use]
    pub const fn with_dump_settings(mut self, dump: DumpSettings) -> Self {
        self.dump = dump;
        self
    }

    #[must_use]
    pub const fn environment(&self) -> &Environment {
        self.store.environment()
    }

    /// Fetches one config value.
    ///
    /// # Errors
    ///
    /// [`SyncError::InvalidName`], [`SyncError::NotFound`] or [`SyncError::StoreUnavailable`].
    #[instrument(skip(self), fields(env = %self.environment()))]
    pub async fn get(&self, name: &str) -> Result<Vec<u8>, SyncError> {
        let name = ConfigName::try_from(name)?;
        let value = self.store.get(&name).await?;
        debug!(bytes = value.len(), "Fetched config");
        Ok(value)
    }

    /// Publishes the contents of `file` under `name`.
    ///
    /// The file is read completely before the store is contacted, so a read failure leaves
    /// the store untouched.
    ///
    /// # Errors
    ///
    /// [`SyncError::InvalidName`], [`SyncError::LocalRead`] or [`SyncError::StoreUnavailable`].
    #[instrument(skip(self, file), fields(env = %self.environment(), path = %file.as_ref().display()))]
    pub async fn set(&self, name: &str, file: impl AsRef<Path>) -> Result<(), SyncError> {
        let name = ConfigName::try_from(name)?;
        let path = file.as_ref();

        let value = tokio::fs::read(path).await.context(format!("Reading {}", path.display()))?;
        self.store.set(&name, &value).await?;

        info!(bytes = value.len(), "Config published");
        Ok(())
    }

    /// Removes one config. Removing a missing config succeeds.
    ///
    /// # Errors
    ///
    /// [`SyncError::InvalidName`] or [`SyncError::StoreUnavailable`].
    #[instrument(skip(self), fields(env = %self.environment()))]
    pub async fn del(&self, name: &str) -> Result<(), SyncError> {
        let name = ConfigName::try_from(name)?;
        self.store.delete(&name).await?;
        info!("Config deleted");
        Ok(())
    }

    /// Writes every config of the environment into `dir`, one file per config.
    ///
    /// Existing files with the same name are replaced. A config whose name cannot be a file
    /// name fails on its own; the others are still written.
    ///
    /// # Errors
    ///
    /// [`SyncError::LocalWrite`] if `dir` cannot be created, [`SyncError::StoreUnavailable`]
    /// if the environment cannot be listed. Per-item failures are in the [`BulkReport`].
    #[instrument(skip(self, dir), fields(env = %self.environment(), dir = %dir.as_ref().display()))]
    pub async fn dump(&self, dir: impl AsRef<Path>) -> Result<BulkReport, SyncError> {
        let dir = dir.as_ref();

        fsio::create_dir(dir, self.dump.dir_mode)
            .await
            .map_err(|e| SyncError::write(e, format!("Creating {}", dir.display())))?;

        let configs = self.store.list_all().await?;
        let mut report = BulkReport::default();

        for (raw_name, value) in configs {
            match self.dump_one(dir, &raw_name, &value).await {
                Ok(()) => report.synced(raw_name),
                Err(err) => {
                    warn!(name = %raw_name, error = %err, "Dump failed");
                    report.failed(raw_name, err);
                },
            }
        }

        info!(synced = report.synced_count(), failed = report.failed_count(), "Dump finished");
        Ok(report)
    }

    async fn dump_one(&self, dir: &Path, raw_name: &str, value: &[u8]) -> Result<(), SyncError> {
        let name = ConfigName::try_from(raw_name).map_err(|e| {
            SyncError::write(
                io::Error::new(io::ErrorKind::InvalidInput, e.to_string()),
                format!("Mapping {raw_name:?} to a file name"),
            )
        })?;

        let path = dir.join(name.as_str());
        fsio::write_atomic(&path, value, self.dump.file_mode)
            .await
            .map_err(|e| SyncError::write(e, format!("Writing {}", path.display())))
    }

    /// Stores every regular entry of `dir` under its file name.
    ///
    /// Entries are processed in name order. Subdirectories and leftovers of an interrupted
    /// dump are skipped. Items already stored stay stored when a later one fails.
    ///
    /// # Errors
    ///
    /// [`SyncError::LocalRead`] if `dir` cannot be listed. Per-item failures are in the
    /// [`BulkReport`].
    #[instrument(skip(self, dir), fields(env = %self.environment(), dir = %dir.as_ref().display()))]
    pub async fn restore(&self, dir: impl AsRef<Path>) -> Result<BulkReport, SyncError> {
        let dir = dir.as_ref();

        let entries = fsio::list_dir(dir).await.context(format!("Listing {}", dir.display()))?;
        let mut report = BulkReport::default();

        for entry in entries {
            let label = entry.file_name.to_string_lossy().into_owned();

            if entry.is_dir {
                report.skipped(label, "is a directory");
                continue;
            }
            if entry.file_name.to_str().is_some_and(fsio::is_tmp_name) {
                report.skipped(label, "leftover temporary file");
                continue;
            }

            match self.restore_one(dir, &entry).await {
                Ok(()) => report.synced(label),
                Err(err) => {
                    warn!(name = %label, error = %err, "Restore failed");
                    report.failed(label, err);
                },
            }
        }

        info!(
            synced = report.synced_count(),
            skipped = report.skipped_count(),
            failed = report.failed_count(),
            "Restore finished"
        );
        Ok(report)
    }

    async fn restore_one(&self, dir: &Path, entry: &DirEntryInfo) -> Result<(), SyncError> {
        let path = dir.join(&entry.file_name);

        let name = entry
            .file_name
            .to_str()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "file name is not valid UTF-8"))
            .and_then(|raw| {
                ConfigName::try_from(raw)
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))
            })
            .context(format!("Naming {}", path.display()))?;

        let value = tokio::fs::read(&path).await.context(format!("Reading {}", path.display()))?;
        self.store.set(&name, &value).await?;

        debug!(name = %name, bytes = value.len(), "Config restored");
        Ok(())
    }

    /// Releases the store client.
    pub async fn close(self) {
        self.store.close().await;
    }
}
