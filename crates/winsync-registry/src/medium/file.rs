//! Directory-backed medium shared by separate OS processes.
//!
//! Each key is stored as `<key>.json` inside the medium directory. Writes go
//! to a uniquely named temp file that is then renamed over the target, so a
//! reader sees either the old record or the new one, never a torn write.
//! Change notification comes from a `notify` watcher on the directory.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, error, info};
use winsync_common::{new_handle_id, new_id, MediumError};

use super::{Result, SharedMedium, StorageChange, Subscription};

/// A handle onto a medium directory.
#[derive(Debug, Clone)]
pub struct FileMedium {
    dir: PathBuf,
    handle: String,
    /// Per key, the value this handle wrote that the watcher has not yet
    /// observed. Consumed by the next observed change, whatever its content.
    pending_echo: Arc<Mutex<HashMap<String, String>>>,
}

impl FileMedium {
    /// Open (and create if needed) the medium directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| {
            MediumError::WriteError(format!(
                "failed to create medium directory {}: {e}",
                dir.display()
            ))
        })?;

        let handle = new_handle_id();
        info!(dir = %dir.display(), handle = %handle, "opened file medium");
        Ok(Self {
            dir,
            handle,
            pending_echo: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    pub fn directory(&self) -> &Path {
        &self.dir
    }

    /// Delete a key's file. Other handles see a change with no new value.
    pub fn remove(&self, key: &str) -> Result<()> {
        match std::fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(MediumError::WriteError(format!(
                "failed to remove {key}: {e}"
            ))),
        }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key_file_name(key))
    }

    fn remember_write(&self, key: &str, value: &str) -> Result<()> {
        self.pending_echo
            .lock()
            .map_err(|_| MediumError::Poisoned)?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl SharedMedium for FileMedium {
    fn get(&self, key: &str) -> Result<Option<String>> {
        read_value(&self.key_path(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let target = self.key_path(key);
        let tmp = self.dir.join(format!(".{key}.{}.tmp", new_id()));

        std::fs::write(&tmp, value).map_err(|e| {
            MediumError::WriteError(format!("failed to write {}: {e}", tmp.display()))
        })?;

        // Recorded before the rename so the watcher can recognise the echo.
        self.remember_write(key, value)?;

        if let Err(e) = std::fs::rename(&tmp, &target) {
            let _ = std::fs::remove_file(&tmp);
            return Err(MediumError::WriteError(format!(
                "failed to replace {}: {e}",
                target.display()
            )));
        }

        debug!(key, handle = %self.handle, bytes = value.len(), "file medium write");
        Ok(())
    }

    fn subscribe(&self, key: &str) -> Result<Subscription> {
        let (tx, rx) = mpsc::unbounded_channel();
        let target = self.key_path(key);
        let file_name = key_file_name(key);
        let key = key.to_string();
        let pending_echo = Arc::clone(&self.pending_echo);
        let mut last_seen = read_value(&target).unwrap_or(None);

        let mut watcher = RecommendedWatcher::new(
            move |result: std::result::Result<Event, notify::Error>| {
                let event = match result {
                    Ok(event) => event,
                    Err(e) => {
                        error!("medium watcher error: {e}");
                        return;
                    }
                };

                let relevant = matches!(
                    event.kind,
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
                );
                let is_our_key = event
                    .paths
                    .iter()
                    .any(|p| p.file_name().map(|n| n == file_name.as_str()).unwrap_or(false));
                if !relevant || !is_our_key {
                    return;
                }

                let current = match read_value(&target) {
                    Ok(value) => value,
                    Err(e) => {
                        debug!("skipping unreadable medium value: {e}");
                        return;
                    }
                };
                if current == last_seen {
                    return;
                }

                // Only the first change observed after our write can be its
                // echo. Anything later is another writer, even with equal content.
                let own_echo = match take_pending_echo(&pending_echo, &key) {
                    Some(written) => current.as_deref() == Some(written.as_str()),
                    None => false,
                };
                let old_value = std::mem::replace(&mut last_seen, current.clone());
                if own_echo {
                    return;
                }

                let _ = tx.send(StorageChange {
                    key: key.clone(),
                    old_value,
                    new_value: current,
                });
            },
            notify::Config::default(),
        )
        .map_err(|e| MediumError::WatchError(format!("failed to create watcher: {e}")))?;

        watcher
            .watch(&self.dir, RecursiveMode::NonRecursive)
            .map_err(|e| {
                MediumError::WatchError(format!("failed to watch {}: {e}", self.dir.display()))
            })?;

        Ok(Subscription::with_guard(rx, watcher))
    }
}

fn take_pending_echo(pending: &Mutex<HashMap<String, String>>, key: &str) -> Option<String> {
    pending.lock().ok()?.remove(key)
}

fn key_file_name(key: &str) -> String {
    format!("{key}.json")
}

fn read_value(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(MediumError::ReadError(format!(
            "failed to read {}: {e}",
            path.display()
        ))),
    }
}
