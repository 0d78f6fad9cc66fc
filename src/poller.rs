// src/poller.rs
//! The poll loop.
//!
//! One cycle fetches the feed, extracts the version from the newest entry,
//! compares it with the stored one and, when it is newer, notifies and then
//! persists it. Each cycle ends in a [`CycleOutcome`] or a [`CycleError`];
//! neither ever stops the loop.

use std::thread;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::feed::FeedSource;
use crate::notify::{Delivery, Notify};
use crate::store::{StoreError, VersionStore};
use crate::version::{extract_version, Version};

#[derive(Debug, Error)]
pub enum CycleError {
    #[error("Could not retrieve RSS feed: {0:#}")]
    Fetch(anyhow::Error),

    #[error("RSS feed has no entries")]
    EmptyFeed,

    #[error("Could not extract version from RSS entry {0:?}")]
    NoVersion(String),

    #[error("Failed to save version {version}: {source}")]
    Persist {
        version: Version,
        #[source]
        source: StoreError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The newest entry is not newer than what was already announced.
    Unchanged(Version),
    /// A new version was announced and recorded.
    NewVersion { version: Version, delivery: Delivery },
}

pub fn format_message(version: &Version, link: &str) -> String {
    format!("New Asuswrt-Merlin firmware available!\nVersion: {version}\nDownload link: {link}")
}

pub struct Poller<'a, F, N> {
    config: &'a Config,
    feed: F,
    notifier: N,
    store: VersionStore,
}

impl<'a, F: FeedSource, N: Notify> Poller<'a, F, N> {
    pub fn new(config: &'a Config, feed: F, notifier: N, store: VersionStore) -> Self {
        Self {
            config,
            feed,
            notifier,
            store,
        }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn store(&self) -> &VersionStore {
        &self.store
    }

    pub fn run_cycle(&self) -> Result<CycleOutcome, CycleError> {
        let entries = self
            .feed
            .fetch(&self.config.feed_url)
            .map_err(CycleError::Fetch)?;
        let latest = entries.into_iter().next().ok_or(CycleError::EmptyFeed)?;

        let Some(version) = extract_version(&latest.title) else {
            warn!("Could not extract version from title: {}", latest.title);
            return Err(CycleError::NoVersion(latest.title));
        };

        let stored = match self.store.read() {
            Ok(stored) => stored,
            Err(e) => {
                error!("Failed to read last version: {e}");
                None
            }
        };

        if !version.is_newer_than(stored.as_ref()) {
            info!("No new firmware found.");
            return Ok(CycleOutcome::Unchanged(version));
        }

        let delivery = self
            .notifier
            .notify(&format_message(&version, &latest.link));
        self.store
            .write(&version)
            .map_err(|source| CycleError::Persist {
                version: version.clone(),
                source,
            })?;
        info!("Notified about new version: {version}");

        Ok(CycleOutcome::NewVersion { version, delivery })
    }

    /// Run one cycle, logging any failure instead of returning it.
    pub fn tick(&self) -> Option<CycleOutcome> {
        match self.run_cycle() {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                error!("{e}");
                None
            }
        }
    }

    /// Poll forever, sleeping `check_frequency * 5` seconds between cycles.
    pub fn run(&self) -> ! {
        let interval = self.config.poll_interval();
        loop {
            self.tick();
            thread::sleep(interval);
        }
    }
}
