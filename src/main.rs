use anyhow::{Context, Result};

use firmware_notifier::config::Config;
use firmware_notifier::feed::HttpFeed;
use firmware_notifier::notify::Notifier;
use firmware_notifier::poller::Poller;
use firmware_notifier::store::VersionStore;

fn main() -> Result<()> {
    let config = Config::from_env()?;
    firmware_notifier::log::init(&config.log_level);
    config.log_summary();

    let store = VersionStore::open(&config.last_version_file).with_context(|| {
        format!(
            "Failed to initialize version file {}",
            config.last_version_file.display()
        )
    })?;

    let poller = Poller::new(&config, HttpFeed::new(), Notifier::new(&config), store);
    poller.run()
}
