//! Settings repository.

use crate::model::settings::Settings;
use crate::store::{single_entry, StoreAdapter, StoreError, SETTINGS_KEY};
use log::{error, info, warn};

/// Settings record persisted under [`SETTINGS_KEY`].
pub struct SettingsRepository<S> {
    store: S,
    settings: Settings,
}

impl<S: StoreAdapter> SettingsRepository<S> {
    /// Starts with default settings; call [`SettingsRepository::load`] to
    /// read the stored record.
    pub fn new(store: S) -> Self {
        Self {
            store,
            settings: Settings::default(),
        }
    }

    /// Reads stored settings, falling back to defaults on any failure.
    pub fn load(&mut self) -> Settings {
        self.settings = match self.read_stored() {
            Ok(settings) => settings,
            Err(err) => {
                warn!(
                    "event=settings_load module=repo status=fallback reason=store_error error={}",
                    err
                );
                Settings::default()
            }
        };
        self.settings
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn default_secret(&self) -> bool {
        self.settings.default_secret
    }

    /// Updates the default secrecy flag and persists it.
    pub fn set_default_secret(&mut self, value: bool) {
        self.settings.default_secret = value;
        self.persist();
        info!("event=settings_update module=repo status=ok default_secret={value}");
    }

    fn read_stored(&self) -> Result<Settings, StoreError> {
        let mut entries = self.store.get(&[SETTINGS_KEY])?;
        match entries.remove(SETTINGS_KEY) {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(Settings::default()),
        }
    }

    fn persist(&self) {
        let result = serde_json::to_value(self.settings)
            .map_err(StoreError::from)
            .and_then(|value| self.store.set(single_entry(SETTINGS_KEY, value)));
        if let Err(err) = result {
            error!("event=settings_save module=repo status=error error={err}");
        }
    }
}
