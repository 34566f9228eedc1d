mod device;
mod error;
mod format;
mod logging;
pub mod prefs;
pub mod settings;
mod traits;

pub use device::{DeviceEntry, DeviceList};
pub use error::{OutputError, SettingsError};
pub use format::{SampleFormat, StereoVolume};
pub use logging::init_tracing;
pub use prefs::{PluginPreferences, PreferencesWidget, WidgetSetting};
pub use settings::{JsonSettings, SettingsStore};
pub use traits::{OutputPlugin, PluginInfo, PreferencesSession};
