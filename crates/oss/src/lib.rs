//! OSS output plugin
//!
//! Device enumeration for the settings dialog, the dialog's layout, and a
//! blocking playback path over an OSS dsp device.

mod device;
mod ffi;
mod mixer;
mod output;
mod plugin;
mod prefs;
#[cfg(test)]
mod testing;

pub use device::{list_devices, DeviceSession, DEFAULT_DEVICE_LABEL};
pub use ffi::{DEFAULT_DSP, DEFAULT_MIXER};
pub use mixer::{
    check_audio_available, AudioInfo, MixerControl, MixerOpener, OssMixer, SubsystemCapability,
    SysInfo, SystemMixer,
};
pub use output::{oss_format, OssOutput, OutputConfig};
pub use plugin::{OssPlugin, ABOUT};
pub use prefs::{OssSettings, DEFAULTS, OSS_PREFS, SECTION};
pub use sndout_core::{
    DeviceEntry, DeviceList, OutputError, OutputPlugin, PluginInfo, PreferencesSession,
    SampleFormat, SettingsStore, StereoVolume,
};
