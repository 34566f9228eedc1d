use crate::device::DeviceEntry;
use crate::error::OutputError;
use crate::format::{SampleFormat, StereoVolume};
use crate::prefs::PluginPreferences;

/// Static description of a plugin, shown by the host in its plugin list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginInfo {
    pub name: &'static str,
    /// Higher priority outputs are preferred when the host picks a default
    pub priority: i32,
    pub about: &'static str,
}

/// Trait for output plugins driven by the host
///
/// Replaces the host's table of function pointers: the host holds one
/// implementor and calls through it for the lifetime of the plugin.
pub trait OutputPlugin {
    /// Get the plugin's metadata
    fn info(&self) -> PluginInfo;

    /// Called once after the plugin is loaded
    fn init(&mut self) -> Result<(), OutputError>;

    /// Called once before the plugin is unloaded
    fn cleanup(&mut self);

    /// Open the configured device for playback
    fn open_audio(
        &mut self,
        format: SampleFormat,
        rate: u32,
        channels: u32,
    ) -> Result<(), OutputError>;

    fn close_audio(&mut self);

    /// Write interleaved samples, returning the number of bytes accepted
    fn write_audio(&mut self, data: &[u8]) -> Result<usize, OutputError>;

    /// Block until everything written has been played
    fn drain(&mut self);

    /// Bytes that can be written without blocking
    fn buffer_free(&mut self) -> usize;

    /// Block until at least one period of buffer space is free
    fn period_wait(&mut self);

    /// Playback position in milliseconds
    fn output_time(&mut self) -> u64;

    /// Discard buffered audio and restart the clock at `time_ms`
    fn flush(&mut self, time_ms: u64);

    fn pause(&mut self, pause: bool);

    fn set_volume(&mut self, volume: StereoVolume);

    fn volume(&self) -> StereoVolume;

    /// Settings dialog layout, if the plugin has one
    fn preferences(&self) -> Option<&'static PluginPreferences>;

    /// Init hook: called when the settings dialog opens
    fn open_preferences(&self) -> Option<Box<dyn PreferencesSession>>;
}

/// State owned by an open settings dialog
pub trait PreferencesSession {
    /// Options for the dialog's dropdown
    fn combo_items(&self) -> &[DeviceEntry];

    /// Apply hook. Most plugins persist as the user edits, so this does nothing.
    fn apply(&mut self) {}

    /// Cleanup hook: called when the dialog closes. Must be safe to repeat.
    fn cleanup(&mut self);
}
