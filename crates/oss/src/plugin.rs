//! The OSS output plugin as seen by the host

use std::path::Path;

use sndout_core::{
    OutputError, OutputPlugin, PluginInfo, PluginPreferences, PreferencesSession, SampleFormat,
    SettingsStore, StereoVolume,
};

use crate::device::DeviceSession;
use crate::ffi::DEFAULT_MIXER;
use crate::mixer::{MixerOpener, SubsystemCapability, SystemMixer};
use crate::output::{OssOutput, OutputConfig};
use crate::prefs::{self, OssSettings, OSS_PREFS};

pub const ABOUT: &str = "OSS4 Output Plugin\n\n\
Plays audio through the Open Sound System, version 4 or later.\n\
Older OSS 3 drivers are supported with the default device only.";

/// OSS output plugin
///
/// Settings live in `S`, usually `JsonSettings::open_default()`. The mixer
/// is reached through `O` so device enumeration can be pointed at something
/// other than the real `/dev/mixer`.
pub struct OssPlugin<S: SettingsStore, O: MixerOpener = SystemMixer> {
    settings: S,
    opener: O,
    capability: SubsystemCapability,
    output: Option<OssOutput>,
    volume: StereoVolume,
}

impl<S: SettingsStore> OssPlugin<S, SystemMixer> {
    pub fn new(settings: S) -> Self {
        Self::with_opener(settings, SystemMixer)
    }
}

impl<S: SettingsStore, O: MixerOpener> OssPlugin<S, O> {
    pub fn with_opener(settings: S, opener: O) -> Self {
        Self {
            settings,
            opener,
            capability: SubsystemCapability::Legacy,
            output: None,
            volume: StereoVolume::default(),
        }
    }

    pub fn capability(&self) -> SubsystemCapability {
        self.capability
    }

    pub fn settings(&self) -> &S {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut S {
        &mut self.settings
    }

    pub fn is_open(&self) -> bool {
        self.output.is_some()
    }

    fn with_output<T>(
        &mut self,
        what: &str,
        op: impl FnOnce(&mut OssOutput) -> Result<T, OutputError>,
    ) -> Option<T> {
        let output = self.output.as_mut()?;
        match op(output) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!("{} failed: {}", what, e);
                None
            }
        }
    }
}

impl<S: SettingsStore, O: MixerOpener> OutputPlugin for OssPlugin<S, O> {
    fn info(&self) -> PluginInfo {
        PluginInfo {
            name: self.capability.plugin_name(),
            priority: self.capability.priority(),
            about: ABOUT,
        }
    }

    fn init(&mut self) -> Result<(), OutputError> {
        prefs::register_defaults(&mut self.settings);

        self.capability = SubsystemCapability::detect(&self.opener, Path::new(DEFAULT_MIXER));
        self.volume = OssSettings::load(&self.settings).volume;

        tracing::debug!("{} initialized", self.capability.plugin_name());
        Ok(())
    }

    fn cleanup(&mut self) {
        self.close_audio();
        if OssSettings::load(&self.settings).save_volume {
            prefs::save_volume(&mut self.settings, self.volume);
        }
    }

    fn open_audio(
        &mut self,
        format: SampleFormat,
        rate: u32,
        channels: u32,
    ) -> Result<(), OutputError> {
        self.close_audio();

        let settings = OssSettings::load(&self.settings);
        let config = OutputConfig {
            device: settings.device_path().to_string(),
            format,
            rate,
            channels,
            cookedmode: settings.cookedmode,
            exclusive: settings.exclusive,
        };

        let output = OssOutput::open(&config).map_err(|e| {
            tracing::error!("Failed to open audio: {}", e);
            e
        })?;

        if settings.save_volume {
            if let Err(e) = output.set_volume(self.volume) {
                tracing::warn!("Could not restore volume: {}", e);
            }
        }

        self.output = Some(output);
        Ok(())
    }

    fn close_audio(&mut self) {
        if self.output.take().is_some() {
            tracing::debug!("Closed audio device");
        }
    }

    fn write_audio(&mut self, data: &[u8]) -> Result<usize, OutputError> {
        self.output.as_mut().ok_or(OutputError::NotOpen)?.write(data)
    }

    fn drain(&mut self) {
        self.with_output("Drain", |out| out.drain());
    }

    fn buffer_free(&mut self) -> usize {
        self.with_output("Buffer query", |out| out.buffer_free())
            .unwrap_or(0)
    }

    fn period_wait(&mut self) {
        self.with_output("Period wait", |out| out.period_wait());
    }

    fn output_time(&mut self) -> u64 {
        self.output.as_ref().map(OssOutput::output_time).unwrap_or(0)
    }

    fn flush(&mut self, time_ms: u64) {
        self.with_output("Flush", |out| out.flush(time_ms));
    }

    fn pause(&mut self, pause: bool) {
        self.with_output("Pause", |out| out.pause(pause));
    }

    fn set_volume(&mut self, volume: StereoVolume) {
        self.volume = volume;
        if let Some(output) = &self.output {
            if let Err(e) = output.set_volume(volume) {
                tracing::warn!("Could not set volume: {}", e);
            }
        }
        if OssSettings::load(&self.settings).save_volume {
            prefs::save_volume(&mut self.settings, volume);
        }
    }

    fn volume(&self) -> StereoVolume {
        match &self.output {
            Some(output) => output.volume().unwrap_or(self.volume),
            None => self.volume,
        }
    }

    fn preferences(&self) -> Option<&'static PluginPreferences> {
        Some(&OSS_PREFS)
    }

    fn open_preferences(&self) -> Option<Box<dyn PreferencesSession>> {
        Some(Box::new(DeviceSession::open(&self.opener, self.capability)))
    }
}
