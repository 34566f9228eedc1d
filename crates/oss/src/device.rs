use std::path::Path;

use sndout_core::{DeviceEntry, DeviceList, OutputError, PreferencesSession};

use crate::ffi::{DEFAULT_DSP, DEFAULT_MIXER};
use crate::mixer::{check_audio_available, MixerControl, MixerOpener, SubsystemCapability};

pub const DEFAULT_DEVICE_LABEL: &str = "Default device";

/// List the output devices the subsystem knows about
///
/// The first entry is always the default device, so the result is never
/// empty. Failures are logged: a failed open or system query leaves only
/// the default entry, and a failed per-device query ends the scan with the
/// devices found so far.
pub fn list_devices<O: MixerOpener>(opener: &O, capability: SubsystemCapability) -> DeviceList {
    let mut devices = DeviceList::new();
    devices.push(DeviceEntry::new(DEFAULT_DEVICE_LABEL, DEFAULT_DSP));

    if let Err(e) = scan_devices(opener, capability, &mut devices) {
        tracing::error!("OSS device scan stopped: {}", e);
    }

    devices
}

fn scan_devices<O: MixerOpener>(
    opener: &O,
    capability: SubsystemCapability,
    devices: &mut DeviceList,
) -> Result<(), OutputError> {
    // Dropped on every return below, which closes the mixer
    let mut mixer = opener.open(Path::new(DEFAULT_MIXER))?;

    if capability == SubsystemCapability::Legacy {
        return Ok(());
    }

    let sysinfo = mixer.sysinfo()?;
    if let Err(e) = check_audio_available(&sysinfo) {
        tracing::warn!("{}", e);
    }

    for dev in 0..sysinfo.num_audios {
        let info = mixer.audio_info(dev)?;

        if !info.is_output() {
            tracing::debug!("Skipping {} ({}): no output capability", info.name, info.devnode);
            continue;
        }

        if !devices.push(DeviceEntry::new(info.name.as_str(), info.devnode.as_str())) {
            tracing::debug!("Skipping {}: {} is already listed", info.name, info.devnode);
        }
    }

    Ok(())
}

/// Device list owned by an open settings dialog
///
/// Created when the dialog opens, read while it is shown and cleared when
/// it closes.
#[derive(Debug, Default)]
pub struct DeviceSession {
    devices: DeviceList,
}

impl DeviceSession {
    pub fn open<O: MixerOpener>(opener: &O, capability: SubsystemCapability) -> Self {
        Self {
            devices: list_devices(opener, capability),
        }
    }

    pub fn fill(&self) -> &[DeviceEntry] {
        self.devices.as_slice()
    }

    pub fn cleanup(&mut self) {
        self.devices.clear();
    }
}

impl PreferencesSession for DeviceSession {
    fn combo_items(&self) -> &[DeviceEntry] {
        self.fill()
    }

    fn cleanup(&mut self) {
        DeviceSession::cleanup(self);
    }
}
