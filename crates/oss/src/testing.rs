//! Scripted mixer for unit tests

use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;

use sndout_core::OutputError;

use crate::ffi::PCM_CAP_OUTPUT;
use crate::mixer::{AudioInfo, MixerControl, MixerOpener, SysInfo};

#[derive(Debug, Clone)]
pub struct FakeDevice {
    pub name: String,
    pub devnode: String,
    pub caps: i32,
}

impl FakeDevice {
    pub fn output(name: &str, devnode: &str) -> Self {
        Self {
            name: name.to_string(),
            devnode: devnode.to_string(),
            caps: PCM_CAP_OUTPUT,
        }
    }

    pub fn input_only(name: &str, devnode: &str) -> Self {
        Self {
            name: name.to_string(),
            devnode: devnode.to_string(),
            caps: 0x0001_0000,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Script {
    devices: Vec<FakeDevice>,
    /// Overrides the reported device count when set
    num_audios: Option<i32>,
    fail_open: bool,
    fail_sysinfo: bool,
    fail_at: Option<i32>,
}

#[derive(Debug, Default)]
pub struct FakeOpener {
    script: Rc<Script>,
    opened: Rc<Cell<usize>>,
    closed: Rc<Cell<usize>>,
}

impl FakeOpener {
    pub fn with_devices(devices: Vec<FakeDevice>) -> Self {
        Self {
            script: Rc::new(Script {
                devices,
                ..Script::default()
            }),
            ..Self::default()
        }
    }

    fn edit(mut self, f: impl FnOnce(&mut Script)) -> Self {
        f(Rc::make_mut(&mut self.script));
        self
    }

    pub fn failing_open(self) -> Self {
        self.edit(|s| s.fail_open = true)
    }

    pub fn failing_sysinfo(self) -> Self {
        self.edit(|s| s.fail_sysinfo = true)
    }

    /// Make the per-device query fail for device index `dev`
    pub fn failing_at(self, dev: i32) -> Self {
        self.edit(|s| s.fail_at = Some(dev))
    }

    pub fn reporting(self, num_audios: i32) -> Self {
        self.edit(|s| s.num_audios = Some(num_audios))
    }

    pub fn opened(&self) -> usize {
        self.opened.get()
    }

    pub fn closed(&self) -> usize {
        self.closed.get()
    }
}

pub struct FakeMixer {
    script: Rc<Script>,
    closed: Rc<Cell<usize>>,
}

impl Drop for FakeMixer {
    fn drop(&mut self) {
        self.closed.set(self.closed.get() + 1);
    }
}

fn io_failure() -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, "scripted failure")
}

impl MixerControl for FakeMixer {
    fn sysinfo(&mut self) -> Result<SysInfo, OutputError> {
        if self.script.fail_sysinfo {
            return Err(OutputError::QueryFailed {
                request: "SNDCTL_SYSINFO",
                source: io_failure(),
            });
        }
        Ok(SysInfo {
            product: "OSS".to_string(),
            version: "4.2".to_string(),
            num_audios: self
                .script
                .num_audios
                .unwrap_or(self.script.devices.len() as i32),
        })
    }

    fn audio_info(&mut self, dev: i32) -> Result<AudioInfo, OutputError> {
        let device = usize::try_from(dev)
            .ok()
            .and_then(|i| self.script.devices.get(i));
        match device {
            Some(device) if self.script.fail_at != Some(dev) => Ok(AudioInfo {
                dev,
                name: device.name.clone(),
                devnode: device.devnode.clone(),
                caps: device.caps,
            }),
            _ => Err(OutputError::QueryFailed {
                request: "SNDCTL_AUDIOINFO",
                source: io_failure(),
            }),
        }
    }
}

impl MixerOpener for FakeOpener {
    type Mixer = FakeMixer;

    fn open(&self, path: &Path) -> Result<FakeMixer, OutputError> {
        if self.script.fail_open {
            return Err(OutputError::DeviceOpenFailed {
                path: path.display().to_string(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            });
        }
        self.opened.set(self.opened.get() + 1);
        Ok(FakeMixer {
            script: Rc::clone(&self.script),
            closed: Rc::clone(&self.closed),
        })
    }
}
