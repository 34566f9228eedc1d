//! Mixer control device access
//!
//! The enumerator talks to the subsystem through [`MixerOpener`] and
//! [`MixerControl`] so it can run against a real `/dev/mixer` or a
//! scripted stand-in. Handles close when dropped, which covers every exit
//! path out of a scan.

use std::fs::{File, OpenOptions};
use std::os::fd::AsRawFd;
use std::path::Path;

use sndout_core::OutputError;

use crate::ffi;

/// Subsystem-wide information from `SNDCTL_SYSINFO`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SysInfo {
    pub product: String,
    pub version: String,
    pub num_audios: i32,
}

/// One audio device as reported by `SNDCTL_AUDIOINFO`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioInfo {
    pub dev: i32,
    pub name: String,
    pub devnode: String,
    pub caps: i32,
}

impl AudioInfo {
    pub fn is_output(&self) -> bool {
        self.caps & ffi::PCM_CAP_OUTPUT != 0
    }
}

/// Queries against an open mixer control device
pub trait MixerControl {
    fn sysinfo(&mut self) -> Result<SysInfo, OutputError>;

    fn audio_info(&mut self, dev: i32) -> Result<AudioInfo, OutputError>;
}

/// Opens mixer control devices
pub trait MixerOpener {
    type Mixer: MixerControl;

    fn open(&self, path: &Path) -> Result<Self::Mixer, OutputError>;
}

/// Mixer control device backed by an OSS device file
#[derive(Debug)]
pub struct OssMixer {
    file: File,
}

impl OssMixer {
    pub fn open(path: &Path) -> Result<Self, OutputError> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|source| OutputError::DeviceOpenFailed {
                path: path.display().to_string(),
                source,
            })?;
        Ok(Self { file })
    }
}

impl MixerControl for OssMixer {
    fn sysinfo(&mut self) -> Result<SysInfo, OutputError> {
        let mut raw = ffi::RawSysInfo::zeroed();
        // SAFETY: the fd is owned by `self.file` and `raw` is the `repr(C)`
        // oss_sysinfo the driver fills in.
        unsafe { ffi::oss_sysinfo(self.file.as_raw_fd(), &mut raw) }
            .map_err(|errno| query_failed("SNDCTL_SYSINFO", errno))?;

        Ok(SysInfo {
            product: ffi::c_chars_to_string(&raw.product),
            version: ffi::c_chars_to_string(&raw.version),
            num_audios: raw.numaudios,
        })
    }

    fn audio_info(&mut self, dev: i32) -> Result<AudioInfo, OutputError> {
        let mut raw = ffi::RawAudioInfo::zeroed();
        raw.dev = dev;
        // SAFETY: the fd is owned by `self.file` and `raw` is the `repr(C)`
        // oss_audioinfo the driver reads `dev` from and fills in.
        unsafe { ffi::oss_audioinfo(self.file.as_raw_fd(), &mut raw) }
            .map_err(|errno| query_failed("SNDCTL_AUDIOINFO", errno))?;

        Ok(AudioInfo {
            dev,
            name: ffi::c_chars_to_string(&raw.name),
            devnode: ffi::c_chars_to_string(&raw.devnode),
            caps: raw.caps,
        })
    }
}

/// Opens real OSS mixer devices
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemMixer;

impl MixerOpener for SystemMixer {
    type Mixer = OssMixer;

    fn open(&self, path: &Path) -> Result<OssMixer, OutputError> {
        OssMixer::open(path)
    }
}

pub(crate) fn query_failed(request: &'static str, errno: nix::errno::Errno) -> OutputError {
    OutputError::QueryFailed {
        request,
        source: std::io::Error::from(errno),
    }
}

/// Whether the subsystem answers system-info queries
///
/// OSS 4 does; older OSS 3 drivers only expose the default device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubsystemCapability {
    SysInfo,
    Legacy,
}

impl SubsystemCapability {
    /// Query the mixer once. A mixer that cannot be opened or queried is
    /// treated as legacy.
    pub fn detect<O: MixerOpener>(opener: &O, mixer_path: &Path) -> Self {
        let mut mixer = match opener.open(mixer_path) {
            Ok(mixer) => mixer,
            Err(e) => {
                tracing::debug!("Capability detection could not open mixer: {}", e);
                return Self::Legacy;
            }
        };

        match mixer.sysinfo() {
            Ok(info) => {
                tracing::info!("Found {} {}", info.product, info.version);
                Self::SysInfo
            }
            Err(e) => {
                tracing::debug!("System info unavailable, using legacy mode: {}", e);
                Self::Legacy
            }
        }
    }

    pub fn plugin_name(&self) -> &'static str {
        match self {
            Self::SysInfo => "OSS4 Output",
            Self::Legacy => "OSS3 Output",
        }
    }

    /// OSS4 ranks above ALSA (5); OSS3 below it
    pub fn priority(&self) -> i32 {
        match self {
            Self::SysInfo => 6,
            Self::Legacy => 4,
        }
    }
}

/// Check that the subsystem reports at least one audio device
pub fn check_audio_available(sysinfo: &SysInfo) -> Result<(), OutputError> {
    if sysinfo.num_audios < 1 {
        return Err(OutputError::NoAudioDevices("no OSS audio devices found".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeDevice, FakeOpener};

    #[test]
    fn test_output_capability_flag() {
        let output = AudioInfo {
            dev: 0,
            name: "out".to_string(),
            devnode: "/dev/dsp0".to_string(),
            caps: ffi::PCM_CAP_OUTPUT | 0x1,
        };
        let input = AudioInfo { caps: 0x1, ..output.clone() };

        assert!(output.is_output());
        assert!(!input.is_output());
    }

    #[test]
    fn test_availability_requires_a_device() {
        let mut info = SysInfo {
            product: "OSS".to_string(),
            version: "4.2".to_string(),
            num_audios: 0,
        };
        assert!(matches!(check_audio_available(&info), Err(OutputError::NoAudioDevices(_))));

        info.num_audios = 2;
        assert!(check_audio_available(&info).is_ok());
    }

    #[test]
    fn test_detect_sysinfo() {
        let opener = FakeOpener::with_devices(vec![FakeDevice::output("a", "/dev/dsp0")]);
        let capability = SubsystemCapability::detect(&opener, Path::new(ffi::DEFAULT_MIXER));

        assert_eq!(capability, SubsystemCapability::SysInfo);
        assert_eq!(capability.plugin_name(), "OSS4 Output");
        assert_eq!(capability.priority(), 6);
        assert_eq!(opener.closed(), 1);
    }

    #[test]
    fn test_detect_legacy_when_sysinfo_fails() {
        let opener = FakeOpener::default().failing_sysinfo();
        let capability = SubsystemCapability::detect(&opener, Path::new(ffi::DEFAULT_MIXER));

        assert_eq!(capability, SubsystemCapability::Legacy);
        assert_eq!(capability.plugin_name(), "OSS3 Output");
        assert_eq!(capability.priority(), 4);
        assert_eq!(opener.closed(), 1);
    }

    #[test]
    fn test_detect_legacy_when_open_fails() {
        let opener = FakeOpener::default().failing_open();
        let capability = SubsystemCapability::detect(&opener, Path::new(ffi::DEFAULT_MIXER));

        assert_eq!(capability, SubsystemCapability::Legacy);
        assert_eq!(opener.closed(), 0);
    }

    #[test]
    fn test_missing_mixer_reports_open_failure() {
        let err = OssMixer::open(Path::new("/nonexistent/sndout-mixer")).unwrap_err();
        assert!(matches!(err, OutputError::DeviceOpenFailed { .. }));
        assert!(err.to_string().contains("/nonexistent/sndout-mixer"));
    }
}
