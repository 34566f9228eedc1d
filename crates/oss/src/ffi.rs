//! Raw OSS ioctl bindings
//!
//! Struct layouts mirror `oss_sysinfo`, `oss_audioinfo` and
//! `audio_buf_info` from the OSS 4 `soundcard.h`. Request numbers use the
//! platform's native `_IOR`/`_IOWR` encoding, which is what the OSS headers
//! expand to on Linux and FreeBSD.

use nix::libc;

/// Control device used for system-wide queries
pub const DEFAULT_MIXER: &str = "/dev/mixer";
/// Device the subsystem routes to when no specific one is chosen
pub const DEFAULT_DSP: &str = "/dev/dsp";

pub const PCM_CAP_OUTPUT: libc::c_int = 0x0002_0000;
pub const PCM_ENABLE_OUTPUT: libc::c_int = 0x0000_0002;

pub const AFMT_U8: libc::c_int = 0x0000_0008;
pub const AFMT_S16_LE: libc::c_int = 0x0000_0010;
pub const AFMT_S16_BE: libc::c_int = 0x0000_0020;
pub const AFMT_S8: libc::c_int = 0x0000_0040;
pub const AFMT_U16_LE: libc::c_int = 0x0000_0080;
pub const AFMT_U16_BE: libc::c_int = 0x0000_0100;
pub const AFMT_S32_LE: libc::c_int = 0x0000_1000;
pub const AFMT_S32_BE: libc::c_int = 0x0000_2000;
pub const AFMT_FLOAT: libc::c_int = 0x0000_4000;
pub const AFMT_S24_LE: libc::c_int = 0x0000_8000;
pub const AFMT_S24_BE: libc::c_int = 0x0001_0000;

#[repr(C)]
pub struct RawSysInfo {
    pub product: [libc::c_char; 32],
    pub version: [libc::c_char; 32],
    pub versionnum: libc::c_int,
    pub options: [libc::c_char; 128],
    pub numaudios: libc::c_int,
    pub openedaudio: [libc::c_int; 8],
    pub numsynths: libc::c_int,
    pub nummidis: libc::c_int,
    pub numtimers: libc::c_int,
    pub nummixers: libc::c_int,
    pub openedmidi: [libc::c_int; 8],
    pub numcards: libc::c_int,
    pub numaudioengines: libc::c_int,
    pub license: [libc::c_char; 16],
    pub revision_info: [libc::c_char; 256],
    pub filler: [libc::c_int; 172],
}

#[repr(C)]
pub struct RawAudioInfo {
    pub dev: libc::c_int,
    pub name: [libc::c_char; 64],
    pub busy: libc::c_int,
    pub pid: libc::c_int,
    pub caps: libc::c_int,
    pub iformats: libc::c_int,
    pub oformats: libc::c_int,
    pub magic: libc::c_int,
    pub cmd: [libc::c_char; 64],
    pub card_number: libc::c_int,
    pub port_number: libc::c_int,
    pub mixer_dev: libc::c_int,
    pub legacy_device: libc::c_int,
    pub enabled: libc::c_int,
    pub flags: libc::c_int,
    pub min_rate: libc::c_int,
    pub max_rate: libc::c_int,
    pub min_channels: libc::c_int,
    pub max_channels: libc::c_int,
    pub binding: libc::c_int,
    pub rate_source: libc::c_int,
    pub handle: [libc::c_char; 32],
    pub nrates: libc::c_uint,
    pub rates: [libc::c_uint; 20],
    pub song_name: [libc::c_char; 64],
    pub label: [libc::c_char; 16],
    pub latency: libc::c_int,
    pub devnode: [libc::c_char; 32],
    pub next_play_engine: libc::c_int,
    pub next_rec_engine: libc::c_int,
    pub filler: [libc::c_int; 184],
}

#[repr(C)]
#[derive(Debug, Default)]
pub struct BufferInfo {
    pub fragments: libc::c_int,
    pub fragstotal: libc::c_int,
    pub fragsize: libc::c_int,
    pub bytes: libc::c_int,
}

impl RawSysInfo {
    pub fn zeroed() -> Self {
        // SAFETY: plain C struct of integers and integer arrays; all-zero is valid.
        unsafe { std::mem::zeroed() }
    }
}

impl RawAudioInfo {
    pub fn zeroed() -> Self {
        // SAFETY: plain C struct of integers and integer arrays; all-zero is valid.
        unsafe { std::mem::zeroed() }
    }
}

/// Convert a NUL-terminated C char buffer into an owned string
pub fn c_chars_to_string(chars: &[libc::c_char]) -> String {
    let bytes: Vec<u8> = chars
        .iter()
        .take_while(|&&c| c != 0)
        .map(|&c| c as u8)
        .collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

const SNDCTL_INFO_MAGIC: u8 = b'X';
const SNDCTL_SYSINFO: u8 = 1;
const SNDCTL_AUDIOINFO: u8 = 7;
nix::ioctl_read!(oss_sysinfo, SNDCTL_INFO_MAGIC, SNDCTL_SYSINFO, RawSysInfo);
nix::ioctl_readwrite!(oss_audioinfo, SNDCTL_INFO_MAGIC, SNDCTL_AUDIOINFO, RawAudioInfo);

const SNDCTL_DSP_MAGIC: u8 = b'P';
const SNDCTL_DSP_HALT: u8 = 0;
const SNDCTL_DSP_SYNC: u8 = 1;
const SNDCTL_DSP_SPEED: u8 = 2;
const SNDCTL_DSP_SETFMT: u8 = 5;
const SNDCTL_DSP_CHANNELS: u8 = 6;
const SNDCTL_DSP_GETOSPACE: u8 = 12;
const SNDCTL_DSP_SETTRIGGER: u8 = 16;
const SNDCTL_DSP_GETODELAY: u8 = 23;
const SNDCTL_DSP_PLAYVOL: u8 = 24;
const SNDCTL_DSP_COOKEDMODE: u8 = 30;
nix::ioctl_none!(oss_halt, SNDCTL_DSP_MAGIC, SNDCTL_DSP_HALT);
nix::ioctl_none!(oss_sync, SNDCTL_DSP_MAGIC, SNDCTL_DSP_SYNC);
nix::ioctl_readwrite!(oss_set_speed, SNDCTL_DSP_MAGIC, SNDCTL_DSP_SPEED, libc::c_int);
nix::ioctl_readwrite!(oss_set_format, SNDCTL_DSP_MAGIC, SNDCTL_DSP_SETFMT, libc::c_int);
nix::ioctl_readwrite!(oss_set_channels, SNDCTL_DSP_MAGIC, SNDCTL_DSP_CHANNELS, libc::c_int);
nix::ioctl_read!(
    oss_output_buffer_info,
    SNDCTL_DSP_MAGIC,
    SNDCTL_DSP_GETOSPACE,
    BufferInfo
);
nix::ioctl_write_ptr!(oss_set_trigger, SNDCTL_DSP_MAGIC, SNDCTL_DSP_SETTRIGGER, libc::c_int);
nix::ioctl_read!(oss_output_delay, SNDCTL_DSP_MAGIC, SNDCTL_DSP_GETODELAY, libc::c_int);
nix::ioctl_read!(oss_get_play_volume, SNDCTL_DSP_MAGIC, SNDCTL_DSP_PLAYVOL, libc::c_int);
nix::ioctl_readwrite!(oss_set_play_volume, SNDCTL_DSP_MAGIC, SNDCTL_DSP_PLAYVOL, libc::c_int);
nix::ioctl_write_ptr!(oss_set_cooked, SNDCTL_DSP_MAGIC, SNDCTL_DSP_COOKEDMODE, libc::c_int);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_c_chars_stop_at_nul() {
        let mut buf: [libc::c_char; 8] = [0; 8];
        for (dst, src) in buf.iter_mut().zip(b"dsp0") {
            *dst = *src as libc::c_char;
        }
        assert_eq!(c_chars_to_string(&buf), "dsp0");
    }

    #[test]
    fn test_c_chars_without_nul() {
        let buf = [b'a' as libc::c_char; 4];
        assert_eq!(c_chars_to_string(&buf), "aaaa");
    }

    #[test]
    fn test_zeroed_audio_info() {
        let info = RawAudioInfo::zeroed();
        assert_eq!(info.caps, 0);
        assert_eq!(c_chars_to_string(&info.devnode), "");
    }
}
