//! Blocking playback through an OSS dsp device

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::os::fd::{AsFd, AsRawFd};
use std::os::unix::fs::OpenOptionsExt;

use nix::libc;
use nix::poll::{poll, PollFd, PollFlags, PollTimeout};
use sndout_core::{OutputError, SampleFormat, StereoVolume};

use crate::ffi;
use crate::mixer::query_failed;
use crate::prefs::{pack_volume, unpack_volume};

/// How the device should be opened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub device: String,
    pub format: SampleFormat,
    pub rate: u32,
    pub channels: u32,
    /// Let OSS convert formats and rates it cannot play natively
    pub cookedmode: bool,
    /// Bypass virtual mixing
    pub exclusive: bool,
}

/// Map a host format to its `AFMT_*` value
pub fn oss_format(format: SampleFormat) -> libc::c_int {
    match format {
        SampleFormat::U8 => ffi::AFMT_U8,
        SampleFormat::S8 => ffi::AFMT_S8,
        SampleFormat::S16Le => ffi::AFMT_S16_LE,
        SampleFormat::S16Be => ffi::AFMT_S16_BE,
        SampleFormat::U16Le => ffi::AFMT_U16_LE,
        SampleFormat::U16Be => ffi::AFMT_U16_BE,
        SampleFormat::S24Le => ffi::AFMT_S24_LE,
        SampleFormat::S24Be => ffi::AFMT_S24_BE,
        SampleFormat::S32Le => ffi::AFMT_S32_LE,
        SampleFormat::S32Be => ffi::AFMT_S32_BE,
        SampleFormat::Float => ffi::AFMT_FLOAT,
    }
}

fn frames_to_ms(frames: u64, rate: u32) -> u64 {
    if rate == 0 {
        return 0;
    }
    frames * 1000 / u64::from(rate)
}

/// Write as much of `data` as the device takes, completing any frame it
/// only partly accepted so the next write starts on a frame boundary
fn write_frames<W: Write>(dst: &mut W, data: &[u8], frame_size: usize) -> std::io::Result<usize> {
    let whole = data.len() - data.len() % frame_size;
    if whole == 0 {
        return Ok(0);
    }

    let mut written = dst.write(&data[..whole])?;
    let partial = written % frame_size;
    if partial != 0 {
        let end = written - partial + frame_size;
        dst.write_all(&data[written..end])?;
        written = end;
    }
    Ok(written)
}

/// Set a device parameter and require the driver to accept it unchanged
fn set_exact(
    name: &'static str,
    requested: libc::c_int,
    set: impl FnOnce(&mut libc::c_int) -> nix::Result<libc::c_int>,
) -> Result<(), OutputError> {
    let mut value = requested;
    set(&mut value).map_err(|errno| query_failed(name, errno))?;
    if value != requested {
        return Err(OutputError::UnsupportedFormat(format!(
            "{} {} not supported by the device (got {})",
            name, requested, value
        )));
    }
    Ok(())
}

/// An open dsp device
#[derive(Debug)]
pub struct OssOutput {
    dsp: File,
    frame_size: usize,
    rate: u32,
    /// Frames written since the last flush
    frames_written: u64,
    /// Playback time at the last flush
    base_ms: u64,
    paused: bool,
}

impl OssOutput {
    pub fn open(config: &OutputConfig) -> Result<Self, OutputError> {
        let mut options = OpenOptions::new();
        options.write(true);
        if config.exclusive {
            options.custom_flags(libc::O_EXCL);
        }
        let dsp = options
            .open(&config.device)
            .map_err(|source| OutputError::DeviceOpenFailed {
                path: config.device.clone(),
                source,
            })?;
        let fd = dsp.as_raw_fd();

        let cooked: libc::c_int = config.cookedmode.into();
        // SAFETY: `fd` belongs to `dsp`, which outlives the call, and `cooked`
        // is an int the driver only reads.
        if let Err(errno) = unsafe { ffi::oss_set_cooked(fd, &cooked) } {
            tracing::warn!("Failed to set cooked mode: {}", errno);
        }

        let channels = libc::c_int::try_from(config.channels)
            .map_err(|_| OutputError::UnsupportedFormat(format!("{} channels", config.channels)))?;
        let rate = libc::c_int::try_from(config.rate)
            .map_err(|_| OutputError::UnsupportedFormat(format!("{} Hz", config.rate)))?;

        // SAFETY: `fd` stays open for these calls and `v` points to a live int.
        set_exact("SNDCTL_DSP_SETFMT", oss_format(config.format), |v| unsafe {
            ffi::oss_set_format(fd, v)
        })?;
        set_exact("SNDCTL_DSP_CHANNELS", channels, |v| unsafe {
            ffi::oss_set_channels(fd, v)
        })?;
        set_exact("SNDCTL_DSP_SPEED", rate, |v| unsafe { ffi::oss_set_speed(fd, v) })?;

        let trigger = ffi::PCM_ENABLE_OUTPUT;
        // SAFETY: `fd` is still owned by `dsp`; `trigger` is a live int.
        unsafe { ffi::oss_set_trigger(fd, &trigger) }
            .map_err(|errno| query_failed("SNDCTL_DSP_SETTRIGGER", errno))?;

        tracing::info!(
            "Opened {} ({}, {} Hz, {} channels)",
            config.device,
            config.format,
            config.rate,
            config.channels
        );

        Ok(Self {
            dsp,
            frame_size: (config.format.bytes_per_sample() * config.channels as usize).max(1),
            rate: config.rate,
            frames_written: 0,
            base_ms: 0,
            paused: false,
        })
    }

    /// Write whole frames, returning the number of bytes accepted
    pub fn write(&mut self, data: &[u8]) -> Result<usize, OutputError> {
        let written = write_frames(&mut self.dsp, data, self.frame_size)?;
        self.frames_written += (written / self.frame_size) as u64;
        Ok(written)
    }

    pub fn drain(&mut self) -> Result<(), OutputError> {
        // SAFETY: the fd is owned by `self.dsp`; the request takes no argument.
        unsafe { ffi::oss_sync(self.dsp.as_raw_fd()) }
            .map_err(|errno| query_failed("SNDCTL_DSP_SYNC", errno))?;
        Ok(())
    }

    pub fn buffer_free(&self) -> Result<usize, OutputError> {
        let mut info = ffi::BufferInfo::default();
        // SAFETY: the fd is owned by `self.dsp` and `info` is the `repr(C)`
        // audio_buf_info the driver fills in.
        unsafe { ffi::oss_output_buffer_info(self.dsp.as_raw_fd(), &mut info) }
            .map_err(|errno| query_failed("SNDCTL_DSP_GETOSPACE", errno))?;
        Ok(usize::try_from(info.bytes).unwrap_or(0))
    }

    /// Block until the device can take more data
    pub fn period_wait(&self) -> Result<(), OutputError> {
        let mut fds = [PollFd::new(self.dsp.as_fd(), PollFlags::POLLOUT)];
        poll(&mut fds, PollTimeout::NONE).map_err(|errno| query_failed("poll", errno))?;
        Ok(())
    }

    /// Frames still queued in the device
    fn delay_frames(&self) -> u64 {
        let mut bytes: libc::c_int = 0;
        // SAFETY: the fd is owned by `self.dsp` and `bytes` is a live int.
        match unsafe { ffi::oss_output_delay(self.dsp.as_raw_fd(), &mut bytes) } {
            Ok(_) => u64::try_from(bytes).unwrap_or(0) / self.frame_size as u64,
            Err(errno) => {
                tracing::debug!("SNDCTL_DSP_GETODELAY failed: {}", errno);
                0
            }
        }
    }

    /// Milliseconds of audio actually played
    pub fn output_time(&self) -> u64 {
        let played = self.frames_written.saturating_sub(self.delay_frames());
        self.base_ms + frames_to_ms(played, self.rate)
    }

    /// Drop queued audio and restart the clock at `time_ms`
    pub fn flush(&mut self, time_ms: u64) -> Result<(), OutputError> {
        // SAFETY: the fd is owned by `self.dsp`; the request takes no argument.
        unsafe { ffi::oss_halt(self.dsp.as_raw_fd()) }
            .map_err(|errno| query_failed("SNDCTL_DSP_HALT", errno))?;
        self.frames_written = 0;
        self.base_ms = time_ms;

        if !self.paused {
            self.set_trigger(ffi::PCM_ENABLE_OUTPUT)?;
        }
        Ok(())
    }

    pub fn pause(&mut self, pause: bool) -> Result<(), OutputError> {
        let trigger = if pause { 0 } else { ffi::PCM_ENABLE_OUTPUT };
        self.set_trigger(trigger)?;
        self.paused = pause;
        Ok(())
    }

    fn set_trigger(&self, trigger: libc::c_int) -> Result<(), OutputError> {
        // SAFETY: the fd is owned by `self.dsp` and `trigger` is a live int.
        unsafe { ffi::oss_set_trigger(self.dsp.as_raw_fd(), &trigger) }
            .map_err(|errno| query_failed("SNDCTL_DSP_SETTRIGGER", errno))?;
        Ok(())
    }

    pub fn set_volume(&self, volume: StereoVolume) -> Result<(), OutputError> {
        let mut word = pack_volume(volume);
        // SAFETY: the fd is owned by `self.dsp` and `word` is a live int the
        // driver may overwrite.
        unsafe { ffi::oss_set_play_volume(self.dsp.as_raw_fd(), &mut word) }
            .map_err(|errno| query_failed("SNDCTL_DSP_SETPLAYVOL", errno))?;
        Ok(())
    }

    pub fn volume(&self) -> Result<StereoVolume, OutputError> {
        let mut word: libc::c_int = 0;
        // SAFETY: the fd is owned by `self.dsp` and `word` is a live int.
        unsafe { ffi::oss_get_play_volume(self.dsp.as_raw_fd(), &mut word) }
            .map_err(|errno| query_failed("SNDCTL_DSP_GETPLAYVOL", errno))?;
        Ok(unpack_volume(word))
    }
}
