use serde::{Deserialize, Serialize};
use sndout_core::{PluginPreferences, PreferencesWidget, SettingsStore, StereoVolume, WidgetSetting};

use crate::ffi::DEFAULT_DSP;

pub const SECTION: &str = "oss4";

/// Values stored before the user has changed anything
pub const DEFAULTS: &[(&str, &str)] = &[
    ("device", DEFAULT_DSP),
    ("use_alt_device", "FALSE"),
    ("alt_device", DEFAULT_DSP),
    ("save_volume", "TRUE"),
    ("volume", "12850"),
    ("cookedmode", "TRUE"),
    ("exclusive", "FALSE"),
];

static OSS_WIDGETS: &[PreferencesWidget] = &[
    PreferencesWidget::Combo {
        label: "Audio device:",
        setting: WidgetSetting::Str {
            section: SECTION,
            name: "device",
        },
    },
    PreferencesWidget::Check {
        label: "Use alternate device:",
        setting: WidgetSetting::Bool {
            section: SECTION,
            name: "use_alt_device",
        },
    },
    PreferencesWidget::Entry {
        label: None,
        setting: WidgetSetting::Str {
            section: SECTION,
            name: "alt_device",
        },
        child: true,
    },
    PreferencesWidget::Check {
        label: "Save volume between sessions.",
        setting: WidgetSetting::Bool {
            section: SECTION,
            name: "save_volume",
        },
    },
    PreferencesWidget::Check {
        label: "Enable format conversions made by the OSS software.",
        setting: WidgetSetting::Bool {
            section: SECTION,
            name: "cookedmode",
        },
    },
    PreferencesWidget::Check {
        label: "Enable exclusive mode to prevent virtual mixing.",
        setting: WidgetSetting::Bool {
            section: SECTION,
            name: "exclusive",
        },
    },
];

pub static OSS_PREFS: PluginPreferences = PluginPreferences {
    widgets: OSS_WIDGETS,
};

/// Typed snapshot of the plugin's settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OssSettings {
    pub device: String,
    pub use_alt_device: bool,
    pub alt_device: String,
    pub save_volume: bool,
    pub cookedmode: bool,
    pub exclusive: bool,
    pub volume: StereoVolume,
}

impl OssSettings {
    pub fn load<S: SettingsStore + ?Sized>(store: &S) -> Self {
        Self {
            device: store.get_str(SECTION, "device"),
            use_alt_device: store.get_bool(SECTION, "use_alt_device"),
            alt_device: store.get_str(SECTION, "alt_device"),
            save_volume: store.get_bool(SECTION, "save_volume"),
            cookedmode: store.get_bool(SECTION, "cookedmode"),
            exclusive: store.get_bool(SECTION, "exclusive"),
            volume: unpack_volume(store.get_int(SECTION, "volume")),
        }
    }

    /// Path to open for playback
    pub fn device_path(&self) -> &str {
        if self.use_alt_device {
            &self.alt_device
        } else {
            &self.device
        }
    }
}

pub fn register_defaults<S: SettingsStore + ?Sized>(store: &mut S) {
    store.set_defaults(SECTION, DEFAULTS);
}

pub fn save_volume<S: SettingsStore + ?Sized>(store: &mut S, volume: StereoVolume) {
    store.set_int(SECTION, "volume", pack_volume(volume));
}

/// Pack a volume into the OSS word: left in the low byte, right above it
pub fn pack_volume(volume: StereoVolume) -> i32 {
    i32::from(volume.left) | (i32::from(volume.right) << 8)
}

pub fn unpack_volume(word: i32) -> StereoVolume {
    StereoVolume::new((word & 0xff) as u8, ((word >> 8) & 0xff) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sndout_core::JsonSettings;

    #[test]
    fn test_widget_layout() {
        let widgets = OSS_PREFS.widgets;
        assert_eq!(widgets.len(), 6);
        assert!(matches!(widgets[0], PreferencesWidget::Combo { .. }));
        assert_eq!(widgets[0].setting().name(), "device");
        assert!(widgets.iter().all(|w| w.setting().section() == "oss4"));

        let alt = OSS_PREFS.widget_for("oss4", "alt_device").unwrap();
        assert!(matches!(alt, PreferencesWidget::Entry { child: true, label: None, .. }));
    }

    #[test]
    fn test_every_widget_has_a_default() {
        for widget in OSS_PREFS.widgets {
            let name = widget.setting().name();
            assert!(
                DEFAULTS.iter().any(|(key, _)| *key == name),
                "missing default for {}",
                name
            );
        }
    }

    #[test]
    fn test_defaults_load() {
        let mut store = JsonSettings::in_memory();
        register_defaults(&mut store);
        let settings = OssSettings::load(&store);

        assert_eq!(settings.device, "/dev/dsp");
        assert!(!settings.use_alt_device);
        assert!(settings.save_volume);
        assert!(settings.cookedmode);
        assert!(!settings.exclusive);
        assert_eq!(settings.volume, StereoVolume::new(50, 50));
        assert_eq!(settings.device_path(), "/dev/dsp");
    }

    #[test]
    fn test_alt_device_overrides() {
        let mut store = JsonSettings::in_memory();
        register_defaults(&mut store);
        store.set(SECTION, "alt_device", "/dev/dsp3".to_string());
        assert_eq!(OssSettings::load(&store).device_path(), "/dev/dsp");

        store.set_bool(SECTION, "use_alt_device", true);
        assert_eq!(OssSettings::load(&store).device_path(), "/dev/dsp3");
    }

    #[test]
    fn test_volume_word() {
        assert_eq!(pack_volume(StereoVolume::new(50, 50)), 12850);
        assert_eq!(unpack_volume(12850), StereoVolume::new(50, 50));
        let uneven = StereoVolume::new(100, 7);
        assert_eq!(unpack_volume(pack_volume(uneven)), uneven);
    }

    #[test]
    fn test_save_volume() {
        let mut store = JsonSettings::in_memory();
        save_volume(&mut store, StereoVolume::new(80, 20));
        assert_eq!(store.get_int(SECTION, "volume"), 80 | (20 << 8));
    }
}
