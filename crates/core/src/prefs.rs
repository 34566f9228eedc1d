//! Declarative settings dialog layout
//!
//! Plugins describe their dialog with a `'static` slice of widgets. The
//! host renders it and reads/writes each widget's setting through its
//! settings store. Nothing here is mutated at runtime.

/// The setting a widget edits, addressed by section and name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetSetting {
    Str {
        section: &'static str,
        name: &'static str,
    },
    Bool {
        section: &'static str,
        name: &'static str,
    },
}

impl WidgetSetting {
    pub fn section(&self) -> &'static str {
        match self {
            Self::Str { section, .. } | Self::Bool { section, .. } => section,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Str { name, .. } | Self::Bool { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferencesWidget {
    /// Dropdown whose options come from the open session's `combo_items()`
    Combo {
        label: &'static str,
        setting: WidgetSetting,
    },
    Check {
        label: &'static str,
        setting: WidgetSetting,
    },
    /// Text entry. A `child` entry is only editable while the check box
    /// directly above it is set.
    Entry {
        label: Option<&'static str>,
        setting: WidgetSetting,
        child: bool,
    },
}

impl PreferencesWidget {
    pub fn setting(&self) -> WidgetSetting {
        match self {
            Self::Combo { setting, .. } | Self::Check { setting, .. } => *setting,
            Self::Entry { setting, .. } => *setting,
        }
    }

    pub fn label(&self) -> Option<&'static str> {
        match self {
            Self::Combo { label, .. } | Self::Check { label, .. } => Some(*label),
            Self::Entry { label, .. } => *label,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginPreferences {
    pub widgets: &'static [PreferencesWidget],
}

impl PluginPreferences {
    /// Find the widget bound to `section`/`name`
    pub fn widget_for(&self, section: &str, name: &str) -> Option<&'static PreferencesWidget> {
        self.widgets.iter().find(|w| {
            let setting = w.setting();
            setting.section() == section && setting.name() == name
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static WIDGETS: &[PreferencesWidget] = &[
        PreferencesWidget::Check {
            label: "Enable",
            setting: WidgetSetting::Bool {
                section: "test",
                name: "enable",
            },
        },
        PreferencesWidget::Entry {
            label: None,
            setting: WidgetSetting::Str {
                section: "test",
                name: "path",
            },
            child: true,
        },
    ];

    #[test]
    fn test_widget_lookup() {
        let prefs = PluginPreferences { widgets: WIDGETS };
        let entry = prefs.widget_for("test", "path").unwrap();
        assert_eq!(entry.label(), None);
        assert!(matches!(entry, PreferencesWidget::Entry { child: true, .. }));
        assert!(prefs.widget_for("other", "path").is_none());
    }
}
