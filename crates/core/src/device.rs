use serde::{Deserialize, Serialize};

/// One selectable output device, rendered as a dropdown option
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeviceEntry {
    pub display_name: String,
    pub device_path: String,
}

impl DeviceEntry {
    pub fn new(display_name: impl Into<String>, device_path: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            device_path: device_path.into(),
        }
    }
}

/// Ordered list of devices, kept in the order they were discovered.
///
/// Device paths are unique: pushing an entry whose path is already present
/// is rejected, and so is deserializing a list that repeats a path.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "Vec<DeviceEntry>", into = "Vec<DeviceEntry>")]
pub struct DeviceList {
    entries: Vec<DeviceEntry>,
}

impl DeviceList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, returning `false` if its path is already listed
    pub fn push(&mut self, entry: DeviceEntry) -> bool {
        if self.contains_path(&entry.device_path) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    pub fn contains_path(&self, path: &str) -> bool {
        self.entries.iter().any(|e| e.device_path == path)
    }

    pub fn as_slice(&self) -> &[DeviceEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DeviceEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry. Calling this on an empty list does nothing.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl TryFrom<Vec<DeviceEntry>> for DeviceList {
    type Error = String;

    fn try_from(entries: Vec<DeviceEntry>) -> Result<Self, Self::Error> {
        let mut list = DeviceList::new();
        for entry in entries {
            let path = entry.device_path.clone();
            if !list.push(entry) {
                return Err(format!("duplicate device path: {}", path));
            }
        }
        Ok(list)
    }
}

impl From<DeviceList> for Vec<DeviceEntry> {
    fn from(list: DeviceList) -> Self {
        list.entries
    }
}

impl<'a> IntoIterator for &'a DeviceList {
    type Item = &'a DeviceEntry;
    type IntoIter = std::slice::Iter<'a, DeviceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
