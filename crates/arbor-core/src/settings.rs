//! Typed view over the host's key-value settings store.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

use crate::config::{settings_keys, zoom};
use crate::error::SettingsError;
use crate::sort::SortPreference;

/// The fixed set of persisted keys.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SettingKey {
    ZoomLevel,
    /// Sort preference of one directory.
    SortPreference(String),
    ExpandedFolders,
}

impl SettingKey {
    /// Key string used in the store.
    pub fn name(&self) -> String {
        match self {
            Self::ZoomLevel => settings_keys::ZOOM_LEVEL.to_string(),
            Self::SortPreference(path) => format!("{}{}", settings_keys::SORT_PREFIX, path),
            Self::ExpandedFolders => settings_keys::EXPANDED_FOLDERS.to_string(),
        }
    }

    /// Inverse of [`name`](Self::name).
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            settings_keys::ZOOM_LEVEL => Some(Self::ZoomLevel),
            settings_keys::EXPANDED_FOLDERS => Some(Self::ExpandedFolders),
            _ => name
                .strip_prefix(settings_keys::SORT_PREFIX)
                .map(|path| Self::SortPreference(path.to_string())),
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Typed payload of a setting.
#[derive(Clone, Debug, PartialEq)]
pub enum SettingValue {
    Zoom(f64),
    Sort(SortPreference),
    Expanded(BTreeMap<String, bool>),
}

/// Clamp a zoom factor into the allowed range; non-finite values reset.
pub fn clamp_zoom(level: f64) -> f64 {
    if level.is_finite() {
        level.clamp(zoom::MIN, zoom::MAX)
    } else {
        zoom::DEFAULT
    }
}

impl SettingValue {
    /// Decode a raw store value for `key`.
    ///
    /// Values of the wrong shape are treated as absent.
    pub fn decode(key: &SettingKey, raw: Value) -> Option<Self> {
        match key {
            SettingKey::ZoomLevel => raw.as_f64().map(|z| Self::Zoom(clamp_zoom(z))),
            SettingKey::SortPreference(_) => serde_json::from_value(raw).ok().map(Self::Sort),
            SettingKey::ExpandedFolders => serde_json::from_value(raw).ok().map(Self::Expanded),
        }
    }

    pub fn encode(&self) -> Result<Value, SettingsError> {
        let value = match self {
            Self::Zoom(z) => serde_json::to_value(z),
            Self::Sort(pref) => serde_json::to_value(pref),
            Self::Expanded(map) => serde_json::to_value(map),
        };
        value.map_err(|e| SettingsError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::{SortDirection, SortField};
    use serde_json::json;

    #[test]
    fn test_key_names_roundtrip() {
        let key = SettingKey::SortPreference("/home/me".to_string());
        assert_eq!(key.name(), "sortPreference:/home/me");
        assert_eq!(SettingKey::parse(&key.name()), Some(key));
        assert_eq!(SettingKey::parse("zoomLevel"), Some(SettingKey::ZoomLevel));
        assert_eq!(SettingKey::parse("theme"), None);
    }

    #[test]
    fn test_decode_sort_preference() {
        let key = SettingKey::SortPreference("/a".into());
        let value = SettingValue::decode(&key, json!({"field": "size", "direction": "desc"}));
        assert_eq!(
            value,
            Some(SettingValue::Sort(SortPreference::new(
                SortField::Size,
                SortDirection::Descending
            )))
        );
        assert_eq!(SettingValue::decode(&key, json!("bogus")), None);
    }

    #[test]
    fn test_zoom_clamped_on_decode() {
        assert_eq!(
            SettingValue::decode(&SettingKey::ZoomLevel, json!(9.0)),
            Some(SettingValue::Zoom(zoom::MAX))
        );
        assert_eq!(clamp_zoom(f64::NAN), zoom::DEFAULT);
    }

    #[test]
    fn test_encode_expanded() {
        let map = BTreeMap::from([("/a".to_string(), true)]);
        let value = SettingValue::Expanded(map).encode().unwrap();
        assert_eq!(value, json!({"/a": true}));
    }
}
