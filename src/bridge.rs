//! Host bridge.
//!
//! [`TauriBackend`] forwards filesystem requests to the desktop host through
//! `window.__TAURI__.core.invoke`; [`LocalSettings`] persists preferences in
//! localStorage.

use arbor_core::{Backend, BackendError, BackendResult, ClipboardMode, Entry, SettingsError, SettingsStore};
use js_sys::{Function, Promise, Reflect};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::config::SETTINGS_PREFIX;
use crate::utils::dom;

// ============================================================================
// Invoke
// ============================================================================

/// Resolve `__TAURI__.core` and its `invoke` function.
fn tauri_core() -> BackendResult<(JsValue, Function)> {
    let window = dom::window().ok_or_else(|| BackendError::Bridge("no window".into()))?;
    let core = Reflect::get(&window, &"__TAURI__".into())
        .ok()
        .filter(|v| v.is_object())
        .and_then(|tauri| Reflect::get(&tauri, &"core".into()).ok())
        .filter(|v| v.is_object())
        .ok_or_else(|| BackendError::Bridge("desktop host not available".into()))?;
    let invoke = Reflect::get(&core, &"invoke".into())
        .ok()
        .and_then(|v| v.dyn_into::<Function>().ok())
        .ok_or_else(|| BackendError::Bridge("invoke not found".into()))?;
    Ok((core, invoke))
}

/// Best-effort text of a rejected promise.
fn js_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", value))
}

async fn invoke_raw<A: Serialize>(command: &str, args: &A) -> BackendResult<JsValue> {
    let (core, invoke) = tauri_core()?;
    let args = args
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| BackendError::Bridge(e.to_string()))?;

    let promise: Promise = invoke
        .call2(&core, &command.into(), &args)
        .map_err(|e| BackendError::Bridge(js_message(&e)))?
        .dyn_into()
        .map_err(|_| BackendError::Bridge(format!("{} did not return a promise", command)))?;

    JsFuture::from(promise)
        .await
        .map_err(|e| BackendError::from_message(js_message(&e)))
}

/// Call a host command and decode its result.
async fn invoke<A: Serialize, T: DeserializeOwned>(command: &str, args: &A) -> BackendResult<T> {
    let value = invoke_raw(command, args).await?;
    serde_wasm_bindgen::from_value(value).map_err(|e| BackendError::Bridge(e.to_string()))
}

/// Call a host command that returns nothing.
async fn invoke_unit<A: Serialize>(command: &str, args: &A) -> BackendResult<()> {
    invoke_raw(command, args).await.map(|_| ())
}

// ============================================================================
// Arguments
// ============================================================================

#[derive(Serialize)]
struct NoArgs {}

#[derive(Serialize)]
struct PathArgs<'a> {
    path: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListArgs<'a> {
    path: &'a str,
    show_hidden: bool,
}

#[derive(Serialize)]
struct CreateArgs<'a> {
    path: &'a str,
    name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RenameArgs<'a> {
    path: &'a str,
    new_name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TransferArgs<'a> {
    source_path: &'a str,
    destination_path: &'a str,
    operation: ClipboardMode,
}

// ============================================================================
// Backend
// ============================================================================

/// Filesystem backend served by the desktop host.
#[derive(Clone, Copy, Debug, Default)]
pub struct TauriBackend;

impl Backend for TauriBackend {
    async fn list_directory(&self, path: &str, show_hidden: bool) -> BackendResult<Vec<Entry>> {
        invoke("read_directory", &ListArgs { path, show_hidden }).await
    }

    async fn home_directory(&self) -> BackendResult<String> {
        invoke("get_home_directory", &NoArgs {}).await
    }

    async fn parent_directory(&self, path: &str) -> BackendResult<String> {
        invoke("get_parent_directory", &PathArgs { path }).await
    }

    async fn list_drives(&self) -> BackendResult<Vec<String>> {
        invoke("get_drives", &NoArgs {}).await
    }

    async fn is_within_home(&self, path: &str) -> BackendResult<bool> {
        invoke("is_within_home_directory", &PathArgs { path }).await
    }

    async fn create_directory(&self, parent: &str, name: &str) -> BackendResult<()> {
        invoke_unit("create_directory", &CreateArgs { path: parent, name }).await
    }

    async fn create_file(&self, parent: &str, name: &str) -> BackendResult<()> {
        invoke_unit("create_file", &CreateArgs { path: parent, name }).await
    }

    async fn rename_item(&self, path: &str, new_name: &str) -> BackendResult<String> {
        invoke("rename_item", &RenameArgs { path, new_name }).await
    }

    async fn move_to_trash(&self, path: &str) -> BackendResult<()> {
        invoke_unit("move_to_trash", &PathArgs { path }).await
    }

    async fn delete_item(&self, path: &str) -> BackendResult<()> {
        invoke_unit("delete_item", &PathArgs { path }).await
    }

    async fn restore_from_trash(&self, path: &str) -> BackendResult<()> {
        invoke_unit("restore_from_trash", &PathArgs { path }).await
    }

    async fn list_trash_items(&self) -> BackendResult<Vec<Entry>> {
        invoke("get_trash_items", &NoArgs {}).await
    }

    async fn file_operation(
        &self,
        source: &str,
        destination: &str,
        mode: ClipboardMode,
    ) -> BackendResult<()> {
        let args = TransferArgs {
            source_path: source,
            destination_path: destination,
            operation: mode,
        };
        invoke_unit("file_operation", &args).await
    }

    async fn open_path(&self, path: &str) -> BackendResult<()> {
        invoke_unit("plugin:opener|open_path", &PathArgs { path }).await
    }

    async fn platform(&self) -> BackendResult<String> {
        let window = dom::window().ok_or_else(|| BackendError::Bridge("no window".into()))?;
        let reported = Reflect::get(&window, &"__TAURI_OS_PLUGIN_INTERNALS__".into())
            .ok()
            .filter(|v| v.is_object())
            .and_then(|internals| Reflect::get(&internals, &"platform".into()).ok())
            .and_then(|v| v.as_string());
        if let Some(platform) = reported {
            return Ok(platform);
        }
        let navigator = window.navigator().platform().unwrap_or_default();
        log::debug!("os plugin missing, using navigator.platform {:?}", navigator);
        Ok(platform_from_navigator(&navigator).to_string())
    }
}

/// Map `navigator.platform` to a host platform identifier.
fn platform_from_navigator(value: &str) -> &'static str {
    if value.starts_with("Mac") || value.starts_with("iP") {
        "macos"
    } else if value.starts_with("Win") {
        "windows"
    } else {
        "linux"
    }
}

// ============================================================================
// Settings
// ============================================================================

/// Settings persisted as JSON strings in localStorage.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalSettings;

fn storage_key(key: &str) -> String {
    format!("{}{}", SETTINGS_PREFIX, key)
}

impl SettingsStore for LocalSettings {
    async fn get(&self, key: &str) -> Result<Option<Value>, SettingsError> {
        let storage = dom::local_storage().ok_or(SettingsError::Unavailable)?;
        let Some(raw) = storage.get_item(&storage_key(key)).ok().flatten() else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| SettingsError::Serialization(e.to_string()))
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), SettingsError> {
        let storage = dom::local_storage().ok_or(SettingsError::Unavailable)?;
        let raw =
            serde_json::to_string(&value).map_err(|e| SettingsError::Serialization(e.to_string()))?;
        storage
            .set_item(&storage_key(key), &raw)
            .map_err(|e| SettingsError::WriteFailed(js_message(&e)))
    }

    /// localStorage writes are synchronous.
    async fn save(&self) -> Result<(), SettingsError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_from_navigator() {
        assert_eq!(platform_from_navigator("MacIntel"), "macos");
        assert_eq!(platform_from_navigator("Win32"), "windows");
        assert_eq!(platform_from_navigator("Linux x86_64"), "linux");
        assert_eq!(platform_from_navigator(""), "linux");
    }

    #[test]
    fn test_transfer_args_use_host_names() {
        let args = TransferArgs {
            source_path: "/a",
            destination_path: "/b/a",
            operation: ClipboardMode::Cut,
        };
        let json = serde_json::to_value(&args).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "sourcePath": "/a",
                "destinationPath": "/b/a",
                "operation": "Cut"
            })
        );
    }

    #[test]
    fn test_storage_key_is_prefixed() {
        assert_eq!(storage_key("zoomLevel"), "arbor.zoomLevel");
    }
}
