//! Runs controller requests against a [`Backend`] and [`SettingsStore`].

use std::collections::VecDeque;

use crate::backend::{Backend, SettingsStore};
use crate::entry::join_path;
use crate::error::{BackendError, SettingsError};
use crate::list::FileList;
use crate::request::{Completion, Mutation, Request};
use crate::settings::{SettingKey, SettingValue};

/// Perform one request and package its result with the request's tags.
pub async fn execute<B, S>(backend: &B, settings: &S, request: Request) -> Completion
where
    B: Backend,
    S: SettingsStore,
{
    match request {
        Request::ListDirectory {
            ticket,
            show_hidden,
            origin,
        } => {
            let result = backend.list_directory(&ticket.path, show_hidden).await;
            Completion::Listed {
                ticket,
                origin,
                result,
            }
        }
        Request::ListTrash { generation } => Completion::TrashListed {
            generation,
            result: backend.list_trash_items().await,
        },
        Request::HomeDirectory => Completion::Home(backend.home_directory().await),
        Request::ParentDirectory { of, nav } => Completion::Parent {
            nav,
            result: backend.parent_directory(&of).await,
        },
        Request::ListDrives => Completion::Drives(backend.list_drives().await),
        Request::CheckWithinHome { path, nav } => {
            let result = backend.is_within_home(&path).await;
            Completion::WithinHome { path, nav, result }
        }
        Request::Platform => Completion::Platform(backend.platform().await),
        Request::Mutate(mutation) => {
            let result = apply(backend, &mutation).await;
            Completion::Mutated { mutation, result }
        }
        Request::Open { path } => {
            let result = backend.open_path(&path).await;
            Completion::Opened { path, result }
        }
        Request::LoadSetting { key, nav } => {
            let result = load(settings, &key).await;
            Completion::SettingLoaded { key, nav, result }
        }
        Request::StoreSetting { key, value } => {
            let result = store(settings, &key, &value).await;
            Completion::SettingStored { key, result }
        }
    }
}

/// Run a mutation; `Ok` carries the resulting path.
async fn apply<B: Backend>(backend: &B, mutation: &Mutation) -> Result<String, BackendError> {
    match mutation {
        Mutation::CreateFile { parent, name } => {
            backend.create_file(parent, name).await?;
            Ok(join_path(parent, name))
        }
        Mutation::CreateDirectory { parent, name } => {
            backend.create_directory(parent, name).await?;
            Ok(join_path(parent, name))
        }
        Mutation::Rename { path, new_name } => backend.rename_item(path, new_name).await,
        Mutation::MoveToTrash { path } => {
            backend.move_to_trash(path).await?;
            Ok(path.clone())
        }
        Mutation::DeletePermanently { path } => {
            backend.delete_item(path).await?;
            Ok(path.clone())
        }
        Mutation::RestoreFromTrash { path } => {
            backend.restore_from_trash(path).await?;
            Ok(path.clone())
        }
        Mutation::Transfer(t) => {
            backend
                .file_operation(&t.source, &t.destination, t.mode)
                .await?;
            Ok(t.destination.clone())
        }
    }
}

async fn load<S: SettingsStore>(
    settings: &S,
    key: &SettingKey,
) -> Result<Option<SettingValue>, SettingsError> {
    let raw = settings.get(&key.name()).await?;
    Ok(raw.and_then(|value| SettingValue::decode(key, value)))
}

async fn store<S: SettingsStore>(
    settings: &S,
    key: &SettingKey,
    value: &SettingValue,
) -> Result<(), SettingsError> {
    settings.set(&key.name(), value.encode()?).await?;
    settings.save().await
}

/// Execute `requests` and every follow-up request, one at a time, until the
/// controller asks for nothing more. Returns the number of requests run.
pub async fn run_until_idle<B, S>(
    list: &mut FileList,
    backend: &B,
    settings: &S,
    requests: Vec<Request>,
) -> usize
where
    B: Backend,
    S: SettingsStore,
{
    let mut queue: VecDeque<Request> = requests.into();
    let mut processed = 0;
    while let Some(request) = queue.pop_front() {
        log::debug!("execute {}", request.label());
        let completion = execute(backend, settings, request).await;
        queue.extend(list.complete(completion));
        processed += 1;
    }
    processed
}
