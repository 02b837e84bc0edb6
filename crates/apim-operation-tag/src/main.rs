// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{anyhow, bail, Context};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use apim_operation_tag::{ApiOperationTagResource, ProviderConfig, ProviderContext, ResourceData};

const DEFAULT_LOG_LEVEL: &str = "info";

const USAGE: &str = "usage: apim-operation-tag <create|read|delete|import> <state-file> [id]";

enum Action {
    Create,
    Read,
    Delete,
    Import(String),
}

fn parse_args(mut args: impl Iterator<Item = String>) -> anyhow::Result<(Action, PathBuf)> {
    let action = args.next().ok_or_else(|| anyhow!(USAGE))?;
    let state_path = PathBuf::from(args.next().ok_or_else(|| anyhow!(USAGE))?);
    let action = match action.as_str() {
        "create" => Action::Create,
        "read" => Action::Read,
        "delete" => Action::Delete,
        "import" => Action::Import(args.next().ok_or_else(|| anyhow!(USAGE))?),
        other => bail!("unknown action '{other}'\n{USAGE}"),
    };
    Ok((action, state_path))
}

async fn load_state(path: &Path) -> anyhow::Result<ResourceData> {
    match tokio::fs::read(path).await {
        Ok(bytes) => serde_json::from_slice(&bytes)
            .with_context(|| format!("parsing state file {}", path.display())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ResourceData::default()),
        Err(e) => Err(e).with_context(|| format!("reading state file {}", path.display())),
    }
}

async fn store_state(path: &Path, data: &ResourceData) -> anyhow::Result<()> {
    let json = serde_json::to_vec_pretty(data)?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("writing state file {}", path.display()))
}

async fn run(config: ProviderConfig, action: Action, state_path: &Path) -> anyhow::Result<()> {
    let ctx = ProviderContext::from_config(&config)?;
    let resource = ApiOperationTagResource::new(&config.features);

    let data = match action {
        Action::Create => {
            let mut data = load_state(state_path).await?;
            resource.create(&ctx, &mut data).await?;
            ensure_created(&data)?;
            info!("created {}", data.id);
            data
        }
        Action::Read => {
            let mut data = load_state(state_path).await?;
            resource.read(&ctx, &mut data).await?;
            if data.is_absent() {
                info!("resource no longer exists remotely");
            }
            data
        }
        Action::Delete => {
            let mut data = load_state(state_path).await?;
            resource.delete(&ctx, &mut data).await?;
            info!("deleted");
            data
        }
        Action::Import(id) => {
            let data = resource.import(&ctx, &id).await?;
            info!("imported {}", data.id);
            data
        }
    };

    store_state(state_path, &data).await
}

/// Create leaves the state empty when its follow-up read misses the assignment.
fn ensure_created(data: &ResourceData) -> anyhow::Result<()> {
    if data.is_absent() {
        bail!("tag assignment was created but could not be read back; run read or import later");
    }
    Ok(())
}

/// Unparseable levels fall back to the default; `ProviderConfig::validate`
/// reports them.
fn env_filter(log_level: &str) -> EnvFilter {
    let directives = |level: &str| format!("h2=off,hyper=off,rustls=off,{level}");
    EnvFilter::try_new(directives(log_level))
        .unwrap_or_else(|_| EnvFilter::new(directives(DEFAULT_LOG_LEVEL)))
}

#[tokio::main]
pub async fn main() -> ExitCode {
    let log_level = env::var("ARM_LOG_LEVEL")
        .map(|val| val.to_lowercase())
        .unwrap_or(DEFAULT_LOG_LEVEL.to_string());

    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(env_filter(&log_level))
        .with_level(true)
        .with_thread_names(false)
        .with_thread_ids(false)
        .with_line_number(false)
        .with_file(false)
        .with_target(true)
        .with_writer(std::io::stderr)
        .without_time()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("setting default subscriber failed: {e}");
        return ExitCode::FAILURE;
    }

    debug!("Logging subsystem enabled");

    let (action, state_path) = match parse_args(env::args().skip(1)) {
        Ok(parsed) => parsed,
        Err(e) => {
            error!("{e:#}");
            return ExitCode::from(2);
        }
    };

    let config = match ProviderConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Error loading provider configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(config, action, &state_path).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn parses_lifecycle_actions() {
        let (action, path) = parse_args(args(&["create", "state.json"])).unwrap();
        assert!(matches!(action, Action::Create));
        assert_eq!(path, PathBuf::from("state.json"));
        assert!(matches!(
            parse_args(args(&["delete", "s.json"])).unwrap().0,
            Action::Delete
        ));
    }

    #[test]
    fn import_requires_an_id() {
        assert!(parse_args(args(&["import", "s.json"])).is_err());
        let (action, _) = parse_args(args(&["import", "s.json", "/subscriptions/x"])).unwrap();
        assert!(matches!(action, Action::Import(id) if id == "/subscriptions/x"));
    }

    #[test]
    fn rejects_unknown_action() {
        assert!(parse_args(args(&["update", "s.json"])).is_err());
        assert!(parse_args(args(&[])).is_err());
    }

    #[test]
    fn malformed_log_level_does_not_panic() {
        let filter = env_filter("foo=bar");
        assert!(filter.to_string().contains("info"));
        assert!(env_filter("debug").to_string().contains("debug"));

        let config = ProviderConfig::from_env_iter([
            ("ARM_SUBSCRIPTION_ID", "s"),
            ("ARM_LOG_LEVEL", "foo=bar"),
        ]);
        assert!(config.is_err());
    }

    #[test]
    fn create_that_reads_back_nothing_is_an_error() {
        let err = ensure_created(&ResourceData::default()).unwrap_err();
        assert!(err.to_string().contains("could not be read back"));

        let mut data = ResourceData::new("op", "tag");
        data.set_id("the-id");
        assert!(ensure_created(&data).is_ok());
    }

    #[tokio::test]
    async fn state_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        assert_eq!(load_state(&path).await.unwrap(), ResourceData::default());

        let mut data = ResourceData::new("op", "tag");
        data.set_id("the-id");
        store_state(&path, &data).await.unwrap();
        assert_eq!(load_state(&path).await.unwrap(), data);
    }
}
