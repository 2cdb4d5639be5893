//! Trigger payload construction for the `out` step

use serde_json::{Map, Value};
use spinnaker_core::dto::put::OutParams;
use spinnaker_core::dto::spinnaker::TriggerRequest;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{ResourceError, Result};

/// Builds the trigger request, expanding variables from the process
/// environment
pub fn build_trigger_request(params: &OutParams, sources_dir: &Path) -> Result<TriggerRequest> {
    build_trigger_request_with(params, sources_dir, |name| std::env::var(name).ok())
}

/// Builds the trigger request with an explicit variable lookup
///
/// Static `trigger_params` and a `trigger_params_json_file_path` are
/// mutually exclusive. Files are resolved relative to `sources_dir`.
pub fn build_trigger_request_with<F>(
    params: &OutParams,
    sources_dir: &Path,
    lookup: F,
) -> Result<TriggerRequest>
where
    F: Fn(&str) -> Option<String>,
{
    let static_params = params.trigger_params.as_ref().filter(|map| !map.is_empty());
    let params_file = non_empty(params.trigger_params_json_file_path.as_deref());

    let parameters = match (static_params, params_file) {
        (Some(_), Some(_)) => {
            return Err(ResourceError::configuration(
                "trigger_params and trigger_params_json_file_path cannot both be set",
            ));
        }
        (Some(map), None) => Some(expand_parameters(map, &lookup)),
        (None, Some(path)) => {
            let value = read_json(sources_dir, path)?;
            if !value.is_object() {
                return Err(ResourceError::configuration(format!(
                    "trigger parameters file {} must contain a JSON object",
                    path
                )));
            }
            Some(value)
        }
        (None, None) => None,
    };

    let artifacts = non_empty(params.artifacts.as_deref())
        .map(|path| read_json(sources_dir, path))
        .transpose()?;

    Ok(TriggerRequest {
        parameters,
        artifacts,
        ..Default::default()
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Expands `$VAR` and `${VAR}` references; undefined variables become empty
fn expand_parameters<F>(params: &BTreeMap<String, String>, lookup: &F) -> Value
where
    F: Fn(&str) -> Option<String>,
{
    let expanded: Map<String, Value> = params
        .iter()
        .map(|(key, value)| {
            let value =
                shellexpand::env_with_context_no_errors(value, |name| Some(lookup(name).unwrap_or_default()));
            (key.clone(), Value::String(value.into_owned()))
        })
        .collect();

    Value::Object(expanded)
}

fn read_json(sources_dir: &Path, relative: &str) -> Result<Value> {
    let path = sources_dir.join(relative);
    let bytes = fs::read(&path).map_err(|source| ResourceError::Io {
        action: "read",
        path: path.clone(),
        source,
    })?;

    serde_json::from_slice(&bytes).map_err(|e| ResourceError::json(path.display().to_string(), e))
}
