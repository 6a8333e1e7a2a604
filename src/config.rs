//! Layered configuration for generation runs.
//!
//! A run's configuration is assembled from named layers applied in ascending
//! precedence: built-in defaults, process environment, command-line
//! properties, the home config file and the optional project config file.
//! Later layers overwrite keys of earlier ones but never remove them.
//! Mandatory keys are checked once all layers are applied, before any
//! output is written.

use crate::constants::{
    HOME_CONFIG_FILES, HOME_KEY, MANDATORY_KEYS, PROJECTS_PATH_KEY, PROJECT_CONFIG_FILES,
    PROJECT_PATH_KEY, TEMPLATES_DIR, TEMPLATES_ROOT_KEY,
};
use crate::error::{must_not_blank, Error, Result};
use crate::paths;
use indexmap::IndexMap;
use log::debug;
use serde::Serialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Name of the layer holding re-published canonical values.
const PUBLISHED_LAYER: &str = "published";

/// One named source of key/value properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLayer {
    name: String,
    values: IndexMap<String, String>,
}

impl ConfigLayer {
    pub fn new<S: Into<String>>(name: S, values: IndexMap<String, String>) -> Self {
        Self { name: name.into(), values }
    }

    /// Builds a layer from key/value pairs.
    pub fn from_pairs<S, I, K, V>(name: S, pairs: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::new(name, pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// The generator's built-in defaults.
    pub fn defaults() -> Self {
        Self::from_pairs(
            "defaults",
            [
                ("gg_isOverride", "true"),
                ("generator_sourceEncoding", "UTF-8"),
                ("generator_outputEncoding", "UTF-8"),
                ("tableNameSingularize", "true"),
            ],
        )
    }

    /// Snapshot of the process environment.
    pub fn from_env() -> Self {
        Self::from_os_pairs("environment", std::env::vars_os())
    }

    /// Builds a layer from OS strings. Pairs that are not valid Unicode are
    /// skipped.
    pub fn from_os_pairs<S, I>(name: S, pairs: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let values = pairs
            .into_iter()
            .filter_map(|(key, value)| match (key.to_str(), value.to_str()) {
                (Some(key), Some(value)) => Some((key.to_string(), value.to_string())),
                _ => {
                    debug!("Skipping non-Unicode variable '{}'", key.to_string_lossy());
                    None
                }
            })
            .collect();
        Self::new(name, values)
    }

    /// Loads a flat JSON or YAML mapping from `path`.
    ///
    /// # Errors
    /// * `Error::Io` if the file cannot be read
    /// * `Error::ConfigError` if the content is not a flat mapping
    pub fn from_file<S: Into<String>, P: AsRef<Path>>(name: S, path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(Error::io(path))?;
        let values = parse_properties(&content)
            .map_err(|e| Error::ConfigError(format!("{}: {e}", path.display())))?;
        Ok(Self::new(name, values))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &IndexMap<String, String> {
        &self.values
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// Parses a flat mapping of scalars. JSON is tried first, then YAML.
/// Numbers and booleans are stringified and null becomes the empty string.
pub fn parse_properties(content: &str) -> std::result::Result<IndexMap<String, String>, String> {
    if content.trim().is_empty() {
        return Ok(IndexMap::new());
    }

    let raw: IndexMap<String, serde_json::Value> = match serde_json::from_str(content) {
        Ok(v) => v,
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| format!("invalid configuration format: {e}"))?,
    };

    raw.into_iter()
        .map(|(key, value)| {
            let value = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                serde_json::Value::Null => String::new(),
                _ => return Err(format!("'{key}' must be a scalar value")),
            };
            Ok((key, value))
        })
        .collect()
}

/// Returns the first of `names` that exists as a file in `dir`.
pub fn find_config_file<P: AsRef<Path>>(dir: P, names: &[&str]) -> Option<PathBuf> {
    names.iter().map(|name| dir.as_ref().join(name)).find(|path| path.is_file())
}

/// The flattened result of applying every layer. Read-only once built.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct MergedConfig {
    values: IndexMap<String, String>,
    #[serde(skip)]
    sources: IndexMap<String, String>,
}

impl MergedConfig {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Returns the value of `key`, failing when it is absent or blank.
    pub fn require(&self, key: &str) -> Result<&str> {
        match self.get(key) {
            Some(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(Error::ConfigurationMissing { key: key.to_string() }),
        }
    }

    /// Name of the layer that supplied the value of `key`.
    pub fn source_of(&self, key: &str) -> Option<&str> {
        self.sources.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The configuration as a rendering context.
    pub fn to_context(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    fn apply(&mut self, layer: &ConfigLayer) {
        debug!("Applying layer '{}' ({} key(s))", layer.name, layer.values.len());
        for (key, value) in &layer.values {
            self.values.insert(key.clone(), value.clone());
            self.sources.insert(key.clone(), layer.name.clone());
        }
    }
}

/// Merges `layers` in order and checks `mandatory` keys afterwards.
///
/// # Errors
/// * `Error::ConfigurationMissing` naming the first mandatory key that is
///   absent or blank
pub fn merge(layers: &[ConfigLayer], mandatory: &[&str]) -> Result<MergedConfig> {
    let mut merged = MergedConfig::default();
    for layer in layers {
        merged.apply(layer);
    }
    for key in mandatory {
        merged.require(key)?;
    }
    Ok(merged)
}

/// Collects layers in precedence order and merges them.
#[derive(Debug, Default)]
pub struct ConfigMerger {
    layers: Vec<ConfigLayer>,
    mandatory: Vec<String>,
}

impl ConfigMerger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a layer above every layer added so far.
    pub fn layer(mut self, layer: ConfigLayer) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn mandatory<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mandatory.extend(keys.into_iter().map(Into::into));
        self
    }

    pub fn merge(&self) -> Result<MergedConfig> {
        let mandatory: Vec<&str> = self.mandatory.iter().map(String::as_str).collect();
        merge(&self.layers, &mandatory)
    }
}

/// Directory form of `value`: canonical and ending with `/`.
fn dir_form(value: &str) -> Result<String> {
    must_not_blank(value, "path")?;
    let trimmed = value.trim().trim_end_matches(['/', '\\']);
    paths::canonicalize(&format!("{trimmed}/"))
}

/// The command-line property layer: `projectPath` and its parent
/// `projectsPath` derived from `project_path`, then the `defines`, which may
/// override either.
pub fn properties_layer<P, I, K, V>(project_path: P, defines: I) -> Result<ConfigLayer>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let project = dir_form(&project_path.as_ref().to_string_lossy())?;
    let projects = dir_form(&paths::normalize(&format!("{project}..")))?;

    let mut values = IndexMap::new();
    values.insert(PROJECT_PATH_KEY.to_string(), project);
    values.insert(PROJECTS_PATH_KEY.to_string(), projects);
    values.extend(defines.into_iter().map(|(k, v)| (k.into(), v.into())));
    Ok(ConfigLayer::new("properties", values))
}

/// Resolves a run's configuration.
///
/// `environment` and `properties` are the environment and command-line
/// property layers. The home config file is located in the directory named
/// by `PROGEN_HOME` as resolved from the layers below it; the project config
/// file, when present, lives in the project directory.
///
/// After merging, `PROGEN_HOME`, `projectPath`, `projectsPath` and
/// `dir_templates_root` are re-published in canonical directory form.
///
/// # Errors
/// * `Error::ConfigurationMissing` if `PROGEN_HOME` or `projectPath` is blank
/// * `Error::NotFound` if the home directory has no config file
/// * `Error::ConfigError` if a config file cannot be parsed
pub fn resolve(environment: ConfigLayer, properties: ConfigLayer) -> Result<MergedConfig> {
    let mut layers = vec![ConfigLayer::defaults(), environment, properties];

    let interim = merge(&layers, &[HOME_KEY, PROJECT_PATH_KEY])?;
    let home = interim.require(HOME_KEY)?.to_string();
    let project = interim.require(PROJECT_PATH_KEY)?.to_string();

    let home_file =
        find_config_file(&home, &HOME_CONFIG_FILES).ok_or_else(|| Error::NotFound {
            resource: format!(
                "home configuration ({}) in '{}'",
                HOME_CONFIG_FILES.join(", "),
                home
            ),
        })?;
    layers.push(ConfigLayer::from_file("home", home_file)?);

    match find_config_file(&project, &PROJECT_CONFIG_FILES) {
        Some(project_file) => layers.push(ConfigLayer::from_file("project-file", project_file)?),
        None => debug!("No project configuration in '{}'", project),
    }

    let mut merged = merge(&layers, &MANDATORY_KEYS)?;
    let published = publish(&merged)?;
    merged.apply(&published);
    Ok(merged)
}

fn publish(merged: &MergedConfig) -> Result<ConfigLayer> {
    let home = dir_form(merged.require(HOME_KEY)?)?;
    let project = dir_form(merged.require(PROJECT_PATH_KEY)?)?;
    let projects = match merged.get(PROJECTS_PATH_KEY) {
        Some(value) if !value.trim().is_empty() => dir_form(value)?,
        _ => dir_form(&paths::normalize(&format!("{project}..")))?,
    };
    let templates = format!("{home}{TEMPLATES_DIR}/");

    Ok(ConfigLayer::from_pairs(
        PUBLISHED_LAYER,
        [
            (HOME_KEY, home),
            (PROJECT_PATH_KEY, project),
            (PROJECTS_PATH_KEY, projects),
            (TEMPLATES_ROOT_KEY, templates),
        ],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_properties_stringifies_scalars() {
        let values = parse_properties("name: demo\nport: 8080\ndebug: true\nempty:\n").unwrap();
        assert_eq!(values["name"], "demo");
        assert_eq!(values["port"], "8080");
        assert_eq!(values["debug"], "true");
        assert_eq!(values["empty"], "");
    }

    #[test]
    fn test_parse_properties_json_keeps_order() {
        let values = parse_properties(r#"{"b": "2", "a": 1}"#).unwrap();
        let keys: Vec<&String> = values.keys().collect();
        assert_eq!(keys, ["b", "a"]);
    }

    #[test]
    fn test_parse_properties_rejects_nested_values() {
        assert!(parse_properties("list:\n  - a\n").is_err());
        assert!(parse_properties(r#"{"map": {"a": 1}}"#).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_from_os_pairs_skips_non_unicode() {
        use std::os::unix::ffi::OsStringExt;

        let layer = ConfigLayer::from_os_pairs(
            "environment",
            [
                (OsString::from("PROGEN_HOME"), OsString::from("/gen")),
                (OsString::from("BROKEN_VALUE"), OsString::from_vec(vec![0xff, 0xfe])),
                (OsString::from_vec(vec![b'K', 0xff]), OsString::from("x")),
            ],
        );
        assert_eq!(layer.name(), "environment");
        assert_eq!(layer.values().len(), 1);
        assert_eq!(layer.get("PROGEN_HOME"), Some("/gen"));
        assert_eq!(layer.get("BROKEN_VALUE"), None);
    }

    #[test]
    fn test_source_of_tracks_winning_layer() {
        let merged = merge(
            &[
                ConfigLayer::from_pairs("low", [("k", "1"), ("only_low", "x")]),
                ConfigLayer::from_pairs("high", [("k", "2")]),
            ],
            &[],
        )
        .unwrap();
        assert_eq!(merged.source_of("k"), Some("high"));
        assert_eq!(merged.source_of("only_low"), Some("low"));
        assert_eq!(merged.source_of("absent"), None);
    }
}
