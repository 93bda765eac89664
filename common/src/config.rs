use std::{collections::HashMap, path::Path};

use anyhow::{Context, Result};
use hocon::{Hocon, HoconLoader};
use log::warn;

#[derive(Debug)]
pub struct ConfigLoader {
    hocon: Hocon,
    env: HashMap<String, String>,
    scope: String,
}

impl ConfigLoader {
    /// Loads the HOCON file at `path`. A missing file is not an error, every lookup then
    /// falls through to the environment and the caller's defaults.
    pub fn new(path: impl AsRef<Path>, scope: String) -> Result<Self> {
        let path = path.as_ref();

        let hocon = if path.is_file() {
            HoconLoader::new()
                .load_file(path)
                .with_context(|| format!("Failed to find or load config file at: {:?}", path))?
                .hocon()?
        } else {
            warn!("Config file {:?} not found, using environment and defaults", path);
            HoconLoader::new().load_str("{}")?.hocon()?
        };

        Ok(Self::with_env(hocon, scope))
    }

    pub fn load_str(contents: &str, scope: String) -> Result<Self> {
        let hocon = HoconLoader::new()
            .load_str(contents)
            .context("Failed to parse config")?
            .hocon()?;

        Ok(Self::with_env(hocon, scope))
    }

    /// Returns a loader over the same document looking up values in a different scope.
    pub fn scoped(&self, scope: &str) -> Self {
        Self {
            hocon: self.hocon.clone(),
            env: self.env.clone(),
            scope: scope.to_string(),
        }
    }

    fn with_env(hocon: Hocon, scope: String) -> Self {
        let env = std::env::vars().collect::<HashMap<_, _>>();

        Self { hocon, env, scope }
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.env.get(&name.to_uppercase()) {
            return Some(Value::String(value.clone()));
        }

        let scope = &self.hocon[self.scope.as_str()];
        if matches!(scope, Hocon::Hash(_)) {
            if let Some(value) = Self::map_hocon(scope, name) {
                return Some(value);
            }
        }

        Self::map_hocon(&self.hocon, name)
    }

    pub fn load<T: Config>(&self) -> Result<T> {
        let res = T::load(self)?;
        Ok(res)
    }

    fn map_hocon(hocon: &Hocon, name: &str) -> Option<Value> {
        match &hocon[name] {
            Hocon::Real(f64) => Some(Value::Float(*f64 as f32)),
            Hocon::Integer(i64) => Some(Value::Integer(*i64 as usize)),
            Hocon::String(string) => Some(Value::String(string.clone())),
            Hocon::Boolean(bool) => Some(Value::Boolean(*bool)),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum Value {
    String(String),
    Integer(usize),
    Float(f32),
    Boolean(bool),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(val) => Some(*val),
            Value::String(val) => Hocon::String(val.clone()).as_bool(),
            _ => None,
        }
    }

    pub fn as_usize(&self) -> Option<usize> {
        match self {
            Value::Integer(val) => Some(*val),
            Value::String(val) => val.parse::<usize>().ok(),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<String> {
        match self {
            Value::String(val) => Some(val.clone()),
            Value::Boolean(true) => Some("true".to_string()),
            Value::Boolean(false) => Some("false".to_string()),
            Value::Float(val) => Some(val.to_string()),
            Value::Integer(val) => Some(val.to_string()),
        }
    }
}

pub trait Config {
    fn load(config: &ConfigLoader) -> Result<Self>
    where
        Self: Sized;
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONF: &str = r#"
        root_only = 2
        solver {
            ranks = 6
            stats_interval = 1000
        }
        subtraction {
            pile = 12
        }
    "#;

    #[test]
    fn test_get_prefers_scoped_value() {
        let config = ConfigLoader::load_str(CONF, "solver".to_string()).unwrap();

        assert_eq!(config.get("stats_interval").and_then(|v| v.as_usize()), Some(1000));
    }

    #[test]
    fn test_get_falls_back_to_root() {
        let config = ConfigLoader::load_str(CONF, "subtraction".to_string()).unwrap();

        assert_eq!(config.get("pile").and_then(|v| v.as_usize()), Some(12));
        assert_eq!(config.get("root_only").and_then(|v| v.as_usize()), Some(2));
        assert!(config.get("stats_interval").is_none());
    }

    #[test]
    fn test_scoped_switches_scope() {
        let config = ConfigLoader::load_str(CONF, "subtraction".to_string()).unwrap();
        let solver = config.scoped("solver");

        assert_eq!(solver.get("stats_interval").and_then(|v| v.as_usize()), Some(1000));
    }

    #[test]
    fn test_missing_file_is_empty_config() {
        let config = ConfigLoader::new("does/not/exist.conf", "solver".to_string()).unwrap();

        assert!(config.get("stats_interval").is_none());
    }

    #[test]
    fn test_value_conversions() {
        assert_eq!(Value::String("7".to_string()).as_usize(), Some(7));
        assert_eq!(Value::Integer(7).as_string(), Some("7".to_string()));
        assert_eq!(Value::Boolean(true).as_bool(), Some(true));
        assert_eq!(Value::Float(1.5).as_usize(), None);
    }
}
