use std::{fs, path::Path};

use serde::{Serialize, de::DeserializeOwned};

use crate::{DomainError, GridSpec, GridWorld, TowerAssembly, TowerSpec};

/// Load a domain description from YAML on disk.
pub fn load_yaml<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, DomainError> {
    let yaml = fs::read_to_string(path)?;
    let spec: T = serde_yaml::from_str(&yaml)?;
    Ok(spec)
}

/// Serialize and write a domain description to YAML.
pub fn save_yaml<T: Serialize>(path: impl AsRef<Path>, spec: &T) -> Result<(), DomainError> {
    let yaml = serde_yaml::to_string(spec)?;
    fs::write(path, yaml)?;
    Ok(())
}

/// Load and validate a tower assembly task from a YAML file.
pub fn load_tower(path: impl AsRef<Path>) -> Result<TowerAssembly, DomainError> {
    let spec: TowerSpec = load_yaml(path)?;
    spec.compile()
}

/// Load and validate a grid navigation task from a YAML file.
pub fn load_grid(path: impl AsRef<Path>) -> Result<GridWorld, DomainError> {
    let spec: GridSpec = load_yaml(path)?;
    spec.compile()
}
