use std::path::Path;

use anyhow::Context;
use skyraid_common::WorldGeometry;
use skyraid_kernel::SimConfig;

use crate::demo;

/// Load and validate a YAML config, or the defaults when no path is given.
pub fn config(path: Option<&Path>) -> anyhow::Result<SimConfig> {
    let config = match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_yaml::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => SimConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

/// Load geometry JSON, or the demo city when no path is given.
pub fn geometry(path: Option<&Path>) -> anyhow::Result<WorldGeometry> {
    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading geometry");
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading geometry {}", path.display()))?;
            Ok(WorldGeometry::from_json(&text)?)
        }
        None => Ok(demo::city()?),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn partial_yaml_overrides_defaults() {
        let file = write_temp("max_lives: 60\nwaves:\n  base_size: 2\n");
        let config = config(Some(file.path())).unwrap();
        assert_eq!(config.max_lives, 60);
        assert_eq!(config.waves.base_size, 2);
        assert_eq!(config.tick_seconds, 0.016);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let file = write_temp("tick_seconds: 0.0\n");
        let err = config(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("tick_seconds"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = config(Some(Path::new("/nonexistent/skyraid.yaml"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/skyraid.yaml"));
    }

    #[test]
    fn geometry_from_file() {
        let file = write_temp(
            r#"{ "ground_level": 2.0, "buildings": [
                { "x": 0.0, "z": 0.0, "half_width": 5.0, "half_depth": 5.0, "height": 30.0 }
            ] }"#,
        );
        let geometry = geometry(Some(file.path())).unwrap();
        assert_eq!(geometry.ground_level(), 2.0);
        assert_eq!(geometry.buildings().len(), 1);
    }

    #[test]
    fn default_geometry_is_the_demo_city() {
        assert!(!geometry(None).unwrap().buildings().is_empty());
    }
}
