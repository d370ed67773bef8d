use crate::error::HostError;
use hearth_common::RenderMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Game construction and run-loop parameters.
///
/// The four leading fields mirror the construction signature plugins use:
/// `(title, version, tick_rate, render_mode)`. The rest have serde
/// defaults so partial YAML configs load cleanly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub title: String,
    pub version: String,
    /// Fixed simulation rate in ticks per second.
    pub tick_rate: f64,
    pub render_mode: RenderMode,
    /// Where named key bindings are saved and loaded.
    pub key_binds_file: PathBuf,
    /// Directory scanned for plugin scripts at startup.
    pub script_dir: PathBuf,
    /// Default world save location.
    pub world_file: PathBuf,
    /// Cap on catch-up ticks per frame when the loop falls behind.
    pub max_ticks_per_frame: u32,
    /// How often hold bindings re-fire, in checks per second. Clamped to
    /// the tick rate.
    pub held_checks_per_sec: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "Untitled".into(),
            version: "0.0".into(),
            tick_rate: 30.0,
            render_mode: RenderMode::Mode2D,
            key_binds_file: PathBuf::from("assets/keys.cfg"),
            script_dir: PathBuf::from("etc/scripts/autoexec"),
            world_file: PathBuf::from("etc/world.dat"),
            max_ticks_per_frame: 5,
            held_checks_per_sec: 10.0,
        }
    }
}

impl GameConfig {
    /// The construction signature observed at every plugin entry point.
    pub fn new(title: &str, version: &str, tick_rate: f64, render_mode: RenderMode) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
            tick_rate,
            render_mode,
            ..Self::default()
        }
    }

    /// Load a YAML config file. A missing file is `ResourceMissing`;
    /// unparseable content is rejected.
    pub fn load_yaml(path: impl AsRef<Path>) -> Result<Self, HostError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(HostError::ResourceMissing(path.display().to_string()));
        }
        let text = std::fs::read_to_string(path)?;
        let config: GameConfig =
            serde_yaml::from_str(&text).map_err(|e| HostError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Write the config as YAML.
    pub fn save_yaml(&self, path: impl AsRef<Path>) -> Result<(), HostError> {
        let text = serde_yaml::to_string(self).map_err(|e| HostError::Config(e.to_string()))?;
        std::fs::write(path.as_ref(), text)?;
        Ok(())
    }

    /// Reject parameter combinations the run loop cannot honor.
    pub fn validate(&self) -> Result<(), HostError> {
        if !(self.tick_rate.is_finite() && self.tick_rate > 0.0) {
            return Err(HostError::HostRejected(format!(
                "tick_rate must be positive, got {}",
                self.tick_rate
            )));
        }
        if self.max_ticks_per_frame == 0 {
            return Err(HostError::HostRejected(
                "max_ticks_per_frame must be at least 1".into(),
            ));
        }
        if !(self.held_checks_per_sec.is_finite() && self.held_checks_per_sec > 0.0) {
            return Err(HostError::HostRejected(format!(
                "held_checks_per_sec must be positive, got {}",
                self.held_checks_per_sec
            )));
        }
        Ok(())
    }

    /// How many ticks sit between two held-input checks (at least 1).
    pub fn held_check_interval(&self) -> u64 {
        let per_sec = self.held_checks_per_sec.min(self.tick_rate);
        (self.tick_rate / per_sec).round().max(1.0) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_mirrors_construction_signature() {
        let c = GameConfig::new("Test Client", "INDEV", 30.0, RenderMode::Mode2D);
        assert_eq!(c.title, "Test Client");
        assert_eq!(c.version, "INDEV");
        assert_eq!(c.tick_rate, 30.0);
        assert_eq!(c.render_mode, RenderMode::Mode2D);
    }

    #[test]
    fn yaml_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("hearth.yaml");

        let c = GameConfig::new("Roundtrip", "1.2", 60.0, RenderMode::Mode3D);
        c.save_yaml(&path).unwrap();

        let loaded = GameConfig::load_yaml(&path).unwrap();
        assert_eq!(loaded.title, "Roundtrip");
        assert_eq!(loaded.tick_rate, 60.0);
        assert_eq!(loaded.render_mode, RenderMode::Mode3D);
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("hearth.yaml");
        std::fs::write(&path, "title: Minimal\n").unwrap();

        let loaded = GameConfig::load_yaml(&path).unwrap();
        assert_eq!(loaded.title, "Minimal");
        assert_eq!(loaded.tick_rate, 30.0);
        assert_eq!(loaded.world_file, PathBuf::from("etc/world.dat"));
    }

    #[test]
    fn missing_config_is_resource_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let err = GameConfig::load_yaml(tmp.path().join("absent.yaml"));
        assert!(matches!(err, Err(HostError::ResourceMissing(_))));
    }

    #[test]
    fn invalid_tick_rate_rejected() {
        let mut c = GameConfig::default();
        c.tick_rate = 0.0;
        assert!(matches!(c.validate(), Err(HostError::HostRejected(_))));
        c.tick_rate = f64::NAN;
        assert!(matches!(c.validate(), Err(HostError::HostRejected(_))));
    }

    #[test]
    fn held_interval_clamps_to_tick_rate() {
        let mut c = GameConfig::default();
        c.tick_rate = 30.0;
        c.held_checks_per_sec = 10.0;
        assert_eq!(c.held_check_interval(), 3);

        // Faster than the tick rate clamps to every tick.
        c.held_checks_per_sec = 500.0;
        assert_eq!(c.held_check_interval(), 1);
    }
}
