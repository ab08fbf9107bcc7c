use anyhow::Context;
use losscore::presenter::{ElementBinding, LabelPolicy, PresenterOptions};
use losscore::prelude::ChartDefaults;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    pub total_element: String,
    pub station_element: String,
    pub label_policy: LabelPolicy,
    pub width: u32,
    pub out_dir: PathBuf,
    pub defaults: ChartDefaults,
}

impl Default for SessionConfig {
    fn default() -> Self {
        let binding = ElementBinding::default();
        Self {
            total_element: binding.total_element,
            station_element: binding.station_element,
            label_policy: LabelPolicy::default(),
            width: 800,
            out_dir: PathBuf::from("tools/data/charts"),
            defaults: ChartDefaults::default(),
        }
    }
}

impl SessionConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading session config {}", path_ref.display()))?;
        let config: SessionConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing session config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn to_binding(&self) -> ElementBinding {
        ElementBinding::new(self.total_element.clone(), self.station_element.clone())
    }

    pub fn to_presenter_options(&self) -> PresenterOptions {
        PresenterOptions {
            label_policy: self.label_policy,
            defaults: self.defaults.clone(),
        }
    }

    /// Canvas size derived from the configured width and aspect ratio.
    pub fn canvas_size(&self) -> (u32, u32) {
        let width = self.width.max(1);
        let ratio = if self.defaults.aspect_ratio > 0.0 {
            self.defaults.aspect_ratio
        } else {
            ChartDefaults::default().aspect_ratio
        };
        let height = (width as f32 / ratio).round().max(1.0) as u32;
        (width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_session_targets_standard_elements() {
        let cfg = SessionConfig::default();
        assert_eq!(cfg.to_binding(), ElementBinding::default());
        assert_eq!(cfg.to_presenter_options().label_policy, LabelPolicy::Frozen);
        assert_eq!(cfg.canvas_size(), (800, 615));
    }

    #[test]
    fn session_load_reads_partial_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"station_element: stations\nlabel_policy: refresh\nwidth: 650\ndefaults:\n  aspect_ratio: 2.0\n")
            .unwrap();
        let path = temp.into_temp_path();
        let cfg = SessionConfig::load(&path).unwrap();
        assert_eq!(cfg.total_element, "totalLossChart");
        assert_eq!(cfg.station_element, "stations");
        assert_eq!(cfg.label_policy, LabelPolicy::Refresh);
        assert_eq!(cfg.canvas_size(), (650, 325));
        assert_eq!(cfg.defaults.title_font_size, 20);
    }

    #[test]
    fn session_load_reports_missing_file() {
        let err = SessionConfig::load("/nonexistent/session.yaml").unwrap_err();
        assert!(err.to_string().contains("reading session config"));
    }
}
