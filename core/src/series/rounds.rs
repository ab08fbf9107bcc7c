/// One round of per-station losses.
pub type LossRound = Vec<f64>;

#[derive(thiserror::Error, Debug)]
pub enum RoundsError {
    #[error("no rounds found")]
    Empty,
    #[error("not JSON ({json}) and not YAML ({yaml})")]
    Malformed { json: String, yaml: String },
}

/// Parses a JSON array of arrays, or a YAML sequence of sequences when the
/// text is not JSON.
pub fn parse_rounds(contents: &str) -> Result<Vec<LossRound>, RoundsError> {
    if contents.trim().is_empty() {
        return Err(RoundsError::Empty);
    }
    match serde_json::from_str::<Vec<LossRound>>(contents) {
        Ok(rounds) => Ok(rounds),
        Err(json_err) => serde_yaml::from_str::<Vec<LossRound>>(contents).map_err(|yaml_err| {
            RoundsError::Malformed {
                json: json_err.to_string(),
                yaml: yaml_err.to_string(),
            }
        }),
    }
}
