use anyhow::Context;
use losscore::series::{parse_rounds, LossRound};
use std::fs;
use std::path::Path;

pub fn load_rounds<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<LossRound>> {
    let path_ref = path.as_ref();
    let contents = fs::read_to_string(path_ref)
        .with_context(|| format!("reading rounds file {}", path_ref.display()))?;
    parse_rounds(&contents).with_context(|| format!("parsing rounds file {}", path_ref.display()))
}
