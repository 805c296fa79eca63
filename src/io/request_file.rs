//! Import and export of simulation requests as JSON files.

use anyhow::{Context, Result};
use lsim::SimulationRequest;
use std::fs;
use std::path::Path;

/// Reads a simulation request from a JSON file.
pub fn load_request(path: &Path) -> Result<SimulationRequest> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("Invalid request file {}", path.display()))
}

/// Writes a simulation request as pretty-printed JSON.
pub fn save_request(path: &Path, request: &SimulationRequest) -> Result<()> {
    let json = serde_json::to_string_pretty(request)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_save_then_load() -> Result<()> {
        let path = env::temp_dir().join("league_sim_request_roundtrip.json");
        let mut request = SimulationRequest::default();
        request.set_flag("CHAMPION_KHAZIX_R_EVOLVED", true);
        request.item_ids = vec![3142];

        save_request(&path, &request)?;
        assert_eq!(load_request(&path)?, request);
        let _ = fs::remove_file(&path);
        Ok(())
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let path = env::temp_dir().join("league_sim_request_invalid.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_request(&path).unwrap_err();
        assert!(format!("{err:#}").contains("league_sim_request_invalid.json"));
        let _ = fs::remove_file(&path);
    }
}
