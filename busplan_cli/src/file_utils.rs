use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;
use tracing::info;

pub fn read_json<T>(path: &Path) -> Result<T, anyhow::Error>
where
    T: DeserializeOwned,
{
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))
}

/// Writes `content` to `out`, creating parent folders, or prints it when no
/// file is given.
pub fn write_output(out: Option<&Path>, content: &str) -> Result<(), anyhow::Error> {
    let Some(out) = out else {
        println!("{content}");
        return Ok(());
    };

    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(out, content).with_context(|| format!("Failed to write {}", out.display()))?;
    info!("Wrote {}", out.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::env;

    use busplan_optimizer::json::types::JsonRouteNetwork;

    use super::*;

    #[test]
    fn test_read_and_write_json() {
        let folder = env::temp_dir().join("busplan_cli_file_utils");
        let path = folder.join("nested/network.json");

        write_output(
            Some(&path),
            r#"{ "Blue": { "stops": ["A", "B"], "buses": {} } }"#,
        )
        .unwrap();

        let network: JsonRouteNetwork = read_json(&path).unwrap();
        assert_eq!(network.routes["Blue"].stops, vec!["A", "B"]);

        std::fs::remove_dir_all(folder).unwrap();
    }

    #[test]
    fn test_read_missing_file() {
        let error = read_json::<JsonRouteNetwork>(Path::new("/does/not/exist.json")).unwrap_err();
        assert!(error.to_string().contains("/does/not/exist.json"));
    }
}
