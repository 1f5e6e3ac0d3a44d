use dep_takeover::prelude::*;
use std::path::Path;

/// Mock ManifestReader returning a fixed seed map
#[derive(Default)]
pub struct MockManifestReader {
    dependencies: Vec<(String, String)>,
    should_fail: bool,
}

#[allow(dead_code)]
impl MockManifestReader {
    pub fn new(dependencies: &[(&str, &str)]) -> Self {
        Self {
            dependencies: dependencies
                .iter()
                .map(|(n, v)| (n.to_string(), v.to_string()))
                .collect(),
            should_fail: false,
        }
    }

    pub fn with_failure() -> Self {
        Self {
            dependencies: Vec::new(),
            should_fail: true,
        }
    }
}

impl ManifestReader for MockManifestReader {
    fn read_dependencies(&self, _project_path: &Path, _ecosystem: Ecosystem) -> Result<DependencyMap> {
        if self.should_fail {
            anyhow::bail!("Mock manifest reader failure");
        }

        self.dependencies
            .iter()
            .map(|(name, version)| Ok(DependencyRecord::new(name.as_str(), version.as_str())?))
            .collect()
    }
}
