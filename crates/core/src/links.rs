//! Operator-facing console URLs for runs and their storages.

/// Default web console of the automation platform.
pub const DEFAULT_CONSOLE_URL: &str = "https://console.apify.com";

/// Builds console deep links used for troubleshooting a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLinks {
    base: String,
}

impl ConsoleLinks {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into().trim_end_matches('/').to_string();
        Self { base }
    }

    pub fn run(&self, run_id: &str) -> String {
        format!("{}/actors/runs/{run_id}", self.base)
    }

    pub fn dataset(&self, dataset_id: &str) -> String {
        format!("{}/storage/datasets/{dataset_id}", self.base)
    }

    pub fn key_value_store(&self, store_id: &str) -> String {
        format!("{}/storage/key-value-stores/{store_id}", self.base)
    }
}

impl Default for ConsoleLinks {
    fn default() -> Self {
        Self::new(DEFAULT_CONSOLE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_links_without_double_slash() {
        let links = ConsoleLinks::new("https://console.example.com/");
        assert_eq!(links.run("r1"), "https://console.example.com/actors/runs/r1");
        assert_eq!(
            links.dataset("d1"),
            "https://console.example.com/storage/datasets/d1"
        );
        assert_eq!(
            links.key_value_store("k1"),
            "https://console.example.com/storage/key-value-stores/k1"
        );
    }
}
