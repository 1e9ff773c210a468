use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HostsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Files or directories. A directory contributes every regular file
    /// directly inside it.
    #[serde(default = "default_paths")]
    pub paths: Vec<String>,

    /// How long the watcher lets a burst of filesystem events settle before
    /// rebuilding.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for HostsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            paths: default_paths(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_paths() -> Vec<String> {
    if cfg!(windows) {
        vec![r"C:\Windows\System32\drivers\etc\hosts".to_string()]
    } else {
        vec!["/etc/hosts".to_string()]
    }
}

fn default_debounce_ms() -> u64 {
    50
}
