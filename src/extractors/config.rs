// src/extractors/config.rs

/// Titles closer together than this (in element positions) form one cluster.
pub const DEFAULT_CLUSTER_RADIUS: usize = 6;

/// A trimmed table of contents this long or longer is treated as a false positive.
pub const DEFAULT_MAX_TOC_LEN: usize = 1000;

pub const CLUSTER_RADIUS_ENV: &str = "SEC_TOC_CLUSTER_RADIUS";
pub const MAX_TOC_LEN_ENV: &str = "SEC_MAX_TOC_LEN";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractorConfig {
    pub cluster_radius: usize,
    pub max_toc_len: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            cluster_radius: DEFAULT_CLUSTER_RADIUS,
            max_toc_len: DEFAULT_MAX_TOC_LEN,
        }
    }
}

fn env_usize(name: &str, default: usize) -> usize {
    match std::env::var(name) {
        Ok(value) => match value.trim().parse::<usize>() {
            Ok(parsed) => {
                tracing::debug!("Using {}={} from environment", name, parsed);
                parsed
            }
            Err(_) => {
                tracing::warn!("Ignoring invalid {}='{}', using {}", name, value, default);
                default
            }
        },
        Err(_) => default,
    }
}

impl ExtractorConfig {
    /// Defaults, overridden by `SEC_TOC_CLUSTER_RADIUS` / `SEC_MAX_TOC_LEN` when set.
    pub fn from_env() -> Self {
        Self {
            cluster_radius: env_usize(CLUSTER_RADIUS_ENV, DEFAULT_CLUSTER_RADIUS),
            max_toc_len: env_usize(MAX_TOC_LEN_ENV, DEFAULT_MAX_TOC_LEN),
        }
    }

    pub fn with_max_toc_len(mut self, max_toc_len: usize) -> Self {
        self.max_toc_len = max_toc_len;
        self
    }

    pub fn with_cluster_radius(mut self, cluster_radius: usize) -> Self {
        self.cluster_radius = cluster_radius;
        self
    }
}
