use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use crate::runtime::RuntimeConfig;

pub const DEFAULT_PORT: u16 = 5001;
pub const DEFAULT_MODEL_PATH: &str = "fraud_model.onnx";
pub const DEFAULT_VOCABULARY_PATH: &str = "vocabulary.json";

/// Command-line configuration. Every flag falls back to an environment variable.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Address to listen on
    #[arg(long, env = "FRAUDGUARD_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "FRAUDGUARD_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Path to the ONNX model file
    #[arg(short, long, env = "FRAUDGUARD_MODEL", default_value = DEFAULT_MODEL_PATH)]
    pub model: PathBuf,

    /// Path to the vocabulary JSON array
    #[arg(short, long, env = "FRAUDGUARD_VOCABULARY", default_value = DEFAULT_VOCABULARY_PATH)]
    pub vocabulary: PathBuf,

    /// Expected SHA-256 of the model file; startup fails on mismatch
    #[arg(long, env = "FRAUDGUARD_MODEL_SHA256")]
    pub model_sha256: Option<String>,

    /// Expected SHA-256 of the vocabulary file; startup fails on mismatch
    #[arg(long, env = "FRAUDGUARD_VOCABULARY_SHA256")]
    pub vocabulary_sha256: Option<String>,

    /// Intra-op threads for ONNX Runtime (0 lets the runtime decide)
    #[arg(long, env = "FRAUDGUARD_INTRA_THREADS", default_value_t = 0)]
    pub intra_threads: usize,

    /// Inter-op threads for ONNX Runtime (0 lets the runtime decide)
    #[arg(long, env = "FRAUDGUARD_INTER_THREADS", default_value_t = 0)]
    pub inter_threads: usize,
}

impl Args {
    pub fn bind_address(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|e| anyhow::anyhow!("Invalid listen address '{}': {}", addr, e))
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig::default().with_threads(self.intra_threads, self.inter_threads)
    }
}
