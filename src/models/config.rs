//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    /// Glob handed to Tera, e.g. `templates/**/*`.
    pub templates_dir: String,
    /// Base URL of the customer directory, e.g. `http://localhost:5555`.
    pub directory_url: String,
}
