use serde::Deserialize;

const CONFIG_FILE: &str = "config/expenses";
const ENV_PREFIX: &str = "EXPENSES";

/// Where the remote expense collection lives
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct BackendConfig {
    /// Root of the database, e.g. `https://<project>.firebaseio.com`
    pub base_url: String,
    /// Name of the collection under the root
    #[serde(default = "default_collection")]
    pub collection: String,
}

fn default_collection() -> String {
    "expenses".to_string()
}

impl BackendConfig {
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        BackendConfig {
            base_url: base_url.into(),
            collection: default_collection(),
        }
    }

    /// Load from an optional `config/expenses.*` file, overridden by `EXPENSES_*`
    /// environment variables (e.g. `EXPENSES_BASE_URL`).
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::from_sources(config::Environment::with_prefix(ENV_PREFIX))
    }

    fn from_sources<S>(environment: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        config::Config::builder()
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(environment)
            .build()?
            .try_deserialize()
    }
}
