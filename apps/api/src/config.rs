use anyhow::{bail, Context, Result};

pub const DEFAULT_MODEL_ID: &str = "anthropic.claude-3-5-haiku-20241022-v1:0";

/// Where profiles, applications and resume files are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Postgres documents + S3 blobs.
    Persistent,
    /// Process-local maps. Demo mode; nothing survives a restart.
    Memory,
}

/// Collection names for the document store.
#[derive(Debug, Clone)]
pub struct TableNames {
    pub users: String,
    pub jobs: String,
    pub applications: String,
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            users: "CareerAgentUsers".to_string(),
            jobs: "CareerAgentJobs".to_string(),
            applications: "CareerAgentApplications".to_string(),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Start-up aborts if a required variable is missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub storage_backend: StorageBackend,
    pub database_url: Option<String>,
    pub tables: TableNames,
    pub resumes_bucket: String,
    pub s3_endpoint: Option<String>,
    pub aws_region: String,
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<String>,
    pub model_id: String,
    pub inference_endpoint: String,
    pub inference_api_key: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let storage_backend = parse_backend(&env_or("STORAGE_BACKEND", "persistent"))?;
        let database_url = optional_env("DATABASE_URL");
        if storage_backend == StorageBackend::Persistent && database_url.is_none() {
            bail!("Required environment variable 'DATABASE_URL' is not set (STORAGE_BACKEND=persistent)");
        }

        let aws_region = env_or("AWS_REGION", "us-east-1");
        let inference_endpoint = optional_env("INFERENCE_ENDPOINT")
            .unwrap_or_else(|| format!("https://bedrock-runtime.{aws_region}.amazonaws.com"));

        Ok(Config {
            storage_backend,
            database_url,
            tables: TableNames {
                users: env_or("USERS_TABLE", "CareerAgentUsers"),
                jobs: env_or("JOBS_TABLE", "CareerAgentJobs"),
                applications: env_or("APPLICATIONS_TABLE", "CareerAgentApplications"),
            },
            resumes_bucket: env_or("RESUMES_BUCKET", "career-agent-resumes"),
            s3_endpoint: optional_env("S3_ENDPOINT"),
            aws_region,
            aws_access_key_id: optional_env("AWS_ACCESS_KEY_ID"),
            aws_secret_access_key: optional_env("AWS_SECRET_ACCESS_KEY"),
            model_id: env_or("MODEL_ID", DEFAULT_MODEL_ID),
            inference_endpoint,
            inference_api_key: require_env("INFERENCE_API_KEY")?,
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn parse_backend(raw: &str) -> Result<StorageBackend> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "persistent" => Ok(StorageBackend::Persistent),
        "memory" => Ok(StorageBackend::Memory),
        other => bail!("STORAGE_BACKEND must be 'persistent' or 'memory', got '{other}'"),
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    optional_env(key).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_backend_accepts_known_values() {
        assert_eq!(parse_backend("memory").unwrap(), StorageBackend::Memory);
        assert_eq!(
            parse_backend(" Persistent ").unwrap(),
            StorageBackend::Persistent
        );
    }

    #[test]
    fn test_parse_backend_rejects_unknown() {
        let err = parse_backend("dynamo").unwrap_err();
        assert!(err.to_string().contains("dynamo"));
    }

    #[test]
    fn test_default_table_names() {
        let tables = TableNames::default();
        assert_eq!(tables.users, "CareerAgentUsers");
        assert_eq!(tables.jobs, "CareerAgentJobs");
        assert_eq!(tables.applications, "CareerAgentApplications");
    }
}
