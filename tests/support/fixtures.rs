//! Test fixtures and constants.

/// Three sections, one quoted value, one duplicate field.
pub const SAMPLE_ENV: &str = r#"# Thothix configuration
VAULT_ADDR=http://127.0.0.1:1

# :database - Database settings
DB_HOST=localhost
DB_PORT=5432
DB_PASSWORD="s3cr3t-pa55"

# :redis - Cache
REDIS_URL='redis://localhost:6379'

# :jwt - Token signing
JWT_SECRET=first
JWT_SECRET=super-secret-jwt-token
"#;

/// Lines the parser skips, one of each kind.
pub const NOISY_ENV: &str = "\
ORPHAN=outside
# :app - Application
APP_NAME=thothix
not a pair
# : broken header
LOST=after reset
";

/// No section headers at all.
pub const FLAT_ENV: &str = "KEY1=value1\nKEY2=value2\n";
