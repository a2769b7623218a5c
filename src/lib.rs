//! Thothix Vault - publish sectioned `.env` files to a Vault KV v2 store.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── sync          # sync and init
//! │   ├── sections      # Parse preview
//! │   ├── get           # Read one section back
//! │   ├── status        # Readiness probe
//! │   ├── cleanup       # Remove stray temporary files
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── parser        # `# :id - description` sections
//!     ├── env           # Flat .env reader for settings
//!     ├── config        # Address, credential, mount resolution
//!     ├── domain/       # Sections, documents, policies, tokens, reports
//!     ├── store/        # SecretStore trait
//!     │   ├── http      # Vault HTTP API
//!     │   └── memory    # In-process store for dry runs and tests
//!     ├── bootstrap     # Mount, policies and tokens
//!     └── sync          # Readiness, publish, verify
//! ```
//!
//! # Example
//!
//! ```
//! use thothix_vault::core::store::MemoryStore;
//! use thothix_vault::core::sync::{sync, Readiness, SyncOptions};
//! use std::time::Duration;
//!
//! let env = "# :database - Database\nDB_HOST=localhost\n";
//! let store = MemoryStore::new().with_mount("thothix");
//! let options = SyncOptions::sync("development").with_readiness(Readiness {
//!     attempts: 1,
//!     interval: Duration::ZERO,
//! });
//!
//! let report = sync(&store, env, "thothix", &options).unwrap();
//! assert_eq!(report.written(), 1);
//! ```

pub mod cli;
pub mod core;
pub mod error;
