//! Client for the branch, commit, diff, patch and merge endpoints of a Gogs
//! server.
//!
//! Every remote operation is a method on [`GogsClient`] that picks a verb,
//! formats a path under `/api/v1`, optionally encodes a JSON body and decodes
//! the JSON answer:
//!
//! ```no_run
//! # async fn demo() -> gogs_branch::Result<()> {
//! use gogs_branch::{CreateBranchOption, GogsClient};
//!
//! let client = GogsClient::new("http://10.2.96.250", "token")?;
//! let branch = client
//!     .create_branch(
//!         "devops",
//!         "docker-k8s",
//!         &CreateBranchOption {
//!             branch_name: "feature-x".to_string(),
//!             base: "master".to_string(),
//!         },
//!     )
//!     .await?;
//! println!("{}", branch.name);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod gogs;

pub use error::{Error, Result};
pub use gogs::*;
