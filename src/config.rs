// ABOUTME: Environment-based client configuration
// ABOUTME: Backend base URL plus the optional pre-issued principal for the CLI identity provider
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Environment-only configuration, no config files.
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `FITTRACK_BACKEND_URL` | Base URL of the fitness backend | `http://localhost:8081` |
//! | `FITTRACK_PRINCIPAL` | Principal the CLI identity provider logs in as | unset |
//!
//! Deliberately absent: a request timeout. A stalled remote call stays pending
//! indefinitely; no operation is cancellable once issued.

use std::env;

use url::Url;

use crate::errors::{AppError, AppResult};

/// Default backend base URL for local development
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8081";

/// Client configuration resolved from the environment
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the fitness backend
    pub backend_url: Url,
    /// Principal the CLI identity provider resolves to, when pre-issued
    pub principal: Option<String>,
}

impl ClientConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a config error when `FITTRACK_BACKEND_URL` is set but not a
    /// valid absolute URL
    pub fn from_env() -> AppResult<Self> {
        let raw_url =
            env::var("FITTRACK_BACKEND_URL").unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_owned());
        let backend_url = Url::parse(&raw_url).map_err(|e| {
            AppError::config(format!("FITTRACK_BACKEND_URL '{raw_url}' is invalid: {e}"))
        })?;

        let principal = env::var("FITTRACK_PRINCIPAL").ok().filter(|p| !p.is_empty());

        Ok(Self {
            backend_url,
            principal,
        })
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            // Safe: the default URL is a valid constant
            backend_url: Url::parse(DEFAULT_BACKEND_URL).unwrap(),
            principal: None,
        }
    }
}
