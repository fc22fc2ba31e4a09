// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! reqwest client construction.
//!
//! Both pollers issue plain `GET` requests against the public API, so the
//! client only needs TLS, an optional HTTPS proxy and an optional request
//! timeout. Without a configured timeout the reqwest default (none) applies.

use reqwest::{Client, ClientBuilder, Proxy};
use std::env;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("TLS configuration error: {0}")]
    Tls(String),
    #[error("invalid proxy '{url}': {source}")]
    Proxy {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Settings applied to every request issued through the built client.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// HTTPS proxy URL
    pub https_proxy: Option<String>,
    /// Total request timeout. `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            https_proxy: None,
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientOptions {
    /// Reads `DD_PROXY_HTTPS` (falling back to `HTTPS_PROXY`) and
    /// `DD_HTTP_TIMEOUT_SECONDS`. An unparsable or zero timeout is ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`ClientOptions::from_env`] with a custom variable source.
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|val| !val.trim().is_empty());

        let https_proxy = non_empty("DD_PROXY_HTTPS")
            .or_else(|| non_empty("HTTPS_PROXY"))
            .map(|proxy| proxy.trim().to_string());
        let timeout = non_empty("DD_HTTP_TIMEOUT_SECONDS")
            .and_then(|secs| secs.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        Self {
            https_proxy,
            timeout,
            ..Default::default()
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Builds a `reqwest::Client` from `options`.
pub fn build_client(options: &ClientOptions) -> Result<Client, ClientError> {
    let mut builder = create_reqwest_client_builder()?.user_agent(options.user_agent.as_str());

    if let Some(timeout) = options.timeout {
        builder = builder.timeout(timeout);
    }

    if let Some(url) = &options.https_proxy {
        debug!("Routing HTTPS requests through proxy {url}");
        let proxy = Proxy::https(url).map_err(|source| ClientError::Proxy {
            url: url.clone(),
            source,
        })?;
        builder = builder.proxy(proxy);
    }

    Ok(builder.build()?)
}

#[cfg(not(feature = "fips"))]
fn create_reqwest_client_builder() -> Result<ClientBuilder, ClientError> {
    Ok(Client::builder().use_rustls_tls())
}

/// With the `fips` feature the process must have installed a FIPS crypto
/// provider (e.g. `rustls::crypto::default_fips_provider().install_default()`)
/// before any client is built.
#[cfg(feature = "fips")]
fn create_reqwest_client_builder() -> Result<ClientBuilder, ClientError> {
    let provider = rustls::crypto::CryptoProvider::get_default()
        .ok_or_else(|| ClientError::Tls("no crypto provider installed".to_string()))?;
    if !provider.fips() {
        return Err(ClientError::Tls(
            "installed crypto provider is not FIPS-compliant".to_string(),
        ));
    }

    let mut roots = rustls::RootCertStore::empty();
    let native = rustls_native_certs::load_native_certs();
    let (added, _ignored) = roots.add_parsable_certificates(native.certs);
    if added == 0 {
        return Err(ClientError::Tls(
            "no usable certificates in the native root store".to_string(),
        ));
    }

    let config = rustls::ClientConfig::builder_with_provider(provider.clone())
        .with_protocol_versions(rustls::ALL_VERSIONS)
        .map_err(|e| ClientError::Tls(e.to_string()))?
        .with_root_certificates(roots)
        .with_no_client_auth();
    if !config.fips() {
        return Err(ClientError::Tls(
            "resulting TLS configuration is not FIPS-compliant".to_string(),
        ));
    }
    debug!("HTTP client uses FIPS TLS configuration");

    Ok(Client::builder().use_preconfigured_tls(config))
}
