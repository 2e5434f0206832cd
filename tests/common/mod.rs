// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

// Common test utilities for integration tests

#![allow(dead_code)]

use kube::{Client, Config};
use wiremock::MockServer;

/// Install the rustls crypto provider used by the kube client.
pub fn install_crypto_provider() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

/// Get a Kubernetes client or skip the test if not in a cluster
pub async fn get_kube_client_or_skip() -> Option<Client> {
    install_crypto_provider();
    match Client::try_default().await {
        Ok(client) => Some(client),
        Err(e) => {
            eprintln!("Skipping integration test: not running in Kubernetes cluster: {e}");
            None
        }
    }
}

/// Client configuration pointing at a mock API server
pub fn mock_config(server: &MockServer) -> Config {
    install_crypto_provider();
    let uri = server
        .uri()
        .parse()
        .unwrap_or_else(|e| panic!("mock server uri {} is invalid: {e}", server.uri()));
    Config::new(uri)
}

/// Client talking to a mock API server
pub fn mock_client(server: &MockServer) -> Client {
    Client::try_from(mock_config(server)).expect("failed to build client for mock server")
}
