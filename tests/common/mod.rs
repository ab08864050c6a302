//! Common test utilities and helpers

#![allow(dead_code)]

use anyhow::Result;
use compliance_api::dispatch::{Dispatcher, UnknownOperationPolicy};
use compliance_api::server::ApiServer;
use compliance_api::store::MemoryStoreProvider;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Running server bound to an ephemeral local port
pub struct TestServer {
    pub addr: SocketAddr,
    pub provider: MemoryStoreProvider,
    client: reqwest::Client,
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        Self::start_with(Dispatcher::default()).await
    }

    pub async fn start_with_policy(policy: UnknownOperationPolicy) -> Result<Self> {
        Self::start_with(Dispatcher::default().with_unknown_operation_policy(policy)).await
    }

    pub async fn start_with(dispatcher: Dispatcher) -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let provider = MemoryStoreProvider::new();

        let server = ApiServer::new(dispatcher, Arc::new(provider.clone()));
        tokio::spawn(server.serve(listener));

        Ok(Self {
            addr,
            provider,
            client: reqwest::Client::new(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Send `body` to `/api/{operation}` with the given method
    pub async fn call(
        &self,
        method: reqwest::Method,
        operation: &str,
        body: Option<Value>,
    ) -> Result<reqwest::Response> {
        let mut request = self
            .client
            .request(method, self.url(&format!("/api/{operation}")));
        if let Some(body) = body {
            request = request.json(&body);
        }
        Ok(request.send().await?)
    }

    pub async fn call_raw(
        &self,
        method: reqwest::Method,
        operation: &str,
        body: &'static str,
    ) -> Result<reqwest::Response> {
        Ok(self
            .client
            .request(method, self.url(&format!("/api/{operation}")))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await?)
    }
}

pub fn registration(email: &str, fiscal_code: &str) -> Value {
    json!({
        "fiscalCode": fiscal_code,
        "firstName": "Maria",
        "lastName": "Rossi",
        "email": email,
        "password": "s3cret",
    })
}

pub fn login(email: &str, password: &str) -> Value {
    json!({ "email": email, "password": password })
}
