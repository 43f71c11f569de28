// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! The fixed catalog of HTTP client variants.
//!
//! Adding a client to the comparison means adding an entry to
//! [`standard_catalog`]. Order here is report order.
//!
//! - **reqwest**: one-shot `reqwest::blocking::get`, a fresh client per request
//! - **reqwest_session**: reused blocking client executing a prepared request
//! - **reqwest_nossl**: reused blocking client with certificate checks disabled
//! - **reqwest_async**: async client driven by a current-thread runtime
//! - **hyper**: pooled `hyper_util` legacy client, plain HTTP only
//! - **tcp_stream**: hand-written HTTP/1.1 over `std::net`, plain HTTP only

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};

use bytes::Bytes;
use http_body_util::{BodyExt, Empty};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use tokio::runtime::Runtime;

use crate::error::ClientError;
use crate::variant::{work, Variant, Work};

/// Build the catalog in report order.
pub fn standard_catalog() -> Vec<Variant> {
    vec![
        Variant::new("reqwest", reqwest_oneshot),
        Variant::new("reqwest_session", reqwest_session),
        Variant::new("reqwest_nossl", reqwest_nossl),
        Variant::new("reqwest_async", reqwest_async),
        Variant::new("hyper", hyper_pooled),
        Variant::new("tcp_stream", tcp_stream),
    ]
}

/// Async clients get their own runtime, blocked on from the harness thread.
fn current_thread_runtime() -> Result<Runtime, ClientError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(ClientError::Runtime)
}

fn require_plain_http(scheme: Option<&str>) -> Result<(), ClientError> {
    match scheme {
        Some("http") => Ok(()),
        other => Err(ClientError::UnsupportedScheme {
            scheme: other.unwrap_or("<none>").to_string(),
        }),
    }
}

fn reqwest_oneshot(url: &str) -> Result<Work, ClientError> {
    let url = reqwest::Url::parse(url)?;
    Ok(work(move || {
        reqwest::blocking::get(url.clone())?.bytes()?;
        Ok(())
    }))
}

fn reqwest_session(url: &str) -> Result<Work, ClientError> {
    let client = reqwest::blocking::Client::builder().build()?;
    let request = client.get(url).build()?;
    Ok(work(move || {
        let request = request
            .try_clone()
            .ok_or(ClientError::RequestNotCloneable)?;
        client.execute(request)?.bytes()?;
        Ok(())
    }))
}

fn reqwest_nossl(url: &str) -> Result<Work, ClientError> {
    let url = reqwest::Url::parse(url)?;
    let client = reqwest::blocking::Client::builder()
        .danger_accept_invalid_certs(true)
        .build()?;
    Ok(work(move || {
        client.get(url.clone()).send()?.bytes()?;
        Ok(())
    }))
}

fn reqwest_async(url: &str) -> Result<Work, ClientError> {
    let url = reqwest::Url::parse(url)?;
    let runtime = current_thread_runtime()?;
    let client = reqwest::Client::builder().build()?;
    Ok(work(move || {
        runtime.block_on(async {
            client.get(url.clone()).send().await?.bytes().await?;
            Ok::<(), ClientError>(())
        })
    }))
}

fn hyper_pooled(url: &str) -> Result<Work, ClientError> {
    let uri: http::Uri = url.parse()?;
    require_plain_http(uri.scheme_str())?;
    let runtime = current_thread_runtime()?;
    let client: Client<HttpConnector, Empty<Bytes>> =
        Client::builder(TokioExecutor::new()).build_http();
    Ok(work(move || {
        runtime.block_on(async {
            let response = client.get(uri.clone()).await?;
            response.into_body().collect().await?;
            Ok::<(), ClientError>(())
        })
    }))
}

fn tcp_stream(url: &str) -> Result<Work, ClientError> {
    let parsed = url::Url::parse(url)?;
    require_plain_http(Some(parsed.scheme()))?;

    let host = parsed
        .host_str()
        .ok_or_else(|| ClientError::MissingHost {
            url: url.to_string(),
        })?;
    let host_header = match parsed.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    };
    let addrs: Vec<SocketAddr> = parsed.socket_addrs(|| Some(80))?;

    let mut target = parsed.path().to_string();
    if let Some(query) = parsed.query() {
        target.push('?');
        target.push_str(query);
    }
    let request = format!(
        "GET {} HTTP/1.1\r\nHost: {}\r\nUser-Agent: clientbench/{}\r\nAccept: */*\r\nConnection: close\r\n\r\n",
        target,
        host_header,
        env!("CARGO_PKG_VERSION")
    );

    let mut buf = Vec::with_capacity(8 * 1024);
    Ok(work(move || {
        let mut stream = TcpStream::connect(&addrs[..])?;
        stream.write_all(request.as_bytes())?;
        buf.clear();
        stream.read_to_end(&mut buf)?;
        Ok(())
    }))
}
