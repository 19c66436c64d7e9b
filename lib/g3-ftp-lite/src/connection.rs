/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::io;
use std::net::SocketAddr;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;

use crate::{FtpHost, FtpServerAddr};

#[async_trait]
pub trait FtpConnectionProvider: Send {
    type Stream: AsyncRead + AsyncWrite + Unpin + Send;

    async fn new_control_connection(&mut self, server: &FtpServerAddr) -> io::Result<Self::Stream>;

    /// `server` is the control connection host with the passive data port.
    async fn new_data_connection(&mut self, server: &FtpServerAddr) -> io::Result<Self::Stream>;
}

/// Plain TCP connections, resolving domain names with the system resolver.
#[derive(Debug, Default)]
pub struct TcpConnectionProvider {}

async fn tcp_connect(server: &FtpServerAddr) -> io::Result<TcpStream> {
    match server.host() {
        FtpHost::Ip(ip) => TcpStream::connect(SocketAddr::new(*ip, server.port())).await,
        FtpHost::Domain(domain) => TcpStream::connect((domain.as_str(), server.port())).await,
    }
}

#[async_trait]
impl FtpConnectionProvider for TcpConnectionProvider {
    type Stream = TcpStream;

    async fn new_control_connection(&mut self, server: &FtpServerAddr) -> io::Result<TcpStream> {
        tcp_connect(server).await
    }

    async fn new_data_connection(&mut self, server: &FtpServerAddr) -> io::Result<TcpStream> {
        tcp_connect(server).await
    }
}
