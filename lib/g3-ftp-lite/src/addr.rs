/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::fmt;
use std::net::{IpAddr, Ipv6Addr, SocketAddr};
use std::str::FromStr;

use crate::error::FtpAddrError;

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum FtpHost {
    Ip(IpAddr),
    Domain(String),
}

impl fmt::Display for FtpHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FtpHost::Ip(ip) => write!(f, "{ip}"),
            FtpHost::Domain(domain) => write!(f, "{domain}"),
        }
    }
}

/// Server address with a mandatory port.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct FtpServerAddr {
    host: FtpHost,
    port: u16,
}

impl FtpServerAddr {
    pub fn new(host: FtpHost, port: u16) -> Self {
        FtpServerAddr { host, port }
    }

    #[inline]
    pub fn host(&self) -> &FtpHost {
        &self.host
    }

    #[inline]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// The same host with another port, used for passive data connections.
    pub(crate) fn with_port(&self, port: u16) -> Self {
        FtpServerAddr {
            host: self.host.clone(),
            port,
        }
    }
}

impl fmt::Display for FtpServerAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.host {
            FtpHost::Ip(IpAddr::V6(ip6)) => write!(f, "[{ip6}]:{}", self.port),
            host => write!(f, "{host}:{}", self.port),
        }
    }
}

impl From<SocketAddr> for FtpServerAddr {
    fn from(addr: SocketAddr) -> Self {
        FtpServerAddr::new(FtpHost::Ip(addr.ip()), addr.port())
    }
}

fn parse_port(s: &str) -> Result<u16, FtpAddrError> {
    match u16::from_str(s) {
        Ok(0) | Err(_) => Err(FtpAddrError::InvalidPort(s.to_string())),
        Ok(port) => Ok(port),
    }
}

impl FromStr for FtpServerAddr {
    type Err = FtpAddrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(FtpAddrError::BlankHost);
        }

        if let Ok(addr) = SocketAddr::from_str(s) {
            if addr.port() == 0 {
                return Err(FtpAddrError::InvalidPort("0".to_string()));
            }
            return Ok(addr.into());
        }

        if let Some(bracketed) = s.strip_prefix('[') {
            return match bracketed.rsplit_once("]:") {
                Some((ip, port)) => {
                    let ip6 = Ipv6Addr::from_str(ip)
                        .map_err(|_| FtpAddrError::InvalidHost(ip.to_string()))?;
                    let port = parse_port(port)?;
                    Ok(FtpServerAddr::new(FtpHost::Ip(IpAddr::V6(ip6)), port))
                }
                None if bracketed.ends_with(']') => Err(FtpAddrError::MissingPort),
                None => Err(FtpAddrError::InvalidHost(s.to_string())),
            };
        }

        if IpAddr::from_str(s).is_ok() {
            // a bare ipv6 address is full of colons but has no port
            return Err(FtpAddrError::MissingPort);
        }

        let Some((host, port)) = s.rsplit_once(':') else {
            return Err(FtpAddrError::MissingPort);
        };
        if host.is_empty() {
            return Err(FtpAddrError::BlankHost);
        }
        if host.contains([':', '[', ']']) || host.contains(char::is_whitespace) {
            return Err(FtpAddrError::InvalidHost(host.to_string()));
        }
        let port = parse_port(port)?;
        let host = match IpAddr::from_str(host) {
            Ok(ip) => FtpHost::Ip(ip),
            Err(_) => FtpHost::Domain(host.to_string()),
        };
        Ok(FtpServerAddr::new(host, port))
    }
}
