/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::str::FromStr;
use std::sync::Arc;

use log::debug;

use crate::control::{FtpCommand, FtpControlChannel, FtpResponse};
use crate::error::{FtpCommandError, FtpConnectError, FtpSessionCloseError, FtpSessionOpenError};
use crate::{
    FtpClientConfig, FtpConnectionProvider, FtpServerAddr, TcpConnectionProvider,
    check_response_code,
};

/// A logged in (or about to log in) control connection.
///
/// All methods take `&mut self`, so there is never more than one command in
/// flight on the control channel, and at most one data connection.
pub struct FtpSession<CP: FtpConnectionProvider = TcpConnectionProvider> {
    pub(crate) config: Arc<FtpClientConfig>,
    pub(crate) provider: CP,
    pub(crate) server: FtpServerAddr,
    pub(crate) control: Option<FtpControlChannel<CP::Stream>>,
}

impl FtpSession<TcpConnectionProvider> {
    /// Connect to `host:port` with the default config.
    ///
    /// The port is mandatory, an address without one is rejected before any
    /// network io.
    pub async fn connect(address: &str) -> Result<Self, FtpConnectError> {
        FtpSession::connect_with(
            address,
            TcpConnectionProvider::default(),
            Arc::new(FtpClientConfig::default()),
        )
        .await
    }
}

impl<CP: FtpConnectionProvider> FtpSession<CP> {
    pub async fn connect_with(
        address: &str,
        provider: CP,
        config: Arc<FtpClientConfig>,
    ) -> Result<Self, FtpConnectError> {
        let server = FtpServerAddr::from_str(address)?;
        FtpSession::connect_to(server, provider, config).await
    }

    pub async fn connect_to(
        server: FtpServerAddr,
        mut provider: CP,
        config: Arc<FtpClientConfig>,
    ) -> Result<Self, FtpConnectError> {
        let connect = provider.new_control_connection(&server);
        let r = match config.connect_timeout {
            Some(timeout) => tokio::time::timeout(timeout, connect)
                .await
                .map_err(|_| FtpConnectError::ConnectTimedOut)?,
            None => connect.await,
        };
        let stream = r.map_err(|e| FtpConnectError::ConnectIoError(server.to_string(), e))?;

        let mut control = FtpControlChannel::new(stream, config.control.clone());
        let r = match config.greeting_timeout {
            Some(timeout) => tokio::time::timeout(timeout, control.wait_greetings())
                .await
                .map_err(|_| FtpConnectError::GreetingTimedOut)?,
            None => control.wait_greetings().await,
        };
        let greeting = r.map_err(FtpConnectError::GreetingFailed)?;
        check_response_code(2, greeting.code()).map_err(FtpConnectError::GreetingRejected)?;
        debug!("connected to ftp server {server}, greeting code {}", greeting.code());

        Ok(FtpSession {
            config,
            provider,
            server,
            control: Some(control),
        })
    }

    #[inline]
    pub fn server(&self) -> &FtpServerAddr {
        &self.server
    }

    /// Whether the control channel has been closed by [`FtpSession::logout`].
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.control.is_none()
    }

    pub(crate) fn control_mut(
        &mut self,
    ) -> Result<&mut FtpControlChannel<CP::Stream>, FtpCommandError> {
        self.control.as_mut().ok_or(FtpCommandError::SessionClosed)
    }

    /// Send `VERB ARGUMENT` and read the whole reply.
    ///
    /// The reply code is not checked, use [`check_response_code`] on it.
    pub async fn command(&mut self, verb: &str, arg: &str) -> Result<FtpResponse, FtpCommandError> {
        self.control_mut()?.exchange(verb, arg, "raw command").await
    }

    /// Send USER then PASS.
    ///
    /// USER must be answered with 2xx or 3xx, and PASS with 2xx.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), FtpSessionOpenError> {
        if username.is_empty() {
            return Err(FtpSessionOpenError::BlankUsername);
        }
        if password.is_empty() {
            return Err(FtpSessionOpenError::BlankPassword);
        }

        let control = self.control_mut()?;

        let reply = control
            .exchange(FtpCommand::USER.as_str(), username, "send username")
            .await?;
        if check_response_code(2, reply.code()).is_err() {
            check_response_code(3, reply.code()).map_err(FtpSessionOpenError::UserRejected)?;
        }

        let reply = control
            .exchange(FtpCommand::PASS.as_str(), password, "send password")
            .await?;
        check_response_code(2, reply.code()).map_err(FtpSessionOpenError::PasswordRejected)?;

        debug!("logged in to ftp server {} as {username}", self.server);
        Ok(())
    }

    /// Send QUIT and close the control channel.
    ///
    /// The channel is kept open if QUIT fails, so the caller may retry. It is
    /// released even if the close itself fails.
    pub async fn logout(&mut self) -> Result<(), FtpSessionCloseError> {
        let control = self.control_mut()?;
        let reply = control
            .exchange(FtpCommand::QUIT.as_str(), "", "send quit")
            .await?;
        check_response_code(2, reply.code()).map_err(FtpSessionCloseError::QuitRejected)?;

        if let Some(control) = self.control.take() {
            control.close().await.map_err(FtpSessionCloseError::CloseFailed)?;
        }
        debug!("logged out from ftp server {}", self.server);
        Ok(())
    }
}
