/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::time::Duration;

use log::{debug, warn};
use tokio::io::{AsyncRead, AsyncWrite};

use super::FtpControlChannel;
use crate::error::FtpRawResponseError;
use crate::io_ext::LimitedBufReadExt;

/// One reply read from the control channel.
///
/// The message keeps every received line, including the line terminators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FtpResponse {
    code: u16,
    message: String,
}

impl FtpResponse {
    #[inline]
    pub fn code(&self) -> u16 {
        self.code
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.message.lines()
    }

    #[inline]
    pub fn is_preliminary(&self) -> bool {
        self.code / 100 == 1
    }
}

/// Get the reply code if this line ends a reply.
///
/// A final line starts with three digits followed by a space. A bare code with
/// no text is accepted as well.
fn final_line_code(line: &[u8]) -> Option<u16> {
    if line.len() < 4 {
        return None;
    }
    match line[3] {
        b' ' | b'\r' | b'\n' => {}
        _ => return None,
    }

    let mut code = 0u16;
    for c in &line[..3] {
        if !c.is_ascii_digit() {
            return None;
        }
        code = code * 10 + (c - b'0') as u16;
    }
    Some(code)
}

impl<T> FtpControlChannel<T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    async fn read_line(&mut self, buf: &mut Vec<u8>) -> Result<(), FtpRawResponseError> {
        buf.clear();

        let (found, len) = self
            .stream
            .limited_read_until(b'\n', self.config.max_line_len, buf)
            .await
            .map_err(FtpRawResponseError::ReadFailed)?;

        #[cfg(feature = "log-raw-io")]
        if len > 0 {
            crate::debug::log_rsp(String::from_utf8_lossy(buf).trim_end());
        }

        match len {
            0 => Err(FtpRawResponseError::ConnectionClosed),
            _ if found => Ok(()),
            n if n >= self.config.max_line_len => Err(FtpRawResponseError::LineTooLong),
            // end of stream in the middle of a line
            _ => Err(FtpRawResponseError::ConnectionClosed),
        }
    }

    pub(crate) async fn read_response(&mut self) -> Result<FtpResponse, FtpRawResponseError> {
        let mut buf = Vec::<u8>::with_capacity(self.config.max_line_len);
        let mut message = String::new();

        for _i in 0..self.config.max_multi_lines {
            self.read_line(&mut buf).await?;
            let line = std::str::from_utf8(&buf).map_err(|_| FtpRawResponseError::LineIsNotUtf8)?;
            message.push_str(line);

            if let Some(code) = final_line_code(&buf) {
                if !(1..=5).contains(&(code / 100)) {
                    return Err(FtpRawResponseError::InvalidReplyCode(code));
                }
                return Ok(FtpResponse { code, message });
            }
        }

        Err(FtpRawResponseError::TooManyLines)
    }

    pub(crate) async fn timed_read_response(
        &mut self,
        stage: &'static str,
    ) -> Result<FtpResponse, FtpRawResponseError> {
        match self.config.command_timeout {
            Some(timeout) => match tokio::time::timeout(timeout, self.read_response()).await {
                Ok(r) => r,
                Err(_) => Err(FtpRawResponseError::ReadResponseTimedOut(stage)),
            },
            None => self.read_response().await,
        }
    }

    /// Skip `120` replies and return the first real greeting.
    pub(crate) async fn wait_greetings(&mut self) -> Result<FtpResponse, FtpRawResponseError> {
        loop {
            let reply = self.read_response().await?;
            if reply.code() == 120 {
                continue;
            }
            return Ok(reply);
        }
    }

    /// Consume the pending reply of an aborted transfer.
    ///
    /// Errors are only logged, the caller already has the error to report.
    pub(crate) async fn drain_transfer_reply(&mut self, wait: Duration) {
        let drain = async {
            loop {
                let reply = self.read_response().await?;
                if !reply.is_preliminary() {
                    return Ok::<_, FtpRawResponseError>(reply);
                }
            }
        };

        match tokio::time::timeout(wait, drain).await {
            Ok(Ok(reply)) => debug!("drained reply {} of aborted transfer", reply.code()),
            Ok(Err(e)) => warn!("failed to drain reply of aborted transfer: {e}"),
            Err(_) => warn!("timed out to drain reply of aborted transfer"),
        }
    }
}
