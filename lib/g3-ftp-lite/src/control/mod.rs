/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::io;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufStream};

use crate::FtpControlConfig;
use crate::error::FtpCommandError;

mod response;
pub use response::FtpResponse;

mod command;
pub use command::FtpCommand;

pub(crate) struct FtpControlChannel<T>
where
    T: AsyncRead + AsyncWrite,
{
    config: FtpControlConfig,
    stream: BufStream<T>,
}

impl<T> FtpControlChannel<T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    pub(crate) fn new(stream: T, config: FtpControlConfig) -> Self {
        FtpControlChannel {
            config,
            stream: BufStream::new(stream),
        }
    }

    /// Send one command and wait for its final reply.
    pub(crate) async fn exchange(
        &mut self,
        verb: &str,
        arg: &str,
        stage: &'static str,
    ) -> Result<FtpResponse, FtpCommandError> {
        self.send_cmd(verb, arg).await?;
        let reply = self.timed_read_response(stage).await?;
        Ok(reply)
    }

    pub(crate) async fn close(mut self) -> io::Result<()> {
        self.stream.shutdown().await
    }
}
