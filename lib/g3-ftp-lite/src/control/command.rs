/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::fmt;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};

use super::FtpControlChannel;
use crate::error::FtpCommandError;

pub(crate) const CRLF: &[u8] = b"\r\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FtpCommand(&'static str);

impl FtpCommand {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for FtpCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! ftp_commands {
    (
        $(
            $(#[$docs:meta])*
            ($konst:ident, $phrase:expr);
        )+
    ) => {
        impl FtpCommand {
        $(
            $(#[$docs])*
            pub const $konst: FtpCommand = FtpCommand($phrase);
        )+
        }
    };
}

ftp_commands! {
    (USER, "USER");
    (PASS, "PASS");
    (QUIT, "QUIT");
    (PASV, "PASV");
    /// takes the transfer type letter as argument
    (TYPE, "TYPE");
    (RETR, "RETR");
    (STOR, "STOR");
}

impl<T> FtpControlChannel<T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    /// Send `VERB ARGUMENT<CRLF>`, or `VERB<CRLF>` if the argument is empty.
    pub(crate) async fn send_cmd(&mut self, verb: &str, arg: &str) -> Result<(), FtpCommandError> {
        if verb.contains(['\r', '\n']) || arg.contains(['\r', '\n']) {
            return Err(FtpCommandError::InvalidArgument(format!(
                "line break in command {verb}"
            )));
        }

        let mut buf: Vec<u8> = Vec::with_capacity(verb.len() + 1 + arg.len() + CRLF.len());
        buf.extend_from_slice(verb.as_bytes());
        if !arg.is_empty() {
            buf.push(b' ');
            buf.extend_from_slice(arg.as_bytes());
        }
        buf.extend_from_slice(CRLF);

        #[cfg(feature = "log-raw-io")]
        crate::debug::log_cmd(verb, arg);

        self.stream
            .write_all(&buf)
            .await
            .map_err(FtpCommandError::SendFailed)?;
        self.stream
            .flush()
            .await
            .map_err(FtpCommandError::SendFailed)
    }
}
