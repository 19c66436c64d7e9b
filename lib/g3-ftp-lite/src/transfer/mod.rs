/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::fmt;
use std::future::Future;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use log::debug;
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::control::{FtpCommand, FtpControlChannel};
use crate::error::{
    FtpCommandError, FtpRawResponseError, FtpReplyCodeError, FtpTransferError,
    FtpTransferTypeParseError,
};
use crate::{FtpConnectionProvider, FtpSession, check_response_code, extract_data_port};

mod copy;
use copy::{FtpDataCopyError, copy_in_chunks};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FtpTransferType {
    Ascii,
    #[default]
    Image,
}

impl FtpTransferType {
    /// The argument of the TYPE command.
    pub fn as_str(&self) -> &'static str {
        match self {
            FtpTransferType::Ascii => "A",
            FtpTransferType::Image => "I",
        }
    }
}

impl fmt::Display for FtpTransferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FtpTransferType {
    type Err = FtpTransferTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "a" | "ascii" => Ok(FtpTransferType::Ascii),
            "i" | "image" | "binary" => Ok(FtpTransferType::Image),
            _ => Err(FtpTransferTypeParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FtpTransferStage {
    Idle,
    PassiveRequested,
    PassiveConfirmed,
    TypeRequested,
    TypeConfirmed,
    CommandSent,
    DataConnected,
    Streaming,
    Closed,
}

impl FtpTransferStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            FtpTransferStage::Idle => "idle",
            FtpTransferStage::PassiveRequested => "passive requested",
            FtpTransferStage::PassiveConfirmed => "passive confirmed",
            FtpTransferStage::TypeRequested => "type requested",
            FtpTransferStage::TypeConfirmed => "type confirmed",
            FtpTransferStage::CommandSent => "command sent",
            FtpTransferStage::DataConnected => "data connected",
            FtpTransferStage::Streaming => "streaming",
            FtpTransferStage::Closed => "closed",
        }
    }
}

impl fmt::Display for FtpTransferStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[inline]
fn log_stage(cmd: FtpCommand, path: &str, stage: FtpTransferStage) {
    debug!("ftp transfer {cmd} {path}: {stage}");
}


fn retrieve_error(e: FtpDataCopyError) -> FtpTransferError {
    match e {
        FtpDataCopyError::ReadFailed(e) => FtpTransferError::DataReadFailed(e),
        FtpDataCopyError::WriteFailed(e) => FtpTransferError::LocalIoFailed(e),
    }
}

fn store_error(e: FtpDataCopyError) -> FtpTransferError {
    match e {
        FtpDataCopyError::ReadFailed(e) => FtpTransferError::LocalIoFailed(e),
        FtpDataCopyError::WriteFailed(e) => FtpTransferError::DataWriteFailed(e),
    }
}

/// Run the data copy while waiting for the reply of RETR or STOR.
///
/// Servers may send a 1xx reply before the data, a 2xx reply at once, or no
/// reply at all until the data connection is closed, so neither side may block
/// the other. The reply future is never cancelled once the copy has succeeded.
async fn wait_transfer<T, F>(
    control: &mut FtpControlChannel<T>,
    cmd: FtpCommand,
    copy: F,
    end_wait: Duration,
) -> Result<u64, FtpTransferError>
where
    T: AsyncRead + AsyncWrite + Unpin,
    F: Future<Output = Result<u64, FtpTransferError>>,
{
    let (first, copied) = {
        let read = control.timed_read_response("wait transfer reply");
        tokio::pin!(read);
        tokio::pin!(copy);

        tokio::select! {
            r = &mut read => {
                let accepted = matches!(
                    &r,
                    Ok(reply) if reply.is_preliminary() || reply.code() / 100 == 2
                );
                if accepted {
                    let c = copy.await;
                    (r, Some(c))
                } else {
                    // rejected, the data connection is abandoned
                    (r, None)
                }
            }
            c = &mut copy => {
                if c.is_ok() {
                    (read.await, Some(c))
                } else {
                    let r = match tokio::time::timeout(end_wait, read).await {
                        Ok(r) => r,
                        Err(_) => Err(FtpRawResponseError::ReadResponseTimedOut(
                            "wait transfer reply",
                        )),
                    };
                    (r, Some(c))
                }
            }
        }
    };

    let Some(copied) = copied else {
        let reply = first.map_err(FtpCommandError::RecvFailed)?;
        return Err(FtpTransferError::TransferRejected(
            cmd,
            FtpReplyCodeError::new(1, reply.code()),
        ));
    };

    match copied {
        Ok(n) => {
            let mut reply = first.map_err(FtpCommandError::RecvFailed)?;
            if !reply.is_preliminary() {
                check_response_code(2, reply.code())
                    .map_err(|e| FtpTransferError::TransferRejected(cmd, e))?;
                return Ok(n);
            }
            while reply.is_preliminary() {
                reply = control
                    .timed_read_response("wait transfer end")
                    .await
                    .map_err(FtpCommandError::RecvFailed)?;
            }
            check_response_code(2, reply.code())
                .map_err(|e| FtpTransferError::EndReplyRejected(cmd, e))?;
            Ok(n)
        }
        Err(e) => {
            // only a preliminary reply leaves the final one pending
            if matches!(&first, Ok(reply) if reply.is_preliminary()) {
                control.drain_transfer_reply(end_wait).await;
            }
            Err(e)
        }
    }
}

impl<CP: FtpConnectionProvider> FtpSession<CP> {
    /// Negotiate the data port, send RETR or STOR and open the data connection.
    ///
    /// The reply of the command is left on the control channel.
    async fn start_transfer(
        &mut self,
        cmd: FtpCommand,
        path: &str,
        transfer_type: FtpTransferType,
    ) -> Result<CP::Stream, FtpTransferError> {
        let Some(control) = self.control.as_mut() else {
            return Err(FtpCommandError::SessionClosed.into());
        };
        if path.is_empty() {
            return Err(FtpCommandError::InvalidArgument("empty remote path".to_string()).into());
        }
        log_stage(cmd, path, FtpTransferStage::Idle);

        log_stage(cmd, path, FtpTransferStage::PassiveRequested);
        let reply = control
            .exchange(FtpCommand::PASV.as_str(), "", "enter passive mode")
            .await?;
        if let Err(e) = check_response_code(2, reply.code()) {
            log_stage(cmd, path, FtpTransferStage::Closed);
            return Err(FtpTransferError::PassiveModeRejected(e));
        }
        let port = extract_data_port(reply.message())?;
        log_stage(cmd, path, FtpTransferStage::PassiveConfirmed);

        log_stage(cmd, path, FtpTransferStage::TypeRequested);
        let reply = control
            .exchange(
                FtpCommand::TYPE.as_str(),
                transfer_type.as_str(),
                "set transfer type",
            )
            .await?;
        if let Err(e) = check_response_code(2, reply.code()) {
            log_stage(cmd, path, FtpTransferStage::Closed);
            return Err(FtpTransferError::TransferTypeRejected(transfer_type, e));
        }
        log_stage(cmd, path, FtpTransferStage::TypeConfirmed);

        control.send_cmd(cmd.as_str(), path).await?;
        log_stage(cmd, path, FtpTransferStage::CommandSent);

        let data_server = self.server.with_port(port);
        let connect_failed = |e| FtpTransferError::DataConnectFailed(data_server.to_string(), e);
        let connect = self.provider.new_data_connection(&data_server);
        let r = match self.config.transfer.data_connect_timeout {
            Some(timeout) => match tokio::time::timeout(timeout, connect).await {
                Ok(r) => r.map_err(connect_failed),
                Err(_) => Err(FtpTransferError::DataConnectTimedOut(data_server.to_string())),
            },
            None => connect.await.map_err(connect_failed),
        };
        match r {
            Ok(stream) => {
                log_stage(cmd, path, FtpTransferStage::DataConnected);
                Ok(stream)
            }
            Err(e) => {
                control
                    .drain_transfer_reply(self.config.transfer.end_wait_timeout)
                    .await;
                log_stage(cmd, path, FtpTransferStage::Closed);
                Err(e)
            }
        }
    }

    async fn finish_transfer<F>(
        &mut self,
        cmd: FtpCommand,
        path: &str,
        copy: F,
    ) -> Result<u64, FtpTransferError>
    where
        F: Future<Output = Result<u64, FtpTransferError>>,
    {
        let Some(control) = self.control.as_mut() else {
            return Err(FtpCommandError::SessionClosed.into());
        };

        log_stage(cmd, path, FtpTransferStage::Streaming);
        let r = wait_transfer(control, cmd, copy, self.config.transfer.end_wait_timeout).await;
        log_stage(cmd, path, FtpTransferStage::Closed);
        if let Ok(n) = &r {
            debug!("ftp transfer {cmd} {path}: {n} bytes");
        }
        r
    }

    /// Download `remote_path` into `writer`, returning the byte count.
    pub async fn download_to<W>(
        &mut self,
        remote_path: &str,
        writer: &mut W,
        transfer_type: FtpTransferType,
    ) -> Result<u64, FtpTransferError>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let mut data = self
            .start_transfer(FtpCommand::RETR, remote_path, transfer_type)
            .await?;

        let buf_size = self.config.transfer.copy_buffer_size;
        let copy = async {
            copy_in_chunks(&mut data, writer, buf_size)
                .await
                .map_err(retrieve_error)
        };
        self.finish_transfer(FtpCommand::RETR, remote_path, copy)
            .await
    }

    /// Upload everything `reader` yields as `remote_path`, returning the byte count.
    pub async fn upload_from<R>(
        &mut self,
        reader: &mut R,
        remote_path: &str,
        transfer_type: FtpTransferType,
    ) -> Result<u64, FtpTransferError>
    where
        R: AsyncRead + Unpin + ?Sized,
    {
        let mut data = self
            .start_transfer(FtpCommand::STOR, remote_path, transfer_type)
            .await?;

        let buf_size = self.config.transfer.copy_buffer_size;
        let copy = async {
            let n = copy_in_chunks(reader, &mut data, buf_size)
                .await
                .map_err(store_error)?;
            // the server only sees end of file after the shutdown
            data.shutdown()
                .await
                .map_err(FtpTransferError::DataWriteFailed)?;
            Ok::<u64, FtpTransferError>(n)
        };
        self.finish_transfer(FtpCommand::STOR, remote_path, copy)
            .await
    }

    /// Download `remote_path` to the local file at `local_path`.
    ///
    /// The local file is created, or truncated, once the data connection
    /// yields its first chunk or ends. It is left in place if the transfer
    /// fails later.
    pub async fn download<P: AsRef<Path>>(
        &mut self,
        remote_path: &str,
        local_path: P,
        transfer_type: FtpTransferType,
    ) -> Result<(), FtpTransferError> {
        let local_path = local_path.as_ref();
        let mut data = self
            .start_transfer(FtpCommand::RETR, remote_path, transfer_type)
            .await?;

        let buf_size = self.config.transfer.copy_buffer_size;
        let copy = async {
            let mut buf = vec![0u8; buf_size];
            let nr = data
                .read(&mut buf)
                .await
                .map_err(FtpTransferError::DataReadFailed)?;
            let mut file = File::create(local_path).await.map_err(|e| {
                FtpTransferError::LocalFileOpenFailed(local_path.display().to_string(), e)
            })?;
            if nr == 0 {
                return Ok(0);
            }
            file.write_all(&buf[..nr])
                .await
                .map_err(FtpTransferError::LocalIoFailed)?;
            let n = copy_in_chunks(&mut data, &mut file, buf_size)
                .await
                .map_err(retrieve_error)?;
            Ok::<u64, FtpTransferError>(nr as u64 + n)
        };
        self.finish_transfer(FtpCommand::RETR, remote_path, copy)
            .await
            .map(|_| ())
            .map_err(|e| e.with_local_path(local_path))
    }

    /// Upload the local file at `local_path` as `remote_path`.
    ///
    /// The local file is opened before anything is sent to the server.
    pub async fn upload<P: AsRef<Path>>(
        &mut self,
        local_path: P,
        remote_path: &str,
        transfer_type: FtpTransferType,
    ) -> Result<(), FtpTransferError> {
        let local_path = local_path.as_ref();
        let mut file = File::open(local_path).await.map_err(|e| {
            FtpTransferError::LocalFileOpenFailed(local_path.display().to_string(), e)
        })?;

        self.upload_from(&mut file, remote_path, transfer_type)
            .await
            .map(|_| ())
            .map_err(|e| e.with_local_path(local_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FtpControlConfig;
    use std::io;
    use tokio_test::io::Builder;

    fn channel(stream: tokio_test::io::Mock) -> FtpControlChannel<tokio_test::io::Mock> {
        FtpControlChannel::new(stream, FtpControlConfig::default())
    }

    const END_WAIT: Duration = Duration::from_secs(1);

    #[tokio::test]
    async fn transfer_without_preliminary_reply() {
        let stream = Builder::new().read(b"226 Transfer complete\r\n").build();
        let mut control = channel(stream);

        let copy = async { Ok::<u64, FtpTransferError>(5) };
        let n = wait_transfer(&mut control, FtpCommand::STOR, copy, END_WAIT)
            .await
            .unwrap();
        assert_eq!(n, 5);
    }

    #[tokio::test]
    async fn transfer_with_preliminary_reply() {
        let stream = Builder::new()
            .read(b"150 Opening data connection\r\n")
            .read(b"226 Transfer complete\r\n")
            .build();
        let mut control = channel(stream);

        let copy = async { Ok::<u64, FtpTransferError>(11) };
        let n = wait_transfer(&mut control, FtpCommand::RETR, copy, END_WAIT)
            .await
            .unwrap();
        assert_eq!(n, 11);
    }

    #[tokio::test]
    async fn transfer_end_rejected() {
        let stream = Builder::new()
            .read(b"150 Opening data connection\r\n")
            .read(b"451 Local error\r\n")
            .build();
        let mut control = channel(stream);

        let copy = async { Ok::<u64, FtpTransferError>(0) };
        let r = wait_transfer(&mut control, FtpCommand::RETR, copy, END_WAIT).await;
        match r {
            Err(FtpTransferError::EndReplyRejected(cmd, e)) => {
                assert_eq!(cmd, FtpCommand::RETR);
                assert_eq!(e.actual(), 451);
            }
            r => panic!("unexpected result: {r:?}"),
        }
    }

    #[tokio::test]
    async fn transfer_rejected_before_data() {
        let stream = Builder::new().read(b"550 No such file\r\n").build();
        let mut control = channel(stream);

        let copy = std::future::pending::<Result<u64, FtpTransferError>>();
        let r = wait_transfer(&mut control, FtpCommand::RETR, copy, END_WAIT).await;
        match r {
            Err(FtpTransferError::TransferRejected(cmd, e)) => {
                assert_eq!(cmd, FtpCommand::RETR);
                assert_eq!(e.actual(), 550);
            }
            r => panic!("unexpected result: {r:?}"),
        }
    }

    #[tokio::test]
    async fn transfer_copy_failed() {
        let stream = Builder::new()
            .read(b"150 Opening data connection\r\n")
            .read(b"426 Connection closed; transfer aborted\r\n")
            .build();
        let mut control = channel(stream);

        let copy = async {
            Err::<u64, _>(FtpTransferError::DataWriteFailed(io::Error::other("reset")))
        };
        let r = wait_transfer(&mut control, FtpCommand::STOR, copy, END_WAIT).await;
        assert!(matches!(r, Err(FtpTransferError::DataWriteFailed(_))));
        // both replies have been consumed
        let err = control.read_response().await.unwrap_err();
        assert!(matches!(err, FtpRawResponseError::ConnectionClosed));
    }

    #[test]
    fn transfer_type() {
        assert_eq!(FtpTransferType::Ascii.as_str(), "A");
        assert_eq!(FtpTransferType::Image.to_string(), "I");
        assert_eq!(FtpTransferType::default(), FtpTransferType::Image);

        for s in ["A", "a", "ascii", "ASCII"] {
            assert_eq!(FtpTransferType::from_str(s).unwrap(), FtpTransferType::Ascii);
        }
        for s in ["I", "i", "image", "Binary"] {
            assert_eq!(FtpTransferType::from_str(s).unwrap(), FtpTransferType::Image);
        }
        for s in ["", "E", "L 8", "text"] {
            assert!(FtpTransferType::from_str(s).is_err());
        }
    }

    #[test]
    fn transfer_stage() {
        assert_eq!(FtpTransferStage::Idle.to_string(), "idle");
        assert_eq!(
            FtpTransferStage::PassiveConfirmed.to_string(),
            "passive confirmed"
        );
        assert_eq!(FtpTransferStage::Closed.as_str(), "closed");
    }
}
