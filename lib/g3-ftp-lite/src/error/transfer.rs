/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::io;
use std::path::Path;

use thiserror::Error;

use super::{FtpCommandError, FtpPassiveReplyError, FtpReplyCodeError};
use crate::control::FtpCommand;
use crate::transfer::FtpTransferType;

#[derive(Debug, Error)]
#[error("invalid transfer type '{0}'")]
pub struct FtpTransferTypeParseError(pub(crate) String);

#[derive(Debug, Error)]
pub enum FtpTransferError {
    #[error("raw command error: {0}")]
    RawCommandError(#[from] FtpCommandError),
    #[error("cannot set PASV: {0}")]
    PassiveModeRejected(FtpReplyCodeError),
    #[error("invalid PASV reply: {0}")]
    InvalidPassiveReply(#[from] FtpPassiveReplyError),
    #[error("cannot set TYPE {0}: {1}")]
    TransferTypeRejected(FtpTransferType, FtpReplyCodeError),
    #[error("command {0} rejected: {1}")]
    TransferRejected(FtpCommand, FtpReplyCodeError),
    #[error("couldn't connect to server data port {0}: {1:?}")]
    DataConnectFailed(String, io::Error),
    #[error("timed out to connect to server data port {0}")]
    DataConnectTimedOut(String),
    #[error("data channel read failed: {0:?}")]
    DataReadFailed(io::Error),
    #[error("data channel write failed: {0:?}")]
    DataWriteFailed(io::Error),
    #[error("cannot open local file '{0}': {1:?}")]
    LocalFileOpenFailed(String, io::Error),
    #[error("local file '{0}' io failed: {1:?}")]
    LocalFileIoFailed(String, io::Error),
    #[error("local io failed: {0:?}")]
    LocalIoFailed(io::Error),
    #[error("transfer of command {0} not completed: {1}")]
    EndReplyRejected(FtpCommand, FtpReplyCodeError),
}

impl FtpTransferError {
    pub(crate) fn with_local_path(self, path: &Path) -> Self {
        match self {
            FtpTransferError::LocalIoFailed(e) => {
                FtpTransferError::LocalFileIoFailed(path.display().to_string(), e)
            }
            e => e,
        }
    }
}
