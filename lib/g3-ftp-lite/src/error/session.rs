/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::io;

use thiserror::Error;

use super::{FtpCommandError, FtpReplyCodeError};

#[derive(Debug, Error)]
pub enum FtpSessionOpenError {
    #[error("user can not be blank")]
    BlankUsername,
    #[error("password can not be blank")]
    BlankPassword,
    #[error("raw command error: {0}")]
    RawCommandError(#[from] FtpCommandError),
    #[error("username rejected: {0}")]
    UserRejected(FtpReplyCodeError),
    #[error("password rejected: {0}")]
    PasswordRejected(FtpReplyCodeError),
}

#[derive(Debug, Error)]
pub enum FtpSessionCloseError {
    #[error("raw command error: {0}")]
    RawCommandError(#[from] FtpCommandError),
    #[error("quit rejected: {0}")]
    QuitRejected(FtpReplyCodeError),
    #[error("close control channel failed: {0:?}")]
    CloseFailed(io::Error),
}
