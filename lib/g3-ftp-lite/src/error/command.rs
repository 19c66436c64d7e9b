/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::io;

use thiserror::Error;

use super::FtpRawResponseError;

#[derive(Debug, Error)]
pub enum FtpCommandError {
    #[error("session already closed")]
    SessionClosed,
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("unable to send command: {0:?}")]
    SendFailed(io::Error),
    #[error("unable to recv reply: {0}")]
    RecvFailed(#[from] FtpRawResponseError),
}
