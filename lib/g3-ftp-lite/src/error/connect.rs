/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::io;

use thiserror::Error;

use super::{FtpAddrError, FtpRawResponseError, FtpReplyCodeError};

#[derive(Debug, Error)]
pub enum FtpConnectError {
    #[error("invalid server address: {0}")]
    InvalidAddress(#[from] FtpAddrError),
    #[error("connect to {0} failed: {1:?}")]
    ConnectIoError(String, io::Error),
    #[error("timed out to connect")]
    ConnectTimedOut,
    #[error("timed out to receive greetings")]
    GreetingTimedOut,
    #[error("couldn't read the server's greetings: {0}")]
    GreetingFailed(FtpRawResponseError),
    #[error("greeting rejected: {0}")]
    GreetingRejected(FtpReplyCodeError),
}
