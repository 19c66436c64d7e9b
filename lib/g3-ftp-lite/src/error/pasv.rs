/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FtpPassiveReplyError {
    #[error("cannot find data port in server output: {0}")]
    NoDataPort(String),
    #[error("invalid port field '{0}' in server output: {1}")]
    InvalidPortField(String, String),
    #[error("zero data port in server output: {0}")]
    ZeroDataPort(String),
}
