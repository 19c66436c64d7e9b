/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FtpAddrError {
    #[error("host can not be blank")]
    BlankHost,
    #[error("host must have a port, e.g. host:21")]
    MissingPort,
    #[error("invalid port '{0}'")]
    InvalidPort(String),
    #[error("invalid host '{0}'")]
    InvalidHost(String),
}
