/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

mod addr;
mod config;
mod connection;
mod control;
mod error;
mod io_ext;
mod pasv;
mod reply;
mod session;
mod transfer;

#[cfg(feature = "log-raw-io")]
mod debug;

pub use addr::{FtpHost, FtpServerAddr};
pub use config::{FtpClientConfig, FtpControlConfig, FtpTransferConfig};
pub use connection::{FtpConnectionProvider, TcpConnectionProvider};
pub use control::{FtpCommand, FtpResponse};
pub use error::*;
pub use pasv::extract_data_port;
pub use reply::check_response_code;
pub use session::FtpSession;
pub use transfer::{FtpTransferStage, FtpTransferType};
