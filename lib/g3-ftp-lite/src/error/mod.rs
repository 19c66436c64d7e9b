/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

mod addr;
mod command;
mod connect;
mod pasv;
mod reply;
mod response;
mod session;
mod transfer;

pub use addr::FtpAddrError;
pub use command::FtpCommandError;
pub use connect::FtpConnectError;
pub use pasv::FtpPassiveReplyError;
pub use reply::FtpReplyCodeError;
pub use response::FtpRawResponseError;
pub use session::{FtpSessionCloseError, FtpSessionOpenError};
pub use transfer::{FtpTransferError, FtpTransferTypeParseError};
