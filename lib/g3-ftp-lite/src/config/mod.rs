/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::time::Duration;

#[cfg(feature = "yaml")]
mod yaml;

const MIN_LINE_LEN: usize = 16;
const DEFAULT_COPY_BUFFER_SIZE: usize = 1024;

fn non_zero(timeout: Duration) -> Option<Duration> {
    if timeout.is_zero() { None } else { Some(timeout) }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FtpControlConfig {
    pub(crate) max_line_len: usize,
    pub(crate) max_multi_lines: usize,
    pub(crate) command_timeout: Option<Duration>,
}

impl Default for FtpControlConfig {
    fn default() -> Self {
        FtpControlConfig {
            max_line_len: 2048,
            max_multi_lines: 128,
            command_timeout: None,
        }
    }
}

impl FtpControlConfig {
    pub fn set_max_line_len(&mut self, len: usize) {
        self.max_line_len = len.max(MIN_LINE_LEN);
    }

    pub fn set_max_multi_lines(&mut self, lines: usize) {
        self.max_multi_lines = lines.max(1);
    }

    /// Zero disables the timeout.
    pub fn set_command_timeout(&mut self, timeout: Duration) {
        self.command_timeout = non_zero(timeout);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FtpTransferConfig {
    pub(crate) copy_buffer_size: usize,
    pub(crate) data_connect_timeout: Option<Duration>,
    pub(crate) end_wait_timeout: Duration,
}

impl Default for FtpTransferConfig {
    fn default() -> Self {
        FtpTransferConfig {
            copy_buffer_size: DEFAULT_COPY_BUFFER_SIZE,
            data_connect_timeout: None,
            end_wait_timeout: Duration::from_secs(5),
        }
    }
}

impl FtpTransferConfig {
    pub fn set_copy_buffer_size(&mut self, size: usize) {
        self.copy_buffer_size = size.max(1);
    }

    /// Zero disables the timeout.
    pub fn set_data_connect_timeout(&mut self, timeout: Duration) {
        self.data_connect_timeout = non_zero(timeout);
    }

    /// How long to wait for the pending reply after an aborted transfer.
    pub fn set_end_wait_timeout(&mut self, timeout: Duration) {
        self.end_wait_timeout = timeout;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FtpClientConfig {
    pub(crate) control: FtpControlConfig,
    pub(crate) transfer: FtpTransferConfig,
    pub(crate) connect_timeout: Option<Duration>,
    pub(crate) greeting_timeout: Option<Duration>,
}

impl FtpClientConfig {
    pub fn set_control(&mut self, config: FtpControlConfig) {
        self.control = config;
    }

    pub fn set_transfer(&mut self, config: FtpTransferConfig) {
        self.transfer = config;
    }

    /// Zero disables the timeout.
    pub fn set_connect_timeout(&mut self, timeout: Duration) {
        self.connect_timeout = non_zero(timeout);
    }

    /// Zero disables the timeout.
    pub fn set_greeting_timeout(&mut self, timeout: Duration) {
        self.greeting_timeout = non_zero(timeout);
    }
}
