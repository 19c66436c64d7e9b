/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use thiserror::Error;

/// A reply code that does not match the expected code pattern.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("bad response from server, expected: {expected}, got: {actual}")]
pub struct FtpReplyCodeError {
    expected: u16,
    actual: u16,
}

impl FtpReplyCodeError {
    pub(crate) fn new(expected: u16, actual: u16) -> Self {
        FtpReplyCodeError { expected, actual }
    }

    #[inline]
    pub fn expected(&self) -> u16 {
        self.expected
    }

    #[inline]
    pub fn actual(&self) -> u16 {
        self.actual
    }
}
