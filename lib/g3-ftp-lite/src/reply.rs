/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use crate::error::FtpReplyCodeError;

/// Check `actual` against the `expected` code pattern.
///
/// * `1..=9` matches the first digit only, so `2` accepts any 2xx reply
/// * `10..=99` matches the first two digits, so `22` accepts any 22x reply
/// * `100..=999` requires the exact code
///
/// Any other `expected` value never matches.
pub fn check_response_code(expected: u16, actual: u16) -> Result<(), FtpReplyCodeError> {
    let matched = match expected {
        1..=9 => actual / 100 == expected,
        10..=99 => actual / 10 == expected,
        100..=999 => actual == expected,
        _ => false,
    };
    if matched {
        Ok(())
    } else {
        Err(FtpReplyCodeError::new(expected, actual))
    }
}
