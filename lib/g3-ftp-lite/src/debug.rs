/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use log::Level;

const FTP_DEBUG_LOG_LEVEL: Level = Level::Debug;
const FTP_DEBUG_LOG_TARGET: &str = "g3_ftp_lite::raw_io";

#[inline]
pub(crate) fn log_cmd(verb: &str, arg: &str) {
    if arg.is_empty() {
        log::log!(target: FTP_DEBUG_LOG_TARGET, FTP_DEBUG_LOG_LEVEL, "> {verb}");
    } else if verb.eq_ignore_ascii_case("PASS") {
        log::log!(target: FTP_DEBUG_LOG_TARGET, FTP_DEBUG_LOG_LEVEL, "> {verb} ****");
    } else {
        log::log!(target: FTP_DEBUG_LOG_TARGET, FTP_DEBUG_LOG_LEVEL, "> {verb} {arg}");
    }
}

#[inline]
pub(crate) fn log_rsp(rsp: &str) {
    log::log!(target: FTP_DEBUG_LOG_TARGET, FTP_DEBUG_LOG_LEVEL, "< {rsp}");
}
