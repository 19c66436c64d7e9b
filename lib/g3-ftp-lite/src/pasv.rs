/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::str::FromStr;

use crate::error::FtpPassiveReplyError;

const PORT_TUPLE_FIELDS: usize = 6;

/// Find the first `h1,h2,h3,h4,p1,p2` tuple in the line.
fn find_port_tuple(line: &str) -> Option<[&str; PORT_TUPLE_FIELDS]> {
    let bytes = line.as_bytes();
    let digits_end = |pos: usize| {
        pos + bytes[pos..]
            .iter()
            .take_while(|c| c.is_ascii_digit())
            .count()
    };

    let mut start = 0;
    while start < bytes.len() {
        if !bytes[start].is_ascii_digit() {
            start += 1;
            continue;
        }

        let mut fields = [""; PORT_TUPLE_FIELDS];
        let mut count = 0;
        let mut pos = start;
        loop {
            let end = digits_end(pos);
            fields[count] = &line[pos..end];
            count += 1;
            if count == PORT_TUPLE_FIELDS {
                return Some(fields);
            }
            if end + 1 < bytes.len() && bytes[end] == b',' && bytes[end + 1].is_ascii_digit() {
                pos = end + 1;
            } else {
                break;
            }
        }

        start = digits_end(start);
    }

    None
}

/// Extract the data port from the text of a PASV reply.
///
/// The first four numbers of the tuple are the server IPv4 address and are not
/// used, the data connection always goes to the control connection host.
pub fn extract_data_port(line: &str) -> Result<u16, FtpPassiveReplyError> {
    let line = line.trim_end();
    let Some(fields) = find_port_tuple(line) else {
        return Err(FtpPassiveReplyError::NoDataPort(line.to_string()));
    };

    let parse_field = |s: &str| {
        u8::from_str(s)
            .map_err(|_| FtpPassiveReplyError::InvalidPortField(s.to_string(), line.to_string()))
    };
    let p1 = parse_field(fields[4])?;
    let p2 = parse_field(fields[5])?;

    let port = ((p1 as u16) << 8) + (p2 as u16);
    if port == 0 {
        return Err(FtpPassiveReplyError::ZeroDataPort(line.to_string()));
    }
    Ok(port)
}
