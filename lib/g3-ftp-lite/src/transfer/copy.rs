/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::io;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

pub(crate) enum FtpDataCopyError {
    ReadFailed(io::Error),
    WriteFailed(io::Error),
}

/// Copy until `reader` reaches end of stream, one buffer at a time.
///
/// Every chunk is fully written before the next read, and `writer` is flushed
/// at the end.
pub(crate) async fn copy_in_chunks<R, W>(
    reader: &mut R,
    writer: &mut W,
    buf_size: usize,
) -> Result<u64, FtpDataCopyError>
where
    R: AsyncRead + Unpin + ?Sized,
    W: AsyncWrite + Unpin + ?Sized,
{
    let mut buf = vec![0u8; buf_size];
    let mut total: u64 = 0;
    loop {
        let nr = reader
            .read(&mut buf)
            .await
            .map_err(FtpDataCopyError::ReadFailed)?;
        if nr == 0 {
            writer.flush().await.map_err(FtpDataCopyError::WriteFailed)?;
            return Ok(total);
        }
        writer
            .write_all(&buf[..nr])
            .await
            .map_err(FtpDataCopyError::WriteFailed)?;
        total += nr as u64;
    }
}
