//! Central directory walk that keeps repeated entry names.
//!
//! The zip reader indexes entries by name, so a jar whose directory lists
//! the same path twice comes back with that path once. JVM class loaders
//! see every record, and duplicate detection has to count each of them.

use std::io::{self, Read, Seek, SeekFrom};

const EOCD_SIGNATURE: u32 = 0x0605_4b50;
const CEN_SIGNATURE: u32 = 0x0201_4b50;
const EOCD_LEN: usize = 22;
const CEN_HEADER_LEN: usize = 46;
const MAX_COMMENT_LEN: usize = u16::MAX as usize;

/// Every entry name of the central directory, in record order.
///
/// Returns `Ok(None)` for layouts this walk does not handle (zip64,
/// multi-disk, records that do not line up). Callers then fall back to the
/// zip reader's own listing.
///
/// Names are decoded as UTF-8, lossily.
pub(crate) fn entry_names<R: Read + Seek>(reader: &mut R) -> io::Result<Option<Vec<String>>> {
    let len = reader.seek(SeekFrom::End(0))?;
    let tail_len = len.min((EOCD_LEN + MAX_COMMENT_LEN) as u64);
    let tail_start = len - tail_len;
    reader.seek(SeekFrom::Start(tail_start))?;
    let mut tail = vec![0; tail_len as usize];
    reader.read_exact(&mut tail)?;

    let Some(eocd) = find_eocd(&tail) else {
        return Ok(None);
    };
    let record = &tail[eocd..eocd + EOCD_LEN];
    let disk = read_u16(record, 4);
    let directory_disk = read_u16(record, 6);
    let total = read_u16(record, 10);
    let directory_size = read_u32(record, 12);
    if disk != 0 || directory_disk != 0 || total == u16::MAX || directory_size == u32::MAX {
        return Ok(None);
    }

    // The directory ends where the EOCD starts, even with a prefixed stub.
    let eocd_offset = tail_start + eocd as u64;
    let Some(directory_start) = eocd_offset.checked_sub(u64::from(directory_size)) else {
        return Ok(None);
    };
    reader.seek(SeekFrom::Start(directory_start))?;
    let mut directory = vec![0; directory_size as usize];
    reader.read_exact(&mut directory)?;

    let mut names = Vec::with_capacity(usize::from(total));
    let mut pos = 0;
    for _ in 0..total {
        let Some(header) = directory.get(pos..pos + CEN_HEADER_LEN) else {
            return Ok(None);
        };
        if read_u32(header, 0) != CEN_SIGNATURE {
            return Ok(None);
        }
        let name_len = usize::from(read_u16(header, 28));
        let extra_len = usize::from(read_u16(header, 30));
        let comment_len = usize::from(read_u16(header, 32));

        let name_start = pos + CEN_HEADER_LEN;
        let Some(name) = directory.get(name_start..name_start + name_len) else {
            return Ok(None);
        };
        names.push(String::from_utf8_lossy(name).into_owned());
        pos = name_start + name_len + extra_len + comment_len;
    }

    Ok(Some(names))
}

/// Offset of the end-of-central-directory record within `tail`.
fn find_eocd(tail: &[u8]) -> Option<usize> {
    let last = tail.len().checked_sub(EOCD_LEN)?;
    (0..=last).rev().find(|&pos| {
        read_u32(tail, pos) == EOCD_SIGNATURE
            && pos + EOCD_LEN + usize::from(read_u16(tail, pos + 20)) == tail.len()
    })
}

fn read_u16(buf: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([buf[at], buf[at + 1]])
}

fn read_u32(buf: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
}
