//! QTC container writer: magic line, metadata comments, raw bit payload.

use chrono::Local;

use crate::constants::QTC_MAGIC;

/// Wraps an encoded payload (the `levels` byte plus the packed body) in a
/// `Q1` container.
///
/// The header carries two comment lines: the compression date and the
/// compression rate, both produced at write time. The rate compares the
/// body bits (the `levels` byte is not counted) against the `W²·8` bits of
/// the source raster.
pub fn write_container(payload: &[u8], levels: usize) -> Vec<u8> {
    let rate = compression_rate(payload.len(), levels);
    let date = Local::now().format("%a %b %e %H:%M:%S %Y");

    let mut out = Vec::with_capacity(payload.len() + 96);
    out.extend_from_slice(QTC_MAGIC);
    out.push(b'\n');
    out.extend_from_slice(format!("# Compression date : {date}\n").as_bytes());
    out.extend_from_slice(format!("# Compression rate {rate:.2}%\n").as_bytes());
    out.extend_from_slice(payload);
    tracing::debug!(bytes = payload.len(), rate, "container written");
    out
}

fn compression_rate(payload_bytes: usize, levels: usize) -> f64 {
    let source_bits = (1usize << (2 * levels)) * 8;
    let body_bits = payload_bytes * 8 - 8;
    100.0 * body_bits as f64 / source_bits as f64
}
