//! Illustrative external caller: decodes an HTTP `Authorization: Basic`
//! header into pool-backed scratch memory.
//!
//! This is not part of the crate's public surface — it demonstrates the
//! consumer contract described for the pool: allocate from the head end,
//! write into it, leave it for the request's lifetime, and let the server
//! reclaim it on the next reset. A persistent per-connection identifier is
//! allocated from the tail end so it survives resets that only discard
//! request scratch.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use nebula_pool::{Pool, PoolConfig};

/// Decodes a `Basic <base64>` header value into pool-backed memory.
///
/// Returns `None` if the header isn't well-formed `Basic` auth or the pool
/// has no room left for the decoded credentials.
fn decode_basic_auth<'a>(pool: &'a Pool, header: &str) -> Option<&'a [u8]> {
    let encoded = header.strip_prefix("Basic ")?;
    let decoded = STANDARD.decode(encoded).ok()?;

    let block = pool.allocate(decoded.len(), false).ok()?;
    // SAFETY: `block` was just allocated with exactly `decoded.len()`
    // logical bytes (the pool rounds the backing region up, never down).
    unsafe {
        std::ptr::copy_nonoverlapping(decoded.as_ptr(), block.as_ptr(), decoded.len());
        Some(std::slice::from_raw_parts(block.as_ptr(), decoded.len()))
    }
}

fn main() {
    #[cfg(feature = "logging")]
    tracing_subscriber::fmt::init();

    let pool = Pool::new(64 * 1024, PoolConfig::default()).expect("pool creation");

    // A persistent connection id, allocated from the tail end: it outlives
    // every per-request reset that only names a head-end `keep` block.
    let conn_id = pool.allocate(8, true).expect("tail reservation");
    unsafe {
        std::ptr::copy_nonoverlapping(b"conn-042".as_ptr(), conn_id.as_ptr(), 8);
    }

    let header = "Basic dXNlcjpzd29yZGZpc2g=";
    match decode_basic_auth(&pool, header) {
        Some(credentials) => {
            println!("decoded {} bytes of credentials", credentials.len());
            if let Ok(text) = std::str::from_utf8(credentials) {
                println!("{text}");
            }
        },
        None => println!("no credentials decoded"),
    }

    let conn_bytes = unsafe { std::slice::from_raw_parts(conn_id.as_ptr(), 8) };
    println!("connection id: {}", String::from_utf8_lossy(conn_bytes));

    // A server reclaims the request's scratch for the next cycle by
    // resetting without naming a block to keep. Reset also releases
    // tail-end reservations (including conn_id above) — a real server
    // would re-issue persistent reservations per connection after this.
    unsafe {
        pool.reset(None, 0, 0).expect("reset");
    }
}
