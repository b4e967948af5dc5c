//! `Range` header parsing shared by the in-memory transport and the test server.

/// Parse a single `bytes=<start>-[<end>]` range against a resource of `len` bytes.
///
/// Returns the inclusive `(start, end)` pair, with `end` capped to the last byte.
/// `None` means the range is malformed or unsatisfiable.
pub fn parse_range(header: &str, len: u64) -> Option<(u64, u64)> {
    let spec = header.trim().strip_prefix("bytes=")?;
    let (start, end) = spec.split_once('-')?;
    let start: u64 = start.trim().parse().ok()?;
    if start >= len {
        return None;
    }
    let end = match end.trim() {
        "" => len - 1,
        end => end.parse::<u64>().ok()?.min(len - 1),
    };
    (start <= end).then_some((start, end))
}
