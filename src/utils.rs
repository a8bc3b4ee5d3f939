/// RDS accepts at most this many parameters per modify request.
pub const MODIFY_BATCH_SIZE: usize = 20;

/// Splits `sequence` into consecutive runs of `chunk_size`, the last one possibly
/// shorter. Every element is delivered exactly once, in order.
///
/// Panics if `chunk_size` is 0.
pub fn chunks<T>(sequence: &[T], chunk_size: usize) -> impl Iterator<Item = &[T]> {
    sequence.chunks(chunk_size)
}
