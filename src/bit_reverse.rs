/// Applies the bit-reversal permutation to `a` in place.
///
/// The element at index `i` moves to the index whose `log2(n)` low bits are
/// those of `i` reversed. `a.len()` must be a power of two; for any other
/// length the permutation is silently wrong.
pub fn bit_reverse<T>(a: &mut [T]) {
    let n = a.len();
    if n <= 1 {
        return;
    }
    let shift = usize::BITS - n.trailing_zeros();

    for i in 0..n {
        let irev = i.reverse_bits() >> shift;
        if irev > i {
            a.swap(i, irev);
        }
    }
}
