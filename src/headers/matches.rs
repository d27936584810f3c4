/// FNV-1a over the exact bytes of a header name.
///
/// Unlike lookups in a case normalized map, header identity here is case-sensitive, so no
/// byte is folded before hashing.
pub const fn hash(bytes: &[u8]) -> u32 {
    const INITIAL_STATE: u32 = 0x811c_9dc5;
    const PRIME: u32 = 0x0100_0193;

    let mut hash = INITIAL_STATE;
    let mut i = 0;

    while i < bytes.len() {
        hash ^= bytes[i] as u32;
        hash = hash.wrapping_mul(PRIME);
        i += 1;
    }

    hash
}

#[cfg(test)]
mod test {
    use super::hash;

    #[test]
    fn hash_is_case_sensitive() {
        assert_eq!(hash(b"Content-Type"), hash(b"Content-Type"));
        assert_ne!(hash(b"Content-Type"), hash(b"content-type"));
        // FNV-1a offset basis
        assert_eq!(hash(b""), 0x811c_9dc5);
    }
}
