use rand::Rng;

const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 9;

/// Transaction id handed back by the processing stub: `pay_` followed by
/// nine lowercase base-36 characters. Not tied to any real transfer.
pub fn fabricate_payment_id() -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect();
    format!("pay_{}", suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_id_shape() {
        let id = fabricate_payment_id();
        let suffix = id.strip_prefix("pay_").unwrap();
        assert_eq!(suffix.len(), SUFFIX_LEN);
        assert!(suffix.bytes().all(|b| ALPHABET.contains(&b)));
    }

    #[test]
    fn payment_ids_differ() {
        assert_ne!(fabricate_payment_id(), fabricate_payment_id());
    }
}
