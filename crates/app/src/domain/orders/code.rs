//! Human-facing order codes.

use jiff::Timestamp;
use rand::Rng;

// No ambiguous glyphs (0/O, 1/I/L) in the suffix; support staff read these
// codes over the phone.
const SUFFIX_ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";
const SUFFIX_LEN: usize = 4;

/// Generate an order code of the form `ORD-<unix-millis>-<suffix>`.
///
/// The timestamp makes codes sortable and collisions implausible; the DB
/// unique index plus one regeneration attempt covers the rest.
pub(crate) fn generate_order_code(now: Timestamp, rng: &mut impl Rng) -> String {
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| {
            let index = rng.gen_range(0..SUFFIX_ALPHABET.len());

            char::from(SUFFIX_ALPHABET[index])
        })
        .collect();

    format!("ORD-{}-{suffix}", now.as_millisecond())
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn code_has_expected_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let code = generate_order_code(Timestamp::UNIX_EPOCH, &mut rng);

        let mut parts = code.split('-');

        assert_eq!(parts.next(), Some("ORD"));
        assert_eq!(parts.next(), Some("0"));

        let suffix = parts.next().unwrap_or_default();

        assert_eq!(suffix.len(), SUFFIX_LEN);
        assert!(suffix.bytes().all(|b| SUFFIX_ALPHABET.contains(&b)));
        assert_eq!(parts.next(), None);
    }

    #[test]
    fn consecutive_codes_differ() {
        let mut rng = StdRng::seed_from_u64(7);
        let now = Timestamp::UNIX_EPOCH;

        let first = generate_order_code(now, &mut rng);
        let second = generate_order_code(now, &mut rng);

        assert_ne!(first, second, "same-millisecond codes rely on the suffix");
    }
}
