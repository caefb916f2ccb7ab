//! Booking reference numbers, e.g. `REF-05012024-K3Q9ZD`.

use jiff::civil::Date;
use rand::{Rng, seq::SliceRandom};

const PREFIX: &str = "REF";
const SUFFIX_LEN: usize = 6;
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Reference for a booking made on `date`, with a random suffix.
pub fn generate_reference(date: Date) -> String {
    generate_reference_with(date, &mut rand::thread_rng())
}

/// Like [`generate_reference`], drawing the suffix from `rng`.
pub fn generate_reference_with<R: Rng + ?Sized>(date: Date, rng: &mut R) -> String {
    let suffix: String = (0..SUFFIX_LEN)
        .filter_map(|_| ALPHABET.choose(rng))
        .map(|byte| char::from(*byte))
        .collect();

    format!("{PREFIX}-{}-{suffix}", date.strftime("%d%m%Y"))
}

/// Whether `reference` has the `REF-DDMMYYYY-XXXXXX` shape.
pub fn is_valid_reference(reference: &str) -> bool {
    let mut parts = reference.split('-');

    let (Some(prefix), Some(date), Some(suffix), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };

    prefix == PREFIX
        && date.len() == 8
        && date.bytes().all(|byte| byte.is_ascii_digit())
        && suffix.len() == SUFFIX_LEN
        && suffix.bytes().all(|byte| ALPHABET.contains(&byte))
}
