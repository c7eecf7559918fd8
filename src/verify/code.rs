//! Challenge code generation.

use rand::Rng;

/// Characters used in challenge codes. Ambiguous glyphs (0/O, 1/I) are
/// excluded because users retype the code into their profile by hand.
const CODE_CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

const CODE_LENGTH: usize = 6;

/// Generate a short, human-typeable challenge code.
///
/// 32^6 possible codes makes accidental collision across concurrently
/// pending sessions negligible; codes are only ever matched against the
/// issuing identity's own record, so cross-identity collision is harmless.
pub fn generate_code() -> String {
    let mut rng = rand::thread_rng();
    (0..CODE_LENGTH)
        .map(|_| {
            let idx = rng.gen_range(0..CODE_CHARSET.len());
            CODE_CHARSET[idx] as char
        })
        .collect()
}
