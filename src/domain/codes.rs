//! Join-code generation: six decimal digits, zero-padded, uniformly random.

use rand::RngExt;

use super::ids::JoinCode;

const CODE_LENGTH: usize = 6;

/// Generates a uniformly random six-digit join code.
///
/// Collisions against existing sessions are the caller's responsibility to
/// detect and retry at creation time.
#[must_use]
pub fn generate_join_code() -> JoinCode {
    let mut rng = rand::rng();
    let value: u32 = rng.random_range(0..10u32.pow(CODE_LENGTH as u32));
    JoinCode(format!("{value:0width$}", width = CODE_LENGTH))
}
