use std::io::Write;

use rand::RngCore;

/// Fill `file` with a small random payload.
pub fn write_random_content(file: &mut impl Write, rng: &mut impl RngCore) {
    let mut data = vec![0; (rng.next_u32() % 4096) as usize + 16];
    rng.fill_bytes(&mut data);
    file.write_all(&data).unwrap();
}

#[test]
fn random_content_is_never_empty() {
    use rand::{rngs::SmallRng, SeedableRng};

    let mut buffer = Vec::new();
    write_random_content(&mut buffer, &mut SmallRng::seed_from_u64(0));
    assert!(!buffer.is_empty());
}
