use crate::compose::card::CardOptions;
use crate::foundation::math::Fnv1a64;
use crate::profile::Profile;

/// Bumped whenever the drawn layout changes so old fingerprints stop matching.
pub const LAYOUT_VERSION: u64 = 1;

/// 128-bit content hash of everything that determines a card's pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct CardFingerprint {
    /// First lane.
    pub hi: u64,
    /// Second lane.
    pub lo: u64,
}

impl std::fmt::Display for CardFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

/// Hash the render inputs as they will be drawn: values are normalized first, so profiles that
/// produce the same card share a fingerprint.
pub fn fingerprint_inputs(
    profile: &Profile,
    avatar: Option<&[u8]>,
    options: &CardOptions,
) -> CardFingerprint {
    let mut a = Fnv1a64::new_default();
    let mut b = Fnv1a64::new(0x9ae1_6a3b_2f90_404f);

    write_u64_pair(&mut a, &mut b, LAYOUT_VERSION);
    write_u64_pair(&mut a, &mut b, u64::from(options.canvas.width));
    write_u64_pair(&mut a, &mut b, u64::from(options.canvas.height));
    match options.grain_seed {
        Some(seed) => {
            write_u8_pair(&mut a, &mut b, 1);
            write_u64_pair(&mut a, &mut b, seed);
        }
        None => write_u8_pair(&mut a, &mut b, 0),
    }

    write_str_pair(&mut a, &mut b, profile.display_handle());
    write_u64_pair(&mut a, &mut b, profile.clamped_score() as u64);
    write_str_pair(&mut a, &mut b, profile.display_team());
    write_str_pair(&mut a, &mut b, &profile.display_ctf_count());

    match avatar {
        Some(bytes) => {
            write_u8_pair(&mut a, &mut b, 1);
            write_u64_pair(&mut a, &mut b, bytes.len() as u64);
            a.write_bytes(bytes);
            b.write_bytes(bytes);
        }
        None => write_u8_pair(&mut a, &mut b, 0),
    }

    CardFingerprint {
        hi: a.finish(),
        lo: b.finish(),
    }
}

fn write_str_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, s: &str) {
    write_u64_pair(a, b, s.len() as u64);
    a.write_bytes(s.as_bytes());
    b.write_bytes(s.as_bytes());
}

fn write_u64_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: u64) {
    a.write_u64(v);
    b.write_u64(v);
}

fn write_u8_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: u8) {
    a.write_u8(v);
    b.write_u8(v);
}

#[cfg(test)]
#[path = "../../tests/unit/compose/fingerprint.rs"]
mod tests;
