//! RING ↔ NESTED pixel index conversion for a fixed resolution.
//!
//! Both orderings cover the same `12 * nside^2` equal-area pixels and differ
//! only in how those pixels are numbered, so the conversion is a pure
//! bijection. Each index is decomposed into the shared `(face, x, y)`
//! representation (base face number plus face-local coordinates) and
//! re-encoded on the other side.

use healpix_common::Resolution;

use crate::zorder::{compress_bits, spread_bits};

/// Ring number of the northernmost corner of each base face, in units of
/// `nside`.
const JRLL: [i64; 12] = [2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4];

/// Longitude of each base face centre, in units of `pi/4`.
const JPLL: [i64; 12] = [1, 3, 5, 7, 0, 2, 4, 6, 1, 3, 5, 7];

/// Bijection between RING and NESTED pixel indices at one resolution.
///
/// The mapper holds only derived constants; it is cheap to construct and
/// copy, carries no shared state, and is safe to use from any number of
/// threads at once. Index arguments must lie in `[0, 12 * nside^2)`;
/// anything else is a caller bug and trips an assertion rather than
/// returning an error.
#[derive(Debug, Clone, Copy)]
pub struct IndexMapper {
    nside: i64,
    order: u32,
    npix: i64,
    /// Pixels in the north polar cap, `2 * nside * (nside - 1)`.
    ncap: i64,
}

impl IndexMapper {
    /// Build a mapper for the given resolution.
    pub fn new(resolution: Resolution) -> Self {
        let nside = i64::from(resolution.nside());
        Self {
            nside,
            order: resolution.order(),
            npix: 12 * nside * nside,
            ncap: 2 * nside * (nside - 1),
        }
    }

    /// Total number of pixels at this resolution.
    pub fn npix(&self) -> u64 {
        self.npix as u64
    }

    /// Convert a NESTED pixel index to its RING counterpart.
    pub fn nest_to_ring(&self, i_nest: u64) -> u64 {
        assert!(
            i_nest < self.npix as u64,
            "pixel index {} out of range for nside {}",
            i_nest,
            self.nside
        );
        let (ix, iy, face) = self.nest_to_xyf(i_nest as i64);
        self.xyf_to_ring(ix, iy, face) as u64
    }

    /// Convert a RING pixel index to its NESTED counterpart.
    pub fn ring_to_nest(&self, i_ring: u64) -> u64 {
        assert!(
            i_ring < self.npix as u64,
            "pixel index {} out of range for nside {}",
            i_ring,
            self.nside
        );
        let (ix, iy, face) = self.ring_to_xyf(i_ring as i64);
        self.xyf_to_nest(ix, iy, face) as u64
    }

    fn nest_to_xyf(&self, pix: i64) -> (i64, i64, usize) {
        let face = (pix >> (2 * self.order)) as usize;
        let ipf = (pix & (self.nside * self.nside - 1)) as u64;
        let ix = compress_bits(ipf) as i64;
        let iy = compress_bits(ipf >> 1) as i64;
        (ix, iy, face)
    }

    fn xyf_to_nest(&self, ix: i64, iy: i64, face: usize) -> i64 {
        ((face as i64) << (2 * self.order))
            + (spread_bits(ix as u64) | (spread_bits(iy as u64) << 1)) as i64
    }

    fn xyf_to_ring(&self, ix: i64, iy: i64, face: usize) -> i64 {
        let nl4 = 4 * self.nside;
        // Ring number counted from the north pole, 1 .. 4*nside - 1.
        let jr = JRLL[face] * self.nside - ix - iy - 1;

        // nr: pixels per quadrant of the ring; n_before: pixels in all
        // rings north of this one.
        let (nr, kshift, n_before) = if jr < self.nside {
            // north polar cap
            (jr, 0, 2 * jr * (jr - 1))
        } else if jr > 3 * self.nside {
            // south polar cap
            let nr = nl4 - jr;
            (nr, 0, self.npix - 2 * (nr + 1) * nr)
        } else {
            // equatorial belt; odd rings are shifted by half a pixel
            (
                self.nside,
                (jr - self.nside) & 1,
                self.ncap + (jr - self.nside) * nl4,
            )
        };

        // Position within the ring, 1-based, wrapped into [1, 4 * nr].
        let mut jp = (JPLL[face] * nr + ix - iy + 1 + kshift) / 2;
        if jp > nl4 {
            jp -= nl4;
        } else if jp < 1 {
            jp += nl4;
        }

        n_before + jp - 1
    }

    fn ring_to_xyf(&self, pix: i64) -> (i64, i64, usize) {
        let nl2 = 2 * self.nside;

        let (iring, iphi, kshift, nr, face) = if pix < self.ncap {
            // north polar cap
            let iring = (1 + isqrt(1 + 2 * pix)) >> 1;
            let iphi = (pix + 1) - 2 * iring * (iring - 1);
            let face = ((iphi - 1) / iring) as usize;
            (iring, iphi, 0, iring, face)
        } else if pix < self.npix - self.ncap {
            // equatorial belt
            let ip = pix - self.ncap;
            let tmp = ip >> (self.order + 2);
            let iring = tmp + self.nside;
            let iphi = ip - tmp * 4 * self.nside + 1;
            let kshift = (iring + self.nside) & 1;
            let ire = iring - self.nside + 1;
            let irm = nl2 + 2 - ire;
            let ifm = (iphi - ire / 2 + self.nside - 1) >> self.order;
            let ifp = (iphi - irm / 2 + self.nside - 1) >> self.order;
            let face = if ifp == ifm {
                ifp | 4
            } else if ifp < ifm {
                ifp
            } else {
                ifm + 8
            };
            (iring, iphi, kshift, self.nside, face as usize)
        } else {
            // south polar cap; ring counted from the south pole first
            let ip = self.npix - pix;
            let iring = (1 + isqrt(2 * ip - 1)) >> 1;
            let iphi = 4 * iring + 1 - (ip - 2 * iring * (iring - 1));
            let face = 8 + ((iphi - 1) / iring) as usize;
            (2 * nl2 - iring, iphi, 0, iring, face)
        };

        let irt = iring - JRLL[face] * self.nside + 1;
        let mut ipt = 2 * iphi - JPLL[face] * nr - kshift - 1;
        if ipt >= nl2 {
            ipt -= 8 * self.nside;
        }

        ((ipt - irt) >> 1, (-ipt - irt) >> 1, face)
    }
}

/// Integer square root; the float estimate can land one off for large
/// inputs, so it is corrected before use.
fn isqrt(v: i64) -> i64 {
    let mut r = (v as f64).sqrt() as i64;
    while (r + 1) * (r + 1) <= v {
        r += 1;
    }
    while r * r > v {
        r -= 1;
    }
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};

    fn mapper(nside: u32) -> IndexMapper {
        IndexMapper::new(Resolution::from_nside(nside).unwrap())
    }

    /// At nside = 1 every face is a single pixel and both numberings list
    /// the 12 base pixels in the same order.
    #[test]
    fn test_nside_1_is_identity() {
        let m = mapper(1);
        for pix in 0..12 {
            assert_eq!(m.nest_to_ring(pix), pix);
            assert_eq!(m.ring_to_nest(pix), pix);
        }
    }

    /// Full correspondence table for nside = 2, worked out by hand from the
    /// ring decomposition (and matching the reference HEALPix libraries).
    #[test]
    fn test_nside_2_known_table() {
        const NEST_TO_RING: [u64; 48] = [
            13, 5, 4, 0, 15, 7, 6, 1, 17, 9, 8, 2, 19, 11, 10, 3, 28, 20, 27, 12, 30, 22, 21, 14,
            32, 24, 23, 16, 34, 26, 25, 18, 44, 37, 36, 29, 45, 39, 38, 31, 46, 41, 40, 33, 47,
            43, 42, 35,
        ];
        let m = mapper(2);
        for (i_nest, &i_ring) in NEST_TO_RING.iter().enumerate() {
            assert_eq!(m.nest_to_ring(i_nest as u64), i_ring, "nest {}", i_nest);
            assert_eq!(m.ring_to_nest(i_ring), i_nest as u64, "ring {}", i_ring);
        }
    }

    #[test]
    fn test_bijection_exhaustive_small_nside() {
        for order in 0..=6 {
            let m = mapper(1 << order);
            let npix = m.npix();
            let mut seen = vec![false; npix as usize];
            for i_nest in 0..npix {
                let i_ring = m.nest_to_ring(i_nest);
                assert!(i_ring < npix);
                assert!(!seen[i_ring as usize], "ring index {} hit twice", i_ring);
                seen[i_ring as usize] = true;
                assert_eq!(m.ring_to_nest(i_ring), i_nest);
            }
            assert!(seen.iter().all(|&s| s), "nside {} not surjective", 1 << order);
        }
    }

    #[test]
    fn test_bijection_sampled_large_nside() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        for order in [10u32, 16, 20, 29] {
            let m = mapper(1 << order);
            let npix = m.npix();
            for _ in 0..2000 {
                let i_nest = rng.gen_range(0..npix);
                assert_eq!(m.ring_to_nest(m.nest_to_ring(i_nest)), i_nest);
                let i_ring = rng.gen_range(0..npix);
                assert_eq!(m.nest_to_ring(m.ring_to_nest(i_ring)), i_ring);
            }
        }
    }

    /// The polar rings hold 4 pixels each; the first and last RING indices
    /// must land on the polar corner pixels of the right faces.
    #[test]
    fn test_polar_pixels() {
        for order in 1..=5u32 {
            let nside = 1u64 << order;
            let m = mapper(nside as u32);
            let npface = nside * nside;
            // Ring indices 0..4 are the four pixels around the north pole,
            // the top corners (x = y = nside - 1) of faces 0..4.
            for face in 0..4u64 {
                let corner = face * npface + (npface - 1);
                assert_eq!(m.ring_to_nest(face), corner);
            }
            // The last four RING indices circle the south pole, the bottom
            // corners (x = y = 0) of faces 8..12.
            for face in 8..12u64 {
                let corner = face * npface;
                assert_eq!(m.ring_to_nest(m.npix() - 12 + face), corner);
            }
        }
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_nest_index_out_of_range_panics() {
        mapper(2).nest_to_ring(48);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_ring_index_out_of_range_panics() {
        mapper(2).ring_to_nest(48);
    }

    #[test]
    fn test_isqrt() {
        for v in 0..10_000i64 {
            let r = isqrt(v);
            assert!(r * r <= v && (r + 1) * (r + 1) > v, "isqrt({})", v);
        }
        let big = (1i64 << 60) - 1;
        let r = isqrt(big);
        assert!(r * r <= big && (r + 1) * (r + 1) > big);
    }
}
