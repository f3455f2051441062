use num::{Float, ToPrimitive};

use crate::utils::math::vector::SparseVec;

/// Cosine similarity
/// cos(θ) = Σ(a_i * b_i) / (||a|| * ||b||)
///
/// Terms missing from one side contribute nothing to the dot product; each
/// norm is taken over that vector's own terms. A zero-magnitude side gives
/// 0.0. The result is clamped to [0, 1].
///
/// Each side is first rescaled by a power of two so its largest weight lies
/// in [1, 2). Power-of-two scaling is exact and cosine is scale invariant, so
/// the score is unchanged while the reductions below can neither overflow
/// nor underflow. The denominator is `sqrt(||a||² * ||b||²)`, which makes
/// `cos(v, v)` exactly 1.0, and the merge-join dot product makes the function
/// exactly symmetric.
pub fn cosine_similarity<N>(a: &SparseVec<N>, b: &SparseVec<N>) -> f64
where
    N: Float,
{
    let (a, b) = match (normalize_scale(a), normalize_scale(b)) {
        (Some(a), Some(b)) => (a, b),
        _ => return 0.0,
    };
    let norm_a = a.norm_sq();
    let norm_b = b.norm_sq();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let score = a.dot(&b) / (norm_a * norm_b).sqrt();
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, 1.0)
}

/// `v` as `f64`, scaled by `2^-e` where `2^e <= max|v_i| < 2^(e+1)`.
/// `None` for zero-magnitude or non-finite vectors.
fn normalize_scale<N>(v: &SparseVec<N>) -> Option<SparseVec<f64>>
where
    N: Float,
{
    let max = v.max_abs().to_f64()?;
    if max == 0.0 || !max.is_finite() {
        return None;
    }
    let exp = max.log2().floor() as i32;
    Some(v.map_values(|_, w| ldexp(w.to_f64().unwrap_or(0.0), -exp)))
}

/// `x * 2^exp`, exact unless the result leaves the normal range
fn ldexp(mut x: f64, mut exp: i32) -> f64 {
    const STEP: i32 = 1000;
    while exp > STEP {
        x *= pow2(STEP);
        exp -= STEP;
    }
    while exp < -STEP {
        x *= pow2(-STEP);
        exp += STEP;
    }
    x * pow2(exp)
}

/// `2^exp` for `exp` in the normal exponent range
#[inline]
fn pow2(exp: i32) -> f64 {
    debug_assert!((-1022..=1023).contains(&exp));
    f64::from_bits(((exp + 1023) as u64) << 52)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(entries: &[(&str, f64)]) -> SparseVec {
        entries.iter().map(|(t, w)| (*t, *w)).collect()
    }

    #[test]
    fn identical_vectors_score_one() {
        let a = v(&[("hello", 1.0), ("world", 1.0)]);
        assert_eq!(cosine_similarity(&a, &a.clone()), 1.0);

        let odd = v(&[("x", 0.1), ("y", 0.7), ("z", 1.0 / 3.0)]);
        assert_eq!(cosine_similarity(&odd, &odd), 1.0);
    }

    #[test]
    fn disjoint_vectors_score_zero() {
        let a = v(&[("hello", 1.0), ("world", 1.0)]);
        let b = v(&[("foo", 1.0), ("bar", 1.0)]);
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn empty_vectors_score_zero() {
        let a = v(&[("hello", 1.0)]);
        let empty = SparseVec::new();
        assert_eq!(cosine_similarity(&empty, &a), 0.0);
        assert_eq!(cosine_similarity(&a, &empty), 0.0);
        assert_eq!(cosine_similarity(&empty, &empty), 0.0);
    }

    #[test]
    fn all_zero_weights_score_zero() {
        let zero = v(&[("a", 0.0)]);
        assert_eq!(cosine_similarity(&zero, &v(&[("a", 1.0)])), 0.0);
    }

    #[test]
    fn symmetric() {
        let a = v(&[("a", 0.3), ("b", 0.11), ("c", 0.7)]);
        let b = v(&[("b", 0.9), ("c", 0.013), ("d", 0.5)]);
        assert_eq!(cosine_similarity(&a, &b), cosine_similarity(&b, &a));
    }

    #[test]
    fn known_angle() {
        // 45 degrees
        let a = v(&[("x", 1.0)]);
        let b = v(&[("x", 1.0), ("y", 1.0)]);
        let expected = 1.0 / 2.0_f64.sqrt();
        assert!((cosine_similarity(&a, &b) - expected).abs() < 1e-12);
    }

    #[test]
    fn works_on_f32_vectors() {
        let a: SparseVec<f32> = [("a", 1.0_f32), ("b", 2.0)].into_iter().collect();
        assert_eq!(cosine_similarity(&a, &a), 1.0);
    }

    #[test]
    fn huge_weights_keep_self_similarity() {
        let big = v(&[("x", 1e200)]);
        assert_eq!(cosine_similarity(&big, &big), 1.0);

        let mixed = v(&[("x", 1e300), ("y", 3e299), ("z", 1.0)]);
        assert_eq!(cosine_similarity(&mixed, &mixed), 1.0);
    }

    #[test]
    fn tiny_weights_keep_their_angle() {
        let a = v(&[("x", 1e-160)]);
        let b = v(&[("x", 1e-160), ("y", 1e-160)]);
        let unit = cosine_similarity(&v(&[("x", 1.0)]), &v(&[("x", 1.0), ("y", 1.0)]));
        let score = cosine_similarity(&a, &b);
        assert!((score - 0.5_f64.sqrt()).abs() < 1e-12, "score was {score}");
        assert!((score - unit).abs() < 1e-15);
    }

    #[test]
    fn subnormal_weights_are_compared() {
        let a = v(&[("x", 5e-324)]);
        assert_eq!(cosine_similarity(&a, &a), 1.0);
        assert_eq!(cosine_similarity(&a, &v(&[("y", 5e-324)])), 0.0);
    }

    #[test]
    fn scale_does_not_change_the_score() {
        let a = v(&[("a", 0.3), ("b", 0.11), ("c", 0.7)]);
        let b = v(&[("b", 0.9), ("c", 0.013), ("d", 0.5)]);
        let base = cosine_similarity(&a, &b);
        let big_a = a.map_values(|_, w| w * 1e250);
        let small_b = b.map_values(|_, w| w * 1e-250);
        assert!((cosine_similarity(&big_a, &small_b) - base).abs() < 1e-12);
    }

    #[test]
    fn non_finite_weights_score_zero() {
        let inf = v(&[("x", f64::INFINITY)]);
        assert_eq!(cosine_similarity(&inf, &inf), 0.0);
    }

    #[test]
    fn pow2_is_exact() {
        assert_eq!(pow2(0), 1.0);
        assert_eq!(pow2(-1), 0.5);
        assert_eq!(ldexp(2f64.powi(-600), 1200), 2f64.powi(600));
        assert_eq!(ldexp(5e-324, 1074), 1.0);
    }
}
