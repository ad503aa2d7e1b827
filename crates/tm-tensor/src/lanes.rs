//! Fixed-width lane arithmetic for the optimized engine.
//!
//! The contraction sum is accumulated `LANES` values at a time: lane-wise
//! multiply-add into a vector register, then a horizontal reduce to a single
//! scalar. The arch-specific paths (SSE2 on x86_64, NEON on aarch64) and the
//! scalar fallback perform the additions in the same order, so all paths
//! produce bit-identical results for the same inputs.
//!
//! Arithmetic is `f32` while tensor storage is `f64`; callers convert on the
//! way in and out. That narrowing is the engine's documented precision
//! trade-off and is what the equivalence tolerance absorbs.

/// Number of scalar values processed per vector operation.
pub const LANES: usize = 4;

/// A group of `LANES` single-precision values.
pub type Lane = [f32; LANES];

/// An all-zero lane group, the starting accumulator value.
pub const ZERO: Lane = [0.0; LANES];

/// Lane-wise `acc + a * b`.
#[cfg(target_arch = "x86_64")]
#[inline]
pub fn accumulate(acc: Lane, a: Lane, b: Lane) -> Lane {
    use std::arch::x86_64::*;
    // SSE2 is part of the x86_64 baseline, so no runtime detection is
    // needed before using these intrinsics.
    unsafe {
        let va = _mm_loadu_ps(a.as_ptr());
        let vb = _mm_loadu_ps(b.as_ptr());
        let vacc = _mm_loadu_ps(acc.as_ptr());
        let sum = _mm_add_ps(vacc, _mm_mul_ps(va, vb));
        let mut out = ZERO;
        _mm_storeu_ps(out.as_mut_ptr(), sum);
        out
    }
}

/// Lane-wise `acc + a * b`.
#[cfg(target_arch = "aarch64")]
#[inline]
pub fn accumulate(acc: Lane, a: Lane, b: Lane) -> Lane {
    use std::arch::aarch64::*;
    // NEON is part of the aarch64 baseline.
    unsafe {
        let va = vld1q_f32(a.as_ptr());
        let vb = vld1q_f32(b.as_ptr());
        let vacc = vld1q_f32(acc.as_ptr());
        let sum = vaddq_f32(vacc, vmulq_f32(va, vb));
        let mut out = ZERO;
        vst1q_f32(out.as_mut_ptr(), sum);
        out
    }
}

/// Lane-wise `acc + a * b`, unrolled scalar fallback.
#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
#[inline]
pub fn accumulate(acc: Lane, a: Lane, b: Lane) -> Lane {
    [
        acc[0] + a[0] * b[0],
        acc[1] + a[1] * b[1],
        acc[2] + a[2] * b[2],
        acc[3] + a[3] * b[3],
    ]
}

/// Reduces a lane group to a single scalar.
///
/// The reduction order (lane 0 through lane 3, left to right) is fixed so
/// every arch path yields the same result.
#[inline]
pub fn horizontal_sum(v: Lane) -> f32 {
    v[0] + v[1] + v[2] + v[3]
}
