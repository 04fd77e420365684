//! Tidal Series Kernel
//!
//! Vector backend for bulk elementwise operations. A `Backend` is resolved
//! from a `Kernel` choice once, at series construction, and every series
//! carries it along. The scalar and SIMD kernels produce identical results
//! for elementwise operations; reductions agree up to floating-point
//! rounding because the SIMD kernel accumulates per lane.
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use crate::float::Real;
use std::sync::OnceLock;
use tidal_common::Kernel;

// =============================================================================
// Constants
// =============================================================================

/// Elements processed per chunk by the SIMD kernel.
pub const LANES: usize = 8;

static BEST_KERNEL: OnceLock<Kernel> = OnceLock::new();

// =============================================================================
// Kernel Detection
// =============================================================================

/// Best concrete kernel for this build and CPU. The probe runs once.
pub fn detect_best_kernel() -> Kernel {
    *BEST_KERNEL.get_or_init(|| {
        let kernel = if simd_supported() {
            Kernel::Simd
        } else {
            Kernel::Scalar
        };
        tracing::debug!("resolved vector kernel: {}", kernel);
        kernel
    })
}

/// Map `Kernel::Auto` to a concrete kernel; other choices pass through.
pub fn resolve_kernel(kernel: Kernel) -> Kernel {
    match kernel {
        Kernel::Auto => detect_best_kernel(),
        other => other,
    }
}

#[cfg(all(feature = "simd", target_arch = "x86_64"))]
fn simd_supported() -> bool {
    std::arch::is_x86_feature_detected!("avx2")
}

#[cfg(all(feature = "simd", target_arch = "aarch64"))]
fn simd_supported() -> bool {
    true
}

#[cfg(not(all(feature = "simd", any(target_arch = "x86_64", target_arch = "aarch64"))))]
fn simd_supported() -> bool {
    false
}

// =============================================================================
// Backend
// =============================================================================

/// A resolved vector backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backend {
    kernel: Kernel,
}

impl Default for Backend {
    fn default() -> Self {
        Self::new(Kernel::Auto)
    }
}

impl Backend {
    pub fn new(kernel: Kernel) -> Self {
        Self {
            kernel: resolve_kernel(kernel),
        }
    }

    pub fn scalar() -> Self {
        Self {
            kernel: Kernel::Scalar,
        }
    }

    /// The concrete kernel in use; never `Kernel::Auto`.
    pub fn kernel(&self) -> Kernel {
        self.kernel
    }

    fn is_simd(&self) -> bool {
        self.kernel == Kernel::Simd
    }

    // -------------------------------------------------------------------------
    // Generic Drivers
    // -------------------------------------------------------------------------

    /// `dst[i] = op(dst[i], src[i])`. Both slices must have equal length.
    #[inline]
    pub fn zip_apply<T: Real>(&self, dst: &mut [T], src: &[T], op: impl Fn(T, T) -> T) {
        debug_assert_eq!(dst.len(), src.len());

        if self.is_simd() {
            let mut dst_chunks = dst.chunks_exact_mut(LANES);
            let mut src_chunks = src.chunks_exact(LANES);
            for (d, s) in (&mut dst_chunks).zip(&mut src_chunks) {
                for lane in 0..LANES {
                    d[lane] = op(d[lane], s[lane]);
                }
            }
            for (d, &s) in dst_chunks
                .into_remainder()
                .iter_mut()
                .zip(src_chunks.remainder())
            {
                *d = op(*d, s);
            }
        } else {
            for (d, &s) in dst.iter_mut().zip(src) {
                *d = op(*d, s);
            }
        }
    }

    /// `dst[i] = op(dst[i])`.
    #[inline]
    pub fn map<T: Real>(&self, dst: &mut [T], op: impl Fn(T) -> T) {
        if self.is_simd() {
            let mut chunks = dst.chunks_exact_mut(LANES);
            for d in &mut chunks {
                for lane in 0..LANES {
                    d[lane] = op(d[lane]);
                }
            }
            for d in chunks.into_remainder() {
                *d = op(*d);
            }
        } else {
            for d in dst.iter_mut() {
                *d = op(*d);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Elementwise Operations
    // -------------------------------------------------------------------------

    pub fn add<T: Real>(&self, dst: &mut [T], src: &[T]) {
        self.zip_apply(dst, src, |a, b| a + b);
    }

    pub fn sub<T: Real>(&self, dst: &mut [T], src: &[T]) {
        self.zip_apply(dst, src, |a, b| a - b);
    }

    pub fn mul<T: Real>(&self, dst: &mut [T], src: &[T]) {
        self.zip_apply(dst, src, |a, b| a * b);
    }

    pub fn div<T: Real>(&self, dst: &mut [T], src: &[T]) {
        self.zip_apply(dst, src, |a, b| a / b);
    }

    /// Elementwise minimum; a NaN operand yields the other operand.
    pub fn minimum<T: Real>(&self, dst: &mut [T], src: &[T]) {
        self.zip_apply(dst, src, |a, b| a.min(b));
    }

    /// Elementwise maximum; a NaN operand yields the other operand.
    pub fn maximum<T: Real>(&self, dst: &mut [T], src: &[T]) {
        self.zip_apply(dst, src, |a, b| a.max(b));
    }

    pub fn add_scalar<T: Real>(&self, dst: &mut [T], v: T) {
        self.map(dst, |a| a + v);
    }

    pub fn sub_scalar<T: Real>(&self, dst: &mut [T], v: T) {
        self.map(dst, |a| a - v);
    }

    pub fn mul_scalar<T: Real>(&self, dst: &mut [T], v: T) {
        self.map(dst, |a| a * v);
    }

    pub fn div_scalar<T: Real>(&self, dst: &mut [T], v: T) {
        self.map(dst, |a| a / v);
    }

    pub fn abs<T: Real>(&self, dst: &mut [T]) {
        self.map(dst, |a| a.abs());
    }

    pub fn round<T: Real>(&self, dst: &mut [T]) {
        self.map(dst, |a| a.round());
    }

    pub fn floor<T: Real>(&self, dst: &mut [T]) {
        self.map(dst, |a| a.floor());
    }

    pub fn ceil<T: Real>(&self, dst: &mut [T]) {
        self.map(dst, |a| a.ceil());
    }

    pub fn sqrt<T: Real>(&self, dst: &mut [T]) {
        self.map(dst, |a| a.sqrt());
    }

    // -------------------------------------------------------------------------
    // Reductions
    // -------------------------------------------------------------------------

    /// Dot product. NaN operands propagate.
    pub fn dot<T: Real>(&self, a: &[T], b: &[T]) -> T {
        debug_assert_eq!(a.len(), b.len());

        if self.is_simd() {
            let mut acc = [T::zero(); LANES];
            let mut a_chunks = a.chunks_exact(LANES);
            let mut b_chunks = b.chunks_exact(LANES);
            for (x, y) in (&mut a_chunks).zip(&mut b_chunks) {
                for lane in 0..LANES {
                    acc[lane] = acc[lane] + x[lane] * y[lane];
                }
            }
            let tail = a_chunks
                .remainder()
                .iter()
                .zip(b_chunks.remainder())
                .fold(T::zero(), |s, (&x, &y)| s + x * y);
            acc.iter().fold(tail, |s, &v| s + v)
        } else {
            a.iter().zip(b).fold(T::zero(), |s, (&x, &y)| s + x * y)
        }
    }

    /// Sum of the non-NaN values and their count.
    ///
    /// The SIMD kernel deals the k-th non-NaN value to lane `k % LANES`, so
    /// the result does not depend on where NaNs sit in the input.
    pub fn nansum<T: Real>(&self, values: &[T]) -> (T, usize) {
        if self.is_simd() {
            let mut acc = [T::zero(); LANES];
            let mut count = 0usize;
            for &v in values.iter().filter(|v| !v.is_nan()) {
                let lane = count % LANES;
                acc[lane] = acc[lane] + v;
                count += 1;
            }
            let sum = acc.iter().fold(T::zero(), |s, &v| s + v);
            (sum, count)
        } else {
            values
                .iter()
                .filter(|v| !v.is_nan())
                .fold((T::zero(), 0), |(s, n), &v| (s + v, n + 1))
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
