// SPDX-License-Identifier: MIT

/// Parabola with an easy closed form.
pub fn square(x: f64) -> f64 {
    x * x
}

/// Integral of [`square`] over `[a, b]`.
pub fn square_integral(a: f64, b: f64) -> f64 {
    (b.powi(3) - a.powi(3)) / 3.0
}

/// Oscillating integrand with no pleasant closed form, useful for checking
/// that different strategies and worker counts agree with each other.
pub fn wobble(x: f64) -> f64 {
    (((x + 100.0) * x + 100.0) * x + 100.123).sin()
}

/// Integrand whose cost ramps linearly across the domain, for comparing
/// schedules under skewed per-sample cost.
pub fn slow_ramp(x: f64) -> f64 {
    let spins = (x.abs() * 2_000.0) as u32;
    for _ in 0..spins {
        std::hint::spin_loop();
    }
    x
}
