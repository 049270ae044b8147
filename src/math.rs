//! Float helpers that work with and without `std`.

#[cfg(feature = "std")]
pub fn sqrt(x: f64) -> f64 {
    x.sqrt()
}

#[cfg(all(not(feature = "std"), feature = "alloc"))]
pub fn sqrt(x: f64) -> f64 {
    libm::sqrt(x)
}

#[cfg(feature = "std")]
pub fn ln(x: f64) -> f64 {
    x.ln()
}

#[cfg(all(not(feature = "std"), feature = "alloc"))]
pub fn ln(x: f64) -> f64 {
    libm::log(x)
}

#[cfg(feature = "std")]
pub fn cos(x: f64) -> f64 {
    x.cos()
}

#[cfg(all(not(feature = "std"), feature = "alloc"))]
pub fn cos(x: f64) -> f64 {
    libm::cos(x)
}

#[cfg(feature = "std")]
pub fn round(x: f64) -> f64 {
    x.round()
}

#[cfg(all(not(feature = "std"), feature = "alloc"))]
pub fn round(x: f64) -> f64 {
    libm::round(x)
}

/// Converts an amount of betting units to integer thousandths.
pub fn milli(amount: f64) -> i64 {
    round(amount * 1000.0) as i64
}
