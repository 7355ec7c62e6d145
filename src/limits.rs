//! Tuning constants for the multiplication/division tier dispatch and the
//! transcendental working-precision buffers.
//!
//! Collected as associated-constant-style crate-wide knobs so they aren't
//! magic numbers scattered across `ubig10`, `sbig2`, and `bigdec`.

/// UBig10 word radix: each word holds a value in `[0, B10)`.
pub const B10: u32 = 1_000_000_000;

/// Decimal digits per UBig10 word.
pub const DIGITS_PER_WORD: usize = 9;

/// SBig2 word radix: each word holds a value in `[0, 2^32)`.
pub const B2_BITS: u32 = 32;

/// UBig10 multiplication: schoolbook above this length degrades to Karatsuba.
pub const KARATSUBA_THRESHOLD_WORDS: usize = 64;

/// UBig10 multiplication: Karatsuba above this length degrades to Toom-3.
pub const TOOM3_THRESHOLD_WORDS: usize = 128;

/// UBig10 division: schoolbook above this length hands off to Burnikel-Ziegler.
pub const BURNIKEL_ZIEGLER_THRESHOLD_WORDS: usize = 32;

/// SBig2 multiplication Karatsuba cutoff.
pub const SBIG2_KARATSUBA_THRESHOLD_WORDS: usize = 48;

/// SBig2 isqrt: below this many words, plain Newton from an `f64` seed.
pub const SBIG2_ISQRT_NEWTON_THRESHOLD_WORDS: usize = 54;

/// SBig2 isqrt: at or below this many words, hardware sqrt plus refinement.
pub const SBIG2_ISQRT_HARDWARE_THRESHOLD_WORDS: usize = 2;

/// Truncating BigDec division: how much slack is allowed on the divisor's
/// word count before it gets truncated too.
pub const TRUNCATION_GUARD: usize = 4;

/// UBig10 base conversion: above this many decimal digits, switch from the
/// fused `result = result*B10 + chunk` loop to the divide-and-conquer table
/// driven conversion.
pub const DC_CONVERSION_DIGIT_THRESHOLD: usize = 10_000;

/// UBig10 -> decimal string: above this many words, use the D&C splitting
/// conversion instead of repeated `floor_divide_by_u32(B10)`.
pub const DC_TO_STRING_WORD_THRESHOLD: usize = 128;

/// Default extra working-digits carried by most transcendentals (exp, ln,
/// nth_root) beyond the caller's requested precision.
pub const BUFFER_DIGITS_DEFAULT: u32 = 15;

/// Extra working-digits carried by sin/cos/tan, which need more headroom
/// near argument-reduction boundaries (multiples of pi/2).
pub const BUFFER_DIGITS_TRIG: u32 = 99;

/// Heuristic trailing-zero count above which `nth_root` treats a result as
/// "probably exact" before running the one-multiply confirmation check.
pub const PERFECT_POWER_ZERO_HEURISTIC: usize = 9;

/// Seed precision (decimal digits) for the first Newton iteration in
/// precision-doubling schemes (`sqrt`, `nth_root`, reciprocal-sqrt).
pub const NEWTON_SEED_DIGITS: u32 = 18;
