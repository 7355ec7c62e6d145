//! `MathCache` — caller-owned sidecar for precision-tagged transcendental
//! constants.
//!
//! Every cached value is stored with the precision at which it was
//! computed; a request at equal-or-lower precision reuses it, a request at
//! higher precision recomputes and replaces it. No ambient globals: the
//! cache is always an explicit parameter.

use crate::error::BigResult;

use super::BigDec;

#[derive(Debug, Clone, Default)]
pub struct MathCache {
    ln2: Option<(BigDec, u32)>,
    ln1_25: Option<(BigDec, u32)>,
    ln10: Option<(BigDec, u32)>,
    pi: Option<(BigDec, u32)>,
}

impl MathCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn ln2(&mut self, precision: u32, compute: impl FnOnce(u32) -> BigResult<BigDec>) -> BigResult<BigDec> {
        get_or_compute(&mut self.ln2, precision, compute)
    }

    pub(crate) fn ln1_25(&mut self, precision: u32, compute: impl FnOnce(u32) -> BigResult<BigDec>) -> BigResult<BigDec> {
        get_or_compute(&mut self.ln1_25, precision, compute)
    }

    pub(crate) fn ln10(&mut self, precision: u32, compute: impl FnOnce(u32) -> BigResult<BigDec>) -> BigResult<BigDec> {
        get_or_compute(&mut self.ln10, precision, compute)
    }

    pub(crate) fn pi(&mut self, precision: u32, compute: impl FnOnce(u32) -> BigResult<BigDec>) -> BigResult<BigDec> {
        get_or_compute(&mut self.pi, precision, compute)
    }
}

fn get_or_compute(
    slot: &mut Option<(BigDec, u32)>,
    precision: u32,
    compute: impl FnOnce(u32) -> BigResult<BigDec>,
) -> BigResult<BigDec> {
    if let Some((value, computed_at)) = slot.as_ref() {
        if *computed_at >= precision {
            return Ok(value.clone());
        }
    }
    let value = compute(precision)?;
    *slot = Some((value.clone(), precision));
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reuses_value_at_equal_or_lower_precision() {
        let mut cache = MathCache::new();
        let mut calls = 0;
        let v1 = cache
            .ln2(20, |_| {
                calls += 1;
                Ok(BigDec::one())
            })
            .unwrap();
        let v2 = cache
            .ln2(10, |_| {
                calls += 1;
                Ok(BigDec::zero())
            })
            .unwrap();
        assert_eq!(v1, v2);
        assert_eq!(calls, 1);
    }

    #[test]
    fn recomputes_on_precision_upgrade() {
        let mut cache = MathCache::new();
        let mut calls = 0;
        cache
            .ln2(10, |_| {
                calls += 1;
                Ok(BigDec::one())
            })
            .unwrap();
        cache
            .ln2(20, |_| {
                calls += 1;
                Ok(BigDec::one())
            })
            .unwrap();
        assert_eq!(calls, 2);
    }
}
