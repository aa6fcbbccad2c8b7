//! Seeded random scanner for tests and demos.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::scanner::{Frame, ScannedCode, Scanner, Symbology};

/// Succeeds with a fixed probability. On success it returns a code from the
/// catalog when one is configured, otherwise a synthesized EAN-13.
#[derive(Debug, Clone)]
pub struct SimulatedScanner {
    rng: StdRng,
    success_probability: f64,
    catalog: Vec<String>,
}

/// Append the EAN-13 check digit to 12 data digits.
fn ean13(data: &[u8; 12]) -> String {
    let sum: u32 = data
        .iter()
        .enumerate()
        .map(|(i, d)| u32::from(*d) * if i % 2 == 0 { 1 } else { 3 })
        .sum();
    let check = (10 - sum % 10) % 10;
    let mut code: String = data.iter().map(|d| char::from(b'0' + d)).collect();
    code.push(char::from(b'0' + check as u8));
    code
}

impl SimulatedScanner {
    pub fn new(seed: u64, success_probability: f64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            success_probability: if success_probability.is_nan() {
                0.0
            } else {
                success_probability.clamp(0.0, 1.0)
            },
            catalog: Vec::new(),
        }
    }

    pub fn with_catalog(mut self, catalog: Vec<String>) -> Self {
        self.catalog = catalog;
        self
    }
}

impl Scanner for SimulatedScanner {
    fn decode(&mut self, _frame: &Frame) -> Option<ScannedCode> {
        if !self.rng.gen_bool(self.success_probability) {
            return None;
        }
        if !self.catalog.is_empty() {
            let idx = self.rng.gen_range(0..self.catalog.len());
            return Some(ScannedCode {
                symbology: Symbology::Code128,
                value: self.catalog[idx].clone(),
            });
        }
        let mut data = [0u8; 12];
        for d in data.iter_mut() {
            *d = self.rng.gen_range(0..10);
        }
        Some(ScannedCode {
            symbology: Symbology::Ean13,
            value: ean13(&data),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_reads() {
        let frame = Frame::blank(2, 2);
        let mut a = SimulatedScanner::new(7, 0.5);
        let mut b = SimulatedScanner::new(7, 0.5);
        for _ in 0..50 {
            assert_eq!(a.decode(&frame), b.decode(&frame));
        }
    }

    #[test]
    fn probability_bounds_are_respected() {
        let frame = Frame::blank(2, 2);
        let mut never = SimulatedScanner::new(1, 0.0);
        let mut always = SimulatedScanner::new(1, 1.0).with_catalog(vec!["SKU-1".to_string()]);
        for _ in 0..20 {
            assert!(never.decode(&frame).is_none());
            assert_eq!(always.decode(&frame).unwrap().value, "SKU-1");
        }
    }

    #[test]
    fn synthesized_codes_have_valid_check_digit() {
        assert_eq!(ean13(&[4, 0, 0, 6, 3, 8, 1, 3, 3, 3, 9, 3]), "4006381333931");
        let code = SimulatedScanner::new(3, 1.0).decode(&Frame::blank(1, 1)).unwrap();
        assert_eq!(code.symbology, Symbology::Ean13);
        assert_eq!(code.value.len(), 13);
    }
}
