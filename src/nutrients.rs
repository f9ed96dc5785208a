use serde::{Deserialize, Serialize};

/// Rounding policy for everything that leaves the engine: energy is kept
/// as whole kcal, macro grams keep one decimal place. Every write path and
/// every aggregator goes through these two functions so that daily and
/// range views can never disagree on rounding.
pub fn round_kcal(v: f64) -> f64 {
    v.round()
}

pub fn round_grams(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Per-100g nutrition values of a catalog item (or a manual entry).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Per100g {
    pub kcal: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    #[serde(default)]
    pub fiber: Option<f64>,
    #[serde(default)]
    pub salt: Option<f64>,
}

/// One kcal/protein/carbs/fat quadruple, used both for stored snapshots
/// and for running totals during aggregation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroSet {
    pub kcal: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl MacroSet {
    pub const ZERO: MacroSet = MacroSet {
        kcal: 0.0,
        protein: 0.0,
        carbs: 0.0,
        fat: 0.0,
    };

    /// Write-time snapshot: grams × per-100g / 100, rounded once.
    /// The result is what gets persisted; reads never go back to the
    /// catalog item, which may change or disappear later.
    pub fn from_per_100g(per: &Per100g, grams: f64) -> MacroSet {
        let factor = grams / 100.0;
        MacroSet {
            kcal: round_kcal(per.kcal * factor),
            protein: round_grams(per.protein * factor),
            carbs: round_grams(per.carbs * factor),
            fat: round_grams(per.fat * factor),
        }
    }

    /// Proportional recompute when grams are edited: scale each stored
    /// value by the per-gram ratio derived from the original snapshot.
    /// The catalog is deliberately not consulted here.
    pub fn rescale(&self, old_grams: f64, new_grams: f64) -> MacroSet {
        MacroSet {
            kcal: round_kcal(self.kcal / old_grams * new_grams),
            protein: round_grams(self.protein / old_grams * new_grams),
            carbs: round_grams(self.carbs / old_grams * new_grams),
            fat: round_grams(self.fat / old_grams * new_grams),
        }
    }

    pub fn add(&mut self, other: &MacroSet) {
        self.kcal += other.kcal;
        self.protein += other.protein;
        self.carbs += other.carbs;
        self.fat += other.fat;
    }

    /// Re-apply the policy after summing, so accumulated float error never
    /// reaches a response body.
    pub fn rounded(&self) -> MacroSet {
        MacroSet {
            kcal: round_kcal(self.kcal),
            protein: round_grams(self.protein),
            carbs: round_grams(self.carbs),
            fat: round_grams(self.fat),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn per100(kcal: f64, protein: f64, carbs: f64, fat: f64) -> Per100g {
        Per100g {
            kcal,
            protein,
            carbs,
            fat,
            fiber: None,
            salt: None,
        }
    }

    #[test]
    fn snapshot_rounds_kcal_to_integer_and_grams_to_one_decimal() {
        let snap = MacroSet::from_per_100g(&per100(123.4, 4.56, 7.89, 1.23), 150.0);
        assert_eq!(snap.kcal, 185.0); // 185.1 -> 185
        assert_eq!(snap.protein, 6.8); // 6.84 -> 6.8
        assert_eq!(snap.carbs, 11.8); // 11.835 -> 11.8
        assert_eq!(snap.fat, 1.8); // 1.845 -> 1.8
    }

    #[test]
    fn rescale_uses_original_stored_values() {
        // Item logged at 100 g / 200 kcal, edited to 150 g => 300 kcal,
        // computed from the stored snapshot, not the catalog.
        let stored = MacroSet {
            kcal: 200.0,
            protein: 10.0,
            carbs: 20.0,
            fat: 5.0,
        };
        let edited = stored.rescale(100.0, 150.0);
        assert_eq!(edited.kcal, 300.0);
        assert_eq!(edited.protein, 15.0);
        assert_eq!(edited.carbs, 30.0);
        assert_eq!(edited.fat, 7.5);
    }

    #[test]
    fn rescale_down_keeps_one_decimal() {
        let stored = MacroSet {
            kcal: 250.0,
            protein: 7.7,
            carbs: 31.2,
            fat: 9.9,
        };
        let edited = stored.rescale(120.0, 45.0);
        assert_eq!(edited.kcal, 94.0); // 93.75 -> 94
        assert_eq!(edited.protein, 2.9); // 2.8875 -> 2.9
        assert_eq!(edited.carbs, 11.7);
        assert_eq!(edited.fat, 3.7);
    }

    #[test]
    fn summing_then_rounding_removes_float_noise() {
        let mut total = MacroSet::ZERO;
        for _ in 0..3 {
            total.add(&MacroSet {
                kcal: 100.0,
                protein: 0.1,
                carbs: 0.2,
                fat: 0.3,
            });
        }
        let total = total.rounded();
        assert_eq!(total.protein, 0.3);
        assert_eq!(total.carbs, 0.6);
        assert_eq!(total.fat, 0.9);
    }
}
