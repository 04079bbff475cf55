//! Bulk preparation of a solution for a whole class: total volume with a safety margin,
//! total amount of reagent and the flasks to fill.
//!
//! Flasks are filled greedily from the largest preferred size down; whatever is left after
//! that goes to the preferred flask closest in size to the leftover volume.
use crate::Solutions::solution_calculator::{ConcentrationKind, SolutionError, SolutionRequest};
use crate::Stoichiometry::molmass::compute_molar_mass;
use log::{debug, info};
use std::fmt;

/// remainders below this (mL) are float noise
const VOLUME_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct BulkRequest {
    pub students: u32,
    pub volume_per_student_ml: f64,
    pub extra_volume_percent: f64,
    /// flask sizes the lab wants to use; empty means the configured sizes
    pub preferred_flasks: Vec<u32>,
}

impl BulkRequest {
    pub fn validate(&self) -> Result<(), SolutionError> {
        if self.students == 0 {
            return Err(SolutionError::InvalidBulkParameters(
                "Number of students must be positive.".to_string(),
            ));
        }
        if !(self.volume_per_student_ml > 0.0) {
            return Err(SolutionError::InvalidBulkParameters(
                "Volume per student must be positive.".to_string(),
            ));
        }
        if !(self.extra_volume_percent >= 0.0) {
            return Err(SolutionError::InvalidBulkParameters(
                "Extra volume percentage cannot be negative.".to_string(),
            ));
        }
        if self.preferred_flasks.contains(&0) {
            return Err(SolutionError::InvalidBulkParameters(
                "Flask sizes must be positive.".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BulkAmount {
    Grams(f64),
    /// volume of stock solution; `unit` is "M" or "%"
    StockMillilitres {
        volume_ml: f64,
        stock: f64,
        unit: &'static str,
    },
}

impl fmt::Display for BulkAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BulkAmount::Grams(g) => write!(f, "{:.4} g", g),
            BulkAmount::StockMillilitres {
                volume_ml,
                stock,
                unit,
            } => {
                let sep = if *unit == "%" { "" } else { " " };
                write!(f, "{:.4} mL of {}{}{}", volume_ml, stock, sep, unit)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchPlan {
    /// (number of flasks, flask size in mL), largest size first
    pub batches: Vec<(u32, u32)>,
    /// (flask size, leftover volume in mL)
    pub remainder: Option<(u32, f64)>,
}

impl BatchPlan {
    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .batches
            .iter()
            .map(|(count, flask)| format!("{} x {} mL flask(s)", count, flask))
            .collect();
        if let Some((flask, remaining)) = self.remainder {
            lines.push(format!(
                "1 x {} mL flask for remaining {:.2} mL",
                flask, remaining
            ));
        }
        lines
    }
}

/// Splits `total_ml` over the given flask sizes.
pub fn plan_batches(total_ml: f64, flasks: &[u32]) -> BatchPlan {
    let mut sorted = flasks.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted.dedup();

    let mut plan = BatchPlan::default();
    let mut remaining = total_ml;
    for &flask in &sorted {
        let count = (remaining / flask as f64 + VOLUME_TOLERANCE).floor();
        if count >= 1.0 {
            plan.batches.push((count as u32, flask));
            remaining -= count * flask as f64;
        }
    }
    if remaining > VOLUME_TOLERANCE {
        let closest = flasks
            .iter()
            .copied()
            .min_by(|&a, &b| {
                let distance = |flask: u32| (flask as f64 - remaining).abs();
                distance(a).total_cmp(&distance(b))
            });
        if let Some(flask) = closest {
            plan.remainder = Some((flask, remaining));
        }
    }
    debug!("batches for {} mL: {:?}", total_ml, plan);
    plan
}

#[derive(Debug, Clone, PartialEq)]
pub struct BulkPlan {
    pub title: String,
    pub base_volume_l: f64,
    pub extra_volume_l: f64,
    pub total_volume_l: f64,
    pub amount: BulkAmount,
    pub batches: BatchPlan,
}

/// Total reagent and flask plan for `bulk.students` students. `fallback_flasks` is used when
/// the request names no preferred flask sizes.
pub fn calculate_bulk(
    request: &SolutionRequest,
    bulk: &BulkRequest,
    fallback_flasks: &[u32],
) -> Result<BulkPlan, SolutionError> {
    bulk.validate()?;
    let base_ml = bulk.students as f64 * bulk.volume_per_student_ml;
    let extra_ml = base_ml * bulk.extra_volume_percent / 100.0;
    let total_ml = base_ml + extra_ml;
    let total_l = total_ml / 1000.0;

    let amount = match request.concentration {
        ConcentrationKind::Molarity => {
            let molar_mass = compute_molar_mass(&request.reagent.formula)?;
            let moles = request.value * total_l;
            match request.reagent.liquid_stock() {
                Some(stock) => BulkAmount::StockMillilitres {
                    volume_ml: moles / stock * 1000.0,
                    stock,
                    unit: "M",
                },
                None => BulkAmount::Grams(moles * molar_mass),
            }
        }
        ConcentrationKind::PercentWeightVolume => {
            BulkAmount::Grams(request.value / 100.0 * total_ml)
        }
        ConcentrationKind::PercentVolumeVolume => match request.reagent.liquid_stock() {
            Some(stock) => BulkAmount::StockMillilitres {
                volume_ml: request.value / stock * total_ml,
                stock,
                unit: "%",
            },
            None => return Err(SolutionError::VolumeVolumeNeedsLiquidStock),
        },
    };

    let flasks = if bulk.preferred_flasks.is_empty() {
        fallback_flasks
    } else {
        bulk.preferred_flasks.as_slice()
    };
    if flasks.is_empty() {
        return Err(SolutionError::NoFlaskSelected);
    }
    let batches = plan_batches(total_ml, flasks);
    info!(
        "bulk plan: {} students, {:.3} L of {}",
        bulk.students,
        total_l,
        request.describe()
    );
    Ok(BulkPlan {
        title: format!(
            "Bulk Preparation for {} Students: {}",
            bulk.students,
            request.describe()
        ),
        base_volume_l: base_ml / 1000.0,
        extra_volume_l: extra_ml / 1000.0,
        total_volume_l: total_l,
        amount,
        batches,
    })
}

impl BulkPlan {
    pub fn to_text(&self) -> String {
        let mut text = format!("{}\n", self.title);
        text.push_str(&format!("Base Volume: {:.3} L\n", self.base_volume_l));
        text.push_str(&format!("Extra Volume: {:.3} L\n", self.extra_volume_l));
        text.push_str(&format!("Total Volume: {:.3} L\n", self.total_volume_l));
        match &self.amount {
            BulkAmount::Grams(_) => {
                text.push_str(&format!("Total Solid Required: {}\n", self.amount))
            }
            BulkAmount::StockMillilitres { .. } => {
                text.push_str(&format!("Total Stock Required: {}\n", self.amount))
            }
        }
        text.push_str("Flask Plan:\n");
        for line in self.batches.lines() {
            text.push_str(&format!("  {}\n", line));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Solutions::solution_calculator::Reagent;
    use approx::assert_relative_eq;

    const ALL_FLASKS: [u32; 8] = [10, 25, 50, 100, 250, 500, 1000, 2000];

    fn nacl_request() -> SolutionRequest {
        SolutionRequest::new(
            Reagent::from_catalogue("Sodium Chloride (NaCl)").unwrap(),
            ConcentrationKind::Molarity,
            0.1,
        )
        .unwrap()
    }

    #[test]
    fn test_class_of_two_hundred() {
        let bulk = BulkRequest {
            students: 200,
            volume_per_student_ml: 10.0,
            extra_volume_percent: 10.0,
            preferred_flasks: vec![],
        };
        let plan = calculate_bulk(&nacl_request(), &bulk, &ALL_FLASKS).unwrap();
        assert_relative_eq!(plan.base_volume_l, 2.0);
        assert_relative_eq!(plan.extra_volume_l, 0.2);
        assert_relative_eq!(plan.total_volume_l, 2.2);
        match plan.amount {
            BulkAmount::Grams(g) => assert_relative_eq!(g, 0.22 * 58.45, epsilon = 1e-9),
            ref other => panic!("expected grams, got {:?}", other),
        }
        assert_eq!(plan.batches.batches, vec![(1, 2000), (2, 100)]);
        assert_eq!(plan.batches.remainder, None);
        assert!(plan.to_text().contains("Total Solid Required: 12.8590 g"));
    }

    #[test]
    fn test_remainder_goes_to_closest_flask() {
        let plan = plan_batches(375.0, &[250, 100]);
        assert_eq!(plan.batches, vec![(1, 250), (1, 100)]);
        let (flask, remaining) = plan.remainder.unwrap();
        assert_eq!(flask, 100);
        assert_relative_eq!(remaining, 25.0);
        assert_eq!(
            plan.lines(),
            vec![
                "1 x 250 mL flask(s)",
                "1 x 100 mL flask(s)",
                "1 x 100 mL flask for remaining 25.00 mL"
            ]
        );

        // nothing fits, everything is remainder
        let plan = plan_batches(30.0, &[50, 100]);
        assert!(plan.batches.is_empty());
        assert_eq!(plan.remainder, Some((50, 30.0)));
    }

    #[test]
    fn test_stock_based_bulk() {
        let request = SolutionRequest::new(
            Reagent::from_catalogue("Hydrochloric Acid (HCl)").unwrap(),
            ConcentrationKind::Molarity,
            1.2,
        )
        .unwrap();
        let bulk = BulkRequest {
            students: 20,
            volume_per_student_ml: 50.0,
            extra_volume_percent: 0.0,
            preferred_flasks: vec![500],
        };
        let plan = calculate_bulk(&request, &bulk, &ALL_FLASKS).unwrap();
        assert_eq!(plan.batches.batches, vec![(2, 500)]);
        match plan.amount {
            BulkAmount::StockMillilitres {
                volume_ml, unit, ..
            } => {
                assert_relative_eq!(volume_ml, 100.0, epsilon = 1e-9);
                assert_eq!(unit, "M");
            }
            ref other => panic!("expected stock volume, got {:?}", other),
        }
        assert_eq!(plan.amount.to_string(), "100.0000 mL of 12 M");
    }

    #[test]
    fn test_invalid_bulk_parameters() {
        let mut bulk = BulkRequest {
            students: 0,
            volume_per_student_ml: 10.0,
            extra_volume_percent: 10.0,
            preferred_flasks: vec![],
        };
        assert!(matches!(
            calculate_bulk(&nacl_request(), &bulk, &ALL_FLASKS),
            Err(SolutionError::InvalidBulkParameters(_))
        ));
        bulk.students = 10;
        bulk.extra_volume_percent = -5.0;
        assert!(matches!(
            calculate_bulk(&nacl_request(), &bulk, &ALL_FLASKS),
            Err(SolutionError::InvalidBulkParameters(_))
        ));
        bulk.extra_volume_percent = 5.0;
        assert_eq!(
            calculate_bulk(&nacl_request(), &bulk, &[]).unwrap_err(),
            SolutionError::NoFlaskSelected
        );
    }
}
