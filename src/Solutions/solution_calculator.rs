//! # Solution preparation calculator
//!
//! ## Aim
//! For a reagent, a target concentration and a set of volumetric flasks, computes how much
//! solid to weigh or how much stock solution to pipette for every flask, and writes out the
//! bench steps with the instrument suited for the amount.
//!
//! ## Main Data Structures and Logic
//! - `Reagent`: catalogue entry or custom formula, optionally with a stock concentration
//! - `ConcentrationKind`: molarity, % w/v or % v/v
//! - `SolutionRequest`: reagent + concentration, validated on construction
//! - `FlaskPreparation`: amount and steps for one flask
//! - `SolutionReport`: all flasks plus molar mass and safety advice; printable as a table
//!
//! ## Usage
//! ```rust
//! use ChemPrac::Solutions::solution_calculator::{ConcentrationKind, Reagent, SolutionRequest, calculate_solution};
//! let reagent = Reagent::from_catalogue("Sodium Chloride (NaCl)").unwrap();
//! let request = SolutionRequest::new(reagent, ConcentrationKind::Molarity, 0.1).unwrap();
//! let report = calculate_solution(&request, &[100, 250]).unwrap();
//! report.pretty_print();
//! ```
use crate::Solutions::chemical_catalogue::{
    GENERAL_SAFETY, ReagentKind, find_chemical, safety_for_formula,
};
use crate::Stoichiometry::molmass::{compute_molar_mass, format_molar_mass};
use crate::Stoichiometry::stoich_errors::StoichError;
use log::info;
use prettytable::{Table, row};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SolutionError {
    #[error(transparent)]
    Formula(#[from] StoichError),
    #[error("Unknown chemical: {0}")]
    UnknownChemical(String),
    #[error("Please select at least one flask size.")]
    NoFlaskSelected,
    #[error("Concentration value must be positive.")]
    NonPositiveConcentration,
    #[error("Stock concentration must be positive.")]
    NonPositiveStock,
    #[error("Percentage (% v/v) requires a liquid with a stock concentration.")]
    VolumeVolumeNeedsLiquidStock,
    #[error("{0}")]
    InvalidBulkParameters(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConcentrationKind {
    Molarity,
    PercentWeightVolume,
    PercentVolumeVolume,
}

impl ConcentrationKind {
    pub const ALL: [ConcentrationKind; 3] = [
        ConcentrationKind::Molarity,
        ConcentrationKind::PercentWeightVolume,
        ConcentrationKind::PercentVolumeVolume,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ConcentrationKind::Molarity => "Molarity (M)",
            ConcentrationKind::PercentWeightVolume => "Percentage (% w/v)",
            ConcentrationKind::PercentVolumeVolume => "Percentage (% v/v)",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.label() == label.trim())
    }
}

impl fmt::Display for ConcentrationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reagent {
    pub display_name: String,
    pub formula: String,
    pub kind: ReagentKind,
    pub stock_concentration: Option<f64>,
    pub safety: String,
}

impl Reagent {
    pub fn from_catalogue(name: &str) -> Result<Self, SolutionError> {
        let info = find_chemical(name)
            .ok_or_else(|| SolutionError::UnknownChemical(name.to_string()))?;
        Ok(Self {
            display_name: info.name.to_string(),
            formula: info.formula.to_string(),
            kind: info.kind,
            stock_concentration: info.stock_concentration,
            safety: info.safety.to_string(),
        })
    }

    /// reagent typed in by the user: treated as a solid, safety guessed from the formula
    pub fn custom(formula: &str) -> Self {
        let formula = formula.trim();
        Self {
            display_name: formula.to_string(),
            formula: formula.to_string(),
            kind: ReagentKind::Solid,
            stock_concentration: None,
            safety: safety_for_formula(formula).to_string(),
        }
    }

    /// Overrides the stock concentration. For molarity and % v/v the reagent is then
    /// measured as a liquid.
    pub fn with_stock(
        mut self,
        stock: f64,
        concentration: ConcentrationKind,
    ) -> Result<Self, SolutionError> {
        if !(stock > 0.0) {
            return Err(SolutionError::NonPositiveStock);
        }
        self.stock_concentration = Some(stock);
        if matches!(
            concentration,
            ConcentrationKind::Molarity | ConcentrationKind::PercentVolumeVolume
        ) {
            self.kind = ReagentKind::Liquid;
        }
        Ok(self)
    }

    /// stock concentration if the reagent is measured by volume
    pub fn liquid_stock(&self) -> Option<f64> {
        match self.kind {
            ReagentKind::Liquid => self.stock_concentration,
            ReagentKind::Solid => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolutionRequest {
    pub reagent: Reagent,
    pub concentration: ConcentrationKind,
    pub value: f64,
}

impl SolutionRequest {
    pub fn new(
        reagent: Reagent,
        concentration: ConcentrationKind,
        value: f64,
    ) -> Result<Self, SolutionError> {
        if !(value > 0.0) {
            return Err(SolutionError::NonPositiveConcentration);
        }
        Ok(Self {
            reagent,
            concentration,
            value,
        })
    }

    /// "0.1 Molarity (M) Sodium Chloride (NaCl)"
    pub fn describe(&self) -> String {
        format!(
            "{} {} {}",
            self.value, self.concentration, self.reagent.display_name
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Amount {
    Grams(f64),
    Millilitres(f64),
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Grams(g) => write!(f, "{:.4} g", g),
            Amount::Millilitres(ml) => write!(f, "{:.4} mL", ml),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlaskPreparation {
    pub flask_ml: u32,
    pub amount: Amount,
    pub steps: Vec<String>,
}

/// analytical balance and its readability for the mass to weigh
pub fn choose_balance(grams: f64) -> (&'static str, &'static str) {
    let precision = if grams < 0.1 {
        "0.1 mg"
    } else if grams < 1.0 {
        "1 mg"
    } else {
        "10 mg"
    };
    let balance = if grams < 1.0 {
        "Ohaus Navigator"
    } else {
        "Sartorius Entris"
    };
    (balance, precision)
}

pub fn choose_pipette(millilitres: f64) -> &'static str {
    if millilitres > 15.0 {
        "Fixed 25 mL Pipette"
    } else if millilitres > 5.0 {
        "Fixed 10 mL Pipette"
    } else {
        "Gilson Pipetman (5 mL)"
    }
}

fn weighing(grams: f64, flask_ml: u32) -> FlaskPreparation {
    let (balance, precision) = choose_balance(grams);
    FlaskPreparation {
        flask_ml,
        amount: Amount::Grams(grams),
        steps: vec![
            format!(
                "1. Weigh {:.4} g using {} (precision: {})",
                grams, balance, precision
            ),
            format!("2. Transfer to {} mL beaker with distilled water", flask_ml / 2),
            "3. Stir with magnetic stirrer until dissolved".to_string(),
            format!("4. Transfer to {} mL flask via funnel", flask_ml),
            "5. Rinse beaker/funnel, add to flask".to_string(),
            "6. Fill to mark with water, mix".to_string(),
        ],
    }
}

fn pipetting(millilitres: f64, flask_ml: u32) -> FlaskPreparation {
    FlaskPreparation {
        flask_ml,
        amount: Amount::Millilitres(millilitres),
        steps: vec![
            format!(
                "1. Measure {:.4} mL with {}",
                millilitres,
                choose_pipette(millilitres)
            ),
            format!("2. Transfer to {} mL flask", flask_ml),
            "3. Fill to mark with water, mix".to_string(),
        ],
    }
}

/// Amount and steps for one flask of `flask_ml` millilitres.
pub fn prepare_flask(
    request: &SolutionRequest,
    molar_mass: f64,
    flask_ml: u32,
) -> Result<FlaskPreparation, SolutionError> {
    let volume_l = flask_ml as f64 / 1000.0;
    let preparation = match request.concentration {
        ConcentrationKind::Molarity => {
            let moles = request.value * volume_l;
            match request.reagent.liquid_stock() {
                Some(stock_molarity) => pipetting(moles / stock_molarity * 1000.0, flask_ml),
                None => weighing(moles * molar_mass, flask_ml),
            }
        }
        ConcentrationKind::PercentWeightVolume => {
            weighing(request.value / 100.0 * flask_ml as f64, flask_ml)
        }
        ConcentrationKind::PercentVolumeVolume => match request.reagent.liquid_stock() {
            Some(stock_percent) => {
                pipetting(request.value / stock_percent * flask_ml as f64, flask_ml)
            }
            None => return Err(SolutionError::VolumeVolumeNeedsLiquidStock),
        },
    };
    Ok(preparation)
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolutionReport {
    pub title: String,
    pub molar_mass: f64,
    pub preparations: Vec<FlaskPreparation>,
    pub safety: String,
}

/// Preparation of the requested solution in every selected flask.
pub fn calculate_solution(
    request: &SolutionRequest,
    flasks: &[u32],
) -> Result<SolutionReport, SolutionError> {
    if flasks.is_empty() {
        return Err(SolutionError::NoFlaskSelected);
    }
    let molar_mass = compute_molar_mass(&request.reagent.formula)?;
    let preparations = flasks
        .iter()
        .map(|&flask_ml| prepare_flask(request, molar_mass, flask_ml))
        .collect::<Result<Vec<_>, _>>()?;
    info!(
        "solution report for {} over {} flask(s)",
        request.describe(),
        preparations.len()
    );
    Ok(SolutionReport {
        title: format!("Solution Preparation Report for {}", request.describe()),
        molar_mass,
        preparations,
        safety: request.reagent.safety.clone(),
    })
}

impl SolutionReport {
    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(row!["Flask Size (mL)", "Amount", "Steps"]);
        for p in &self.preparations {
            table.add_row(row![p.flask_ml, p.amount, p.steps.join("\n")]);
        }
        table
    }

    pub fn pretty_print(&self) {
        println!("{}", self.title);
        println!("Molar Mass: {}", format_molar_mass(self.molar_mass));
        self.to_table().printstd();
        println!("Safety Precautions (Applicable to All Sizes):");
        println!("{}", self.safety);
        println!("{}", GENERAL_SAFETY);
    }

    /// plain text version of the report, e.g. for saving or copying
    pub fn to_text(&self) -> String {
        let mut text = format!(
            "{}\nMolar Mass: {}\n\n",
            self.title,
            format_molar_mass(self.molar_mass)
        );
        for p in &self.preparations {
            text.push_str(&format!("{} mL flask: {}\n", p.flask_ml, p.amount));
            for step in &p.steps {
                text.push_str(&format!("    {}\n", step));
            }
        }
        text.push_str(&format!(
            "\nSafety Precautions (Applicable to All Sizes):\n{}\n{}\n",
            self.safety, GENERAL_SAFETY
        ));
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn grams(amount: Amount) -> f64 {
        match amount {
            Amount::Grams(g) => g,
            Amount::Millilitres(ml) => panic!("expected grams, got {} mL", ml),
        }
    }

    fn millilitres(amount: Amount) -> f64 {
        match amount {
            Amount::Millilitres(ml) => ml,
            Amount::Grams(g) => panic!("expected mL, got {} g", g),
        }
    }

    #[test]
    fn test_molarity_of_solid() {
        let reagent = Reagent::from_catalogue("Sodium Chloride (NaCl)").unwrap();
        let request = SolutionRequest::new(reagent, ConcentrationKind::Molarity, 0.1).unwrap();
        let report = calculate_solution(&request, &[100, 1000]).unwrap();
        assert_eq!(
            report.title,
            "Solution Preparation Report for 0.1 Molarity (M) Sodium Chloride (NaCl)"
        );
        assert_relative_eq!(grams(report.preparations[0].amount), 0.5845, epsilon = 1e-9);
        assert_relative_eq!(grams(report.preparations[1].amount), 5.845, epsilon = 1e-9);
        let steps = &report.preparations[0].steps;
        assert_eq!(steps.len(), 6);
        assert_eq!(steps[0], "1. Weigh 0.5845 g using Ohaus Navigator (precision: 1 mg)");
        assert_eq!(steps[1], "2. Transfer to 50 mL beaker with distilled water");
        assert!(report.preparations[1].steps[0].contains("Sartorius Entris"));
    }

    #[test]
    fn test_molarity_from_stock() {
        // 1 M HCl from the 12 M bottle
        let reagent = Reagent::from_catalogue("Hydrochloric Acid (HCl)").unwrap();
        let request = SolutionRequest::new(reagent, ConcentrationKind::Molarity, 1.0).unwrap();
        let report = calculate_solution(&request, &[50, 250]).unwrap();
        assert_relative_eq!(
            millilitres(report.preparations[0].amount),
            50.0 / 12.0,
            epsilon = 1e-9
        );
        assert!(report.preparations[0].steps[0].ends_with("Gilson Pipetman (5 mL)"));
        assert!(report.preparations[1].steps[0].ends_with("Fixed 25 mL Pipette"));
        assert_eq!(report.preparations[1].steps.len(), 3);
    }

    #[test]
    fn test_percent_solutions() {
        let reagent = Reagent::custom("CuSO4");
        let request =
            SolutionRequest::new(reagent, ConcentrationKind::PercentWeightVolume, 5.0).unwrap();
        let prep = prepare_flask(&request, 159.62, 250).unwrap();
        assert_relative_eq!(grams(prep.amount), 12.5);

        let ethanol = Reagent::from_catalogue("Ethanol (C2H5OH)").unwrap();
        let request =
            SolutionRequest::new(ethanol, ConcentrationKind::PercentVolumeVolume, 70.0).unwrap();
        let prep = prepare_flask(&request, 46.07, 100).unwrap();
        assert_relative_eq!(millilitres(prep.amount), 70.0 / 95.0 * 100.0, epsilon = 1e-9);

        let salt = Reagent::custom("NaCl");
        let request =
            SolutionRequest::new(salt, ConcentrationKind::PercentVolumeVolume, 10.0).unwrap();
        assert_eq!(
            calculate_solution(&request, &[100]).unwrap_err(),
            SolutionError::VolumeVolumeNeedsLiquidStock
        );
    }

    #[test]
    fn test_stock_override_makes_liquid() {
        let reagent = Reagent::custom("NH3")
            .with_stock(15.0, ConcentrationKind::Molarity)
            .unwrap();
        assert_eq!(reagent.kind, ReagentKind::Liquid);
        assert_eq!(reagent.liquid_stock(), Some(15.0));
        let reagent = Reagent::custom("NaCl")
            .with_stock(5.0, ConcentrationKind::PercentWeightVolume)
            .unwrap();
        assert_eq!(reagent.liquid_stock(), None);
        assert_eq!(
            Reagent::custom("NaCl")
                .with_stock(0.0, ConcentrationKind::Molarity)
                .unwrap_err(),
            SolutionError::NonPositiveStock
        );
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            SolutionRequest::new(Reagent::custom("NaCl"), ConcentrationKind::Molarity, 0.0)
                .unwrap_err(),
            SolutionError::NonPositiveConcentration
        );
        let request =
            SolutionRequest::new(Reagent::custom("NaCl"), ConcentrationKind::Molarity, 1.0)
                .unwrap();
        assert_eq!(
            calculate_solution(&request, &[]).unwrap_err(),
            SolutionError::NoFlaskSelected
        );
        let request =
            SolutionRequest::new(Reagent::custom("NaXx"), ConcentrationKind::Molarity, 1.0)
                .unwrap();
        assert_eq!(
            calculate_solution(&request, &[100]).unwrap_err(),
            SolutionError::Formula(StoichError::UnknownElement("Xx".to_string()))
        );
        assert!(matches!(
            Reagent::from_catalogue("Gold Dust (Au)"),
            Err(SolutionError::UnknownChemical(_))
        ));
    }

    #[test]
    fn test_instruments() {
        assert_eq!(choose_balance(0.05), ("Ohaus Navigator", "0.1 mg"));
        assert_eq!(choose_balance(0.5), ("Ohaus Navigator", "1 mg"));
        assert_eq!(choose_balance(5.0), ("Sartorius Entris", "10 mg"));
        assert_eq!(choose_pipette(20.0), "Fixed 25 mL Pipette");
        assert_eq!(choose_pipette(10.0), "Fixed 10 mL Pipette");
        assert_eq!(choose_pipette(5.0), "Gilson Pipetman (5 mL)");
    }

    #[test]
    fn test_report_text() {
        let request = SolutionRequest::new(
            Reagent::from_catalogue("Potassium Iodide (KI)").unwrap(),
            ConcentrationKind::Molarity,
            0.5,
        )
        .unwrap();
        let report = calculate_solution(&request, &[25]).unwrap();
        let text = report.to_text();
        assert!(text.contains("Molar Mass: 166.00 g/mol"));
        assert!(text.contains("25 mL flask: 2.0750 g"));
        assert!(text.contains(GENERAL_SAFETY));
        assert_eq!(
            ConcentrationKind::from_label("Percentage (% v/v)"),
            Some(ConcentrationKind::PercentVolumeVolume)
        );
    }
}
