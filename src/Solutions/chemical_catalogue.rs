//! Reagents kept in the school laboratory with their stock concentrations and safety advice,
//! and a rough formula-based safety hint for reagents that are not in the list.
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReagentKind {
    Solid,
    Liquid,
}

impl fmt::Display for ReagentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReagentKind::Solid => f.pad("solid"),
            ReagentKind::Liquid => f.pad("liquid"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChemicalInfo {
    /// display name, "Hydrochloric Acid (HCl)"
    pub name: &'static str,
    pub formula: &'static str,
    /// molarity (M) of the stock bottle, or percent for ethanol; None for solids
    pub stock_concentration: Option<f64>,
    pub kind: ReagentKind,
    pub safety: &'static str,
}

pub const UNKNOWN_SAFETY: &str = "Unknown safety info. Use caution.";
pub const GENERAL_SAFETY: &str =
    "General: Wear PPE (goggles, gloves). Ensure ventilation. Label the solution.";

const CHEMICALS: &[ChemicalInfo] = &[
    ChemicalInfo {
        name: "Hydrochloric Acid (HCl)",
        formula: "HCl",
        stock_concentration: Some(12.0),
        kind: ReagentKind::Liquid,
        safety: "Corrosive. Wear gloves and goggles. Use in a well-ventilated area.",
    },
    ChemicalInfo {
        name: "Sodium Hydroxide (NaOH)",
        formula: "NaOH",
        stock_concentration: None,
        kind: ReagentKind::Solid,
        safety: "Corrosive. Wear gloves and goggles. Avoid skin contact.",
    },
    ChemicalInfo {
        name: "Sulfuric Acid (H2SO4)",
        formula: "H2SO4",
        stock_concentration: Some(18.0),
        kind: ReagentKind::Liquid,
        safety: "Highly corrosive. Wear gloves and goggles. Add acid to water, not vice versa.",
    },
    ChemicalInfo {
        name: "Sodium Chloride (NaCl)",
        formula: "NaCl",
        stock_concentration: None,
        kind: ReagentKind::Solid,
        safety: "Non-hazardous. Wear goggles as a precaution.",
    },
    ChemicalInfo {
        name: "Copper(II) Sulfate (CuSO4)",
        formula: "CuSO4",
        stock_concentration: None,
        kind: ReagentKind::Solid,
        safety: "Toxic if ingested. Wear gloves and goggles.",
    },
    ChemicalInfo {
        name: "Ethanol (C2H5OH)",
        formula: "C2H5OH",
        stock_concentration: Some(95.0),
        kind: ReagentKind::Liquid,
        safety: "Flammable. Keep away from open flames. Use in a ventilated area.",
    },
    ChemicalInfo {
        name: "Sodium Bicarbonate (NaHCO3)",
        formula: "NaHCO3",
        stock_concentration: None,
        kind: ReagentKind::Solid,
        safety: "Non-hazardous. Wear goggles as a precaution.",
    },
    ChemicalInfo {
        name: "Iron(III) Hydroxide (Fe(OH)3)",
        formula: "Fe(OH)3",
        stock_concentration: None,
        kind: ReagentKind::Solid,
        safety: "May be irritating. Wear gloves and goggles.",
    },
    ChemicalInfo {
        name: "Potassium Permanganate (KMnO4)",
        formula: "KMnO4",
        stock_concentration: None,
        kind: ReagentKind::Solid,
        safety: "Oxidizer. Wear gloves and goggles. Avoid contact with combustibles.",
    },
    ChemicalInfo {
        name: "Calcium Carbonate (CaCO3)",
        formula: "CaCO3",
        stock_concentration: None,
        kind: ReagentKind::Solid,
        safety: "Non-hazardous. Wear goggles as a precaution.",
    },
    ChemicalInfo {
        name: "Magnesium Sulfate (MgSO4)",
        formula: "MgSO4",
        stock_concentration: None,
        kind: ReagentKind::Solid,
        safety: "Non-hazardous. Wear goggles as a precaution.",
    },
    ChemicalInfo {
        name: "Nitric Acid (HNO3)",
        formula: "HNO3",
        stock_concentration: Some(15.0),
        kind: ReagentKind::Liquid,
        safety: "Corrosive and oxidizing. Wear gloves and goggles. Use in a fume hood.",
    },
    ChemicalInfo {
        name: "Ammonia (NH3)",
        formula: "NH3",
        stock_concentration: Some(15.0),
        kind: ReagentKind::Liquid,
        safety: "Corrosive and irritating. Wear gloves and goggles. Use in a well-ventilated area.",
    },
    ChemicalInfo {
        name: "Silver Nitrate (AgNO3)",
        formula: "AgNO3",
        stock_concentration: None,
        kind: ReagentKind::Solid,
        safety: "Toxic and corrosive. Wear gloves and goggles. Avoid skin contact.",
    },
    ChemicalInfo {
        name: "Zinc Chloride (ZnCl2)",
        formula: "ZnCl2",
        stock_concentration: None,
        kind: ReagentKind::Solid,
        safety: "Corrosive. Wear gloves and goggles.",
    },
    ChemicalInfo {
        name: "Potassium Chloride (KCl)",
        formula: "KCl",
        stock_concentration: None,
        kind: ReagentKind::Solid,
        safety: "Non-hazardous. Wear goggles as a precaution.",
    },
    ChemicalInfo {
        name: "Sodium Sulfate (Na2SO4)",
        formula: "Na2SO4",
        stock_concentration: None,
        kind: ReagentKind::Solid,
        safety: "Non-hazardous. Wear goggles as a precaution.",
    },
    ChemicalInfo {
        name: "Iron(II) Sulfate (FeSO4)",
        formula: "FeSO4",
        stock_concentration: None,
        kind: ReagentKind::Solid,
        safety: "Toxic if ingested. Wear gloves and goggles.",
    },
    ChemicalInfo {
        name: "Barium Chloride (BaCl2)",
        formula: "BaCl2",
        stock_concentration: None,
        kind: ReagentKind::Solid,
        safety: "Toxic. Wear gloves and goggles. Avoid ingestion.",
    },
    ChemicalInfo {
        name: "Lead(II) Nitrate (Pb(NO3)2)",
        formula: "Pb(NO3)2",
        stock_concentration: None,
        kind: ReagentKind::Solid,
        safety: "Toxic and hazardous. Wear gloves and goggles. Handle with care.",
    },
    ChemicalInfo {
        name: "Magnesium Chloride (MgCl2)",
        formula: "MgCl2",
        stock_concentration: None,
        kind: ReagentKind::Solid,
        safety: "Non-hazardous. Wear goggles as a precaution.",
    },
    ChemicalInfo {
        name: "Potassium Nitrate (KNO3)",
        formula: "KNO3",
        stock_concentration: None,
        kind: ReagentKind::Solid,
        safety: "Oxidizer. Wear gloves and goggles. Avoid contact with combustibles.",
    },
    ChemicalInfo {
        name: "Calcium Chloride (CaCl2)",
        formula: "CaCl2",
        stock_concentration: None,
        kind: ReagentKind::Solid,
        safety: "Irritating. Wear gloves and goggles.",
    },
    ChemicalInfo {
        name: "Sodium Carbonate (Na2CO3)",
        formula: "Na2CO3",
        stock_concentration: None,
        kind: ReagentKind::Solid,
        safety: "Irritating. Wear gloves and goggles.",
    },
    ChemicalInfo {
        name: "Copper(II) Nitrate (Cu(NO3)2)",
        formula: "Cu(NO3)2",
        stock_concentration: None,
        kind: ReagentKind::Solid,
        safety: "Toxic and corrosive. Wear gloves and goggles.",
    },
    ChemicalInfo {
        name: "Aluminum Sulfate (Al2(SO4)3)",
        formula: "Al2(SO4)3",
        stock_concentration: None,
        kind: ReagentKind::Solid,
        safety: "Irritating. Wear gloves and goggles.",
    },
    ChemicalInfo {
        name: "Phosphoric Acid (H3PO4)",
        formula: "H3PO4",
        stock_concentration: Some(14.6),
        kind: ReagentKind::Liquid,
        safety: "Corrosive. Wear gloves and goggles. Use in a well-ventilated area.",
    },
    ChemicalInfo {
        name: "Potassium Iodide (KI)",
        formula: "KI",
        stock_concentration: None,
        kind: ReagentKind::Solid,
        safety: "May be irritating. Wear gloves and goggles.",
    },
];

pub fn all_chemicals() -> &'static [ChemicalInfo] {
    CHEMICALS
}

/// looks a reagent up by its display name
pub fn find_chemical(name: &str) -> Option<&'static ChemicalInfo> {
    CHEMICALS.iter().find(|c| c.name == name.trim())
}

/// looks a reagent up by its formula, e.g. "NaCl"
pub fn find_chemical_by_formula(formula: &str) -> Option<&'static ChemicalInfo> {
    CHEMICALS.iter().find(|c| c.formula == formula.trim())
}

/// Safety hint guessed from the formula, for custom reagents.
pub fn safety_for_formula(formula: &str) -> &'static str {
    let formula = formula.to_lowercase();
    let contains_any = |parts: &[&str]| parts.iter().any(|p| formula.contains(p));
    if contains_any(&["hcl", "h2so4", "hno3", "h3po4"]) {
        "Corrosive. Wear gloves and goggles. Use in a well-ventilated area."
    } else if formula.contains("c2h5oh") {
        "Flammable. Keep away from open flames. Use in a ventilated area."
    } else if formula.contains("oh") {
        "Corrosive. Wear gloves and goggles. Avoid skin contact."
    } else if contains_any(&["cl", "br", "i"]) {
        "May be irritating or toxic. Wear gloves and goggles."
    } else if contains_any(&["no3", "mno4"]) {
        "May be oxidizing or toxic. Wear gloves and goggles."
    } else {
        UNKNOWN_SAFETY
    }
}
