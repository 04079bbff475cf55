//! Element table: symbol -> relative atomic mass.
//!
//! Symbols are case-sensitive (one upper-case letter optionally followed by one
//! lower-case letter). Masses are the rounded standard atomic weights used on
//! laboratory preparation sheets, so `H2O` gives 18.02 g/mol and `CuSO4` 159.62 g/mol.
use std::collections::HashMap;
use std::sync::LazyLock;

/// symbol and relative atomic mass of a chemical element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element {
    pub name: &'static str,
    pub atomic_mass: f64,
}

// Elements 1..103
pub const ELEMENTS: &[Element] = &[
    Element {
        name: "H",
        atomic_mass: 1.01,
    },
    Element {
        name: "He",
        atomic_mass: 4.0,
    },
    Element {
        name: "Li",
        atomic_mass: 6.94,
    },
    Element {
        name: "Be",
        atomic_mass: 9.01,
    },
    Element {
        name: "B",
        atomic_mass: 10.81,
    },
    Element {
        name: "C",
        atomic_mass: 12.01,
    },
    Element {
        name: "N",
        atomic_mass: 14.01,
    },
    Element {
        name: "O",
        atomic_mass: 16.0,
    },
    Element {
        name: "F",
        atomic_mass: 19.0,
    },
    Element {
        name: "Ne",
        atomic_mass: 20.18,
    },
    Element {
        name: "Na",
        atomic_mass: 23.0,
    },
    Element {
        name: "Mg",
        atomic_mass: 24.31,
    },
    Element {
        name: "Al",
        atomic_mass: 26.98,
    },
    Element {
        name: "Si",
        atomic_mass: 28.09,
    },
    Element {
        name: "P",
        atomic_mass: 30.97,
    },
    Element {
        name: "S",
        atomic_mass: 32.07,
    },
    Element {
        name: "Cl",
        atomic_mass: 35.45,
    },
    Element {
        name: "Ar",
        atomic_mass: 39.95,
    },
    Element {
        name: "K",
        atomic_mass: 39.1,
    },
    Element {
        name: "Ca",
        atomic_mass: 40.08,
    },
    Element {
        name: "Sc",
        atomic_mass: 44.96,
    },
    Element {
        name: "Ti",
        atomic_mass: 47.87,
    },
    Element {
        name: "V",
        atomic_mass: 50.94,
    },
    Element {
        name: "Cr",
        atomic_mass: 52.0,
    },
    Element {
        name: "Mn",
        atomic_mass: 54.94,
    },
    Element {
        name: "Fe",
        atomic_mass: 55.85,
    },
    Element {
        name: "Co",
        atomic_mass: 58.93,
    },
    Element {
        name: "Ni",
        atomic_mass: 58.69,
    },
    Element {
        name: "Cu",
        atomic_mass: 63.55,
    },
    Element {
        name: "Zn",
        atomic_mass: 65.38,
    },
    Element {
        name: "Ga",
        atomic_mass: 69.72,
    },
    Element {
        name: "Ge",
        atomic_mass: 72.63,
    },
    Element {
        name: "As",
        atomic_mass: 74.92,
    },
    Element {
        name: "Se",
        atomic_mass: 78.97,
    },
    Element {
        name: "Br",
        atomic_mass: 79.9,
    },
    Element {
        name: "Kr",
        atomic_mass: 83.8,
    },
    Element {
        name: "Rb",
        atomic_mass: 85.47,
    },
    Element {
        name: "Sr",
        atomic_mass: 87.62,
    },
    Element {
        name: "Y",
        atomic_mass: 88.91,
    },
    Element {
        name: "Zr",
        atomic_mass: 91.22,
    },
    Element {
        name: "Nb",
        atomic_mass: 92.91,
    },
    Element {
        name: "Mo",
        atomic_mass: 95.95,
    },
    Element {
        name: "Tc",
        atomic_mass: 98.0,
    },
    Element {
        name: "Ru",
        atomic_mass: 101.07,
    },
    Element {
        name: "Rh",
        atomic_mass: 102.91,
    },
    Element {
        name: "Pd",
        atomic_mass: 106.42,
    },
    Element {
        name: "Ag",
        atomic_mass: 107.87,
    },
    Element {
        name: "Cd",
        atomic_mass: 112.41,
    },
    Element {
        name: "In",
        atomic_mass: 114.82,
    },
    Element {
        name: "Sn",
        atomic_mass: 118.71,
    },
    Element {
        name: "Sb",
        atomic_mass: 121.76,
    },
    Element {
        name: "Te",
        atomic_mass: 127.6,
    },
    Element {
        name: "I",
        atomic_mass: 126.9,
    },
    Element {
        name: "Xe",
        atomic_mass: 131.29,
    },
    Element {
        name: "Cs",
        atomic_mass: 132.91,
    },
    Element {
        name: "Ba",
        atomic_mass: 137.33,
    },
    Element {
        name: "La",
        atomic_mass: 138.91,
    },
    Element {
        name: "Ce",
        atomic_mass: 140.12,
    },
    Element {
        name: "Pr",
        atomic_mass: 140.91,
    },
    Element {
        name: "Nd",
        atomic_mass: 144.24,
    },
    Element {
        name: "Pm",
        atomic_mass: 145.0,
    },
    Element {
        name: "Sm",
        atomic_mass: 150.36,
    },
    Element {
        name: "Eu",
        atomic_mass: 151.96,
    },
    Element {
        name: "Gd",
        atomic_mass: 157.25,
    },
    Element {
        name: "Tb",
        atomic_mass: 158.93,
    },
    Element {
        name: "Dy",
        atomic_mass: 162.5,
    },
    Element {
        name: "Ho",
        atomic_mass: 164.93,
    },
    Element {
        name: "Er",
        atomic_mass: 167.26,
    },
    Element {
        name: "Tm",
        atomic_mass: 168.93,
    },
    Element {
        name: "Yb",
        atomic_mass: 173.05,
    },
    Element {
        name: "Lu",
        atomic_mass: 174.97,
    },
    Element {
        name: "Hf",
        atomic_mass: 178.49,
    },
    Element {
        name: "Ta",
        atomic_mass: 180.95,
    },
    Element {
        name: "W",
        atomic_mass: 183.84,
    },
    Element {
        name: "Re",
        atomic_mass: 186.21,
    },
    Element {
        name: "Os",
        atomic_mass: 190.23,
    },
    Element {
        name: "Ir",
        atomic_mass: 192.22,
    },
    Element {
        name: "Pt",
        atomic_mass: 195.08,
    },
    Element {
        name: "Au",
        atomic_mass: 196.97,
    },
    Element {
        name: "Hg",
        atomic_mass: 200.59,
    },
    Element {
        name: "Tl",
        atomic_mass: 204.38,
    },
    Element {
        name: "Pb",
        atomic_mass: 207.2,
    },
    Element {
        name: "Bi",
        atomic_mass: 208.98,
    },
    Element {
        name: "Po",
        atomic_mass: 209.0,
    },
    Element {
        name: "At",
        atomic_mass: 210.0,
    },
    Element {
        name: "Rn",
        atomic_mass: 222.0,
    },
    Element {
        name: "Fr",
        atomic_mass: 223.0,
    },
    Element {
        name: "Ra",
        atomic_mass: 226.0,
    },
    Element {
        name: "Ac",
        atomic_mass: 227.0,
    },
    Element {
        name: "Th",
        atomic_mass: 232.04,
    },
    Element {
        name: "Pa",
        atomic_mass: 231.04,
    },
    Element {
        name: "U",
        atomic_mass: 238.03,
    },
    Element {
        name: "Np",
        atomic_mass: 237.0,
    },
    Element {
        name: "Pu",
        atomic_mass: 244.0,
    },
    Element {
        name: "Am",
        atomic_mass: 243.0,
    },
    Element {
        name: "Cm",
        atomic_mass: 247.0,
    },
    Element {
        name: "Bk",
        atomic_mass: 247.0,
    },
    Element {
        name: "Cf",
        atomic_mass: 251.0,
    },
    Element {
        name: "Es",
        atomic_mass: 252.0,
    },
    Element {
        name: "Fm",
        atomic_mass: 257.0,
    },
    Element {
        name: "Md",
        atomic_mass: 258.0,
    },
    Element {
        name: "No",
        atomic_mass: 259.0,
    },
    Element {
        name: "Lr",
        atomic_mass: 262.0,
    },
];

static ELEMENT_INDEX: LazyLock<HashMap<&'static str, f64>> = LazyLock::new(|| {
    ELEMENTS
        .iter()
        .map(|element| (element.name, element.atomic_mass))
        .collect()
});

/// relative atomic mass of the element, None if the symbol is not in the table
pub fn atomic_mass(symbol: &str) -> Option<f64> {
    ELEMENT_INDEX.get(symbol).copied()
}

pub fn is_element(symbol: &str) -> bool {
    ELEMENT_INDEX.contains_key(symbol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::HashSet;

    #[test]
    fn test_table_is_complete_and_unique() {
        assert_eq!(ELEMENTS.len(), 103);
        let unique: HashSet<&str> = ELEMENTS.iter().map(|e| e.name).collect();
        assert_eq!(unique.len(), ELEMENTS.len());
        assert!(ELEMENTS.iter().all(|e| e.atomic_mass > 0.0));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_relative_eq!(atomic_mass("Co").unwrap(), 58.93);
        assert_relative_eq!(atomic_mass("O").unwrap(), 16.0);
        assert!(atomic_mass("CO").is_none());
        assert!(atomic_mass("co").is_none());
        assert!(!is_element("Xx"));
        assert!(is_element("Lr"));
    }
}
