/// Reagents of the school laboratory: stock concentrations and safety advice
pub mod chemical_catalogue;
/// Amount of reagent and bench steps for a solution in each selected volumetric flask
///
///  # Examples
/// ```
/// use ChemPrac::Solutions::solution_calculator::{ConcentrationKind, Reagent, SolutionRequest, calculate_solution};
/// let reagent = Reagent::from_catalogue("Potassium Iodide (KI)").unwrap();
/// let request = SolutionRequest::new(reagent, ConcentrationKind::Molarity, 0.5).unwrap();
/// let report = calculate_solution(&request, &[25]).unwrap();
/// assert_eq!(report.preparations[0].amount.to_string(), "2.0750 g");
/// ```
pub mod solution_calculator;
/// Solution for a whole class, split over volumetric flasks
pub mod bulk_preparation;
