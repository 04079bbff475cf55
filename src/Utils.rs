/// parsing and conversion of stock quantities ("10 mL", "2.5 L", "500 g")
pub mod units;
/// terminal + file logger
pub mod logger;
