// Domain rules: belt progression, derived student attributes,
// authorization predicates and spreadsheet import normalization.

pub mod access;
pub mod belts;
pub mod derivation;
pub mod import;
