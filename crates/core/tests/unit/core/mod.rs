

/// FCLASS.S classification.
pub mod fclass;
