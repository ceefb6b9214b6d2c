pub mod cubic;
pub mod is_zero;
pub mod quadratic;
pub mod quartic;
