pub mod xyrr;
pub mod xyrrt;
