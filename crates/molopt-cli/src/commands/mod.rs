pub mod energy;
pub mod relax;
