pub mod feature;
pub mod olimpiad;
