pub mod feature;
pub mod health;
pub mod olimpiad;
