pub mod health;
pub mod kyc;
