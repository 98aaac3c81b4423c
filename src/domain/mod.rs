mod gender;
mod identity;

pub use gender::Gender;
pub use identity::{Identity, RegistrationForm};
