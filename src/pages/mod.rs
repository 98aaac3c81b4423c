//! The shop's pages as the tests see them.

mod customer_info;
mod home;
pub mod locators;
mod registration;

pub use customer_info::CustomerInfoPage;
pub use home::HomePage;
pub use registration::RegistrationPage;
