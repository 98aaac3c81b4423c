//! CSS selectors, paths and texts of the shop's DOM.

use crate::domain::Gender;

pub use crate::api_client::REGISTER_PATH;
pub const CUSTOMER_INFO_PATH: &str = "/customer/info";
pub const HOME_PATH: &str = "/";

pub const FIRST_NAME_INPUT: &str = "#FirstName";
pub const LAST_NAME_INPUT: &str = "#LastName";
pub const EMAIL_INPUT: &str = "#Email";
pub const PASSWORD_INPUT: &str = "#Password";
pub const CONFIRM_PASSWORD_INPUT: &str = "#ConfirmPassword";
pub const REGISTER_BUTTON: &str = "#register-button";
pub const SAVE_CUSTOMER_INFO_BUTTON: &str = ".save-customer-info-button";

pub const REGISTRATION_RESULT: &str = ".registration-result-page";
pub const REGISTRATION_COMPLETED_TEXT: &str = "Your registration completed";

/// Header link that shows the logged-in customer's email.
pub const ACCOUNT_LINK: &str = ".account";

/// Radio button for `gender`, as in `.gender #gender-female`.
pub fn gender_radio(gender: Gender) -> String {
    format!(".gender #gender-{}", gender.selector_fragment())
}
