use crate::domain::Gender;
use crate::markup::{VERIFICATION_TOKEN_FIELD, VerificationToken};
use fake::Fake;
use fake::faker::internet::en::{Password, SafeEmail};
use fake::faker::name::en::{FirstName, LastName};
use rand::Rng;
use secrecy::{ExposeSecret, Secret};

/// A fictitious shop customer, fresh for every test.
#[derive(Debug)]
pub struct Identity {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: Gender,
    pub password: Secret<String>,
}

/// Urlencoded body of the registration post, in the field order of the form.
pub type RegistrationForm = Vec<(&'static str, String)>;

impl Identity {
    pub fn generate() -> Self {
        Self::generate_with_rng(&mut rand::thread_rng())
    }

    pub fn generate_with_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let password: String = Password(8..16).fake_with_rng(rng);
        Self {
            first_name: FirstName().fake_with_rng(rng),
            last_name: LastName().fake_with_rng(rng),
            email: unique_email(rng),
            gender: Gender::random_with_rng(rng),
            password: Secret::new(password),
        }
    }

    /// New profile values for an existing account. The password is kept,
    /// the profile form cannot change it.
    pub fn with_new_profile(&self) -> Self {
        let mut rng = rand::thread_rng();
        Self {
            password: Secret::new(self.password.expose_secret().clone()),
            ..Self::generate_with_rng(&mut rng)
        }
    }

    pub fn registration_form(&self, token: &VerificationToken) -> RegistrationForm {
        let password = self.password.expose_secret();
        vec![
            ("Gender", self.gender.api_code().to_string()),
            ("FirstName", self.first_name.clone()),
            ("LastName", self.last_name.clone()),
            ("Email", self.email.clone()),
            ("Password", password.clone()),
            ("ConfirmPassword", password.clone()),
            (VERIFICATION_TOKEN_FIELD, token.as_ref().to_owned()),
        ]
    }
}

// The shop rejects duplicate emails, so a random local-part prefix keeps
// repeated runs against the same server apart.
fn unique_email<R: Rng + ?Sized>(rng: &mut R) -> String {
    let email: String = SafeEmail().fake_with_rng(rng);
    format!("{:08x}.{}", rng.r#gen::<u32>(), email)
}
