use rand::Rng;

/// The genders offered by the shop's registration and profile forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn random_with_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            Gender::Male
        } else {
            Gender::Female
        }
    }

    /// Suffix of the radio button id, as in `#gender-male`.
    pub fn selector_fragment(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    /// Value of the `Gender` field in the registration form post.
    pub fn api_code(&self) -> char {
        match self {
            Gender::Male => 'M',
            Gender::Female => 'F',
        }
    }
}

impl AsRef<str> for Gender {
    fn as_ref(&self) -> &str {
        self.selector_fragment()
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.selector_fragment())
    }
}
