use admins_core::{models::AdminProfile, signup::SignupForm};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Deserialize, Validate, Default, Debug)]
#[serde(default, rename_all = "camelCase")]
pub struct SignupIn {
    #[validate(length(min = 1, max = 64, message = "First name must be 1 to 64 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 64, message = "Last name must be 1 to 64 characters"))]
    pub last_name: String,
    #[validate(length(max = 32, message = "Phone number is too long"))]
    pub phone_number: String,
}

impl From<SignupIn> for SignupForm {
    fn from(value: SignupIn) -> Self {
        SignupForm::new(value.first_name, value.last_name, value.phone_number)
    }
}

#[derive(Deserialize, Default, Debug)]
#[serde(default, rename_all = "camelCase")]
pub struct UsernamePreviewQuery {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Serialize, Debug)]
pub struct UsernamePreviewOut {
    pub username: String,
}

#[derive(Serialize, Debug)]
pub struct ProfileLoginOut {
    pub username: String,
    pub email: String,
}

impl From<AdminProfile> for ProfileLoginOut {
    fn from(profile: AdminProfile) -> Self {
        Self {
            username: profile.username,
            email: profile.email,
        }
    }
}
