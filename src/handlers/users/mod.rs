pub mod create;
pub mod get;
pub mod login;

use serde::Serialize;

use crate::database::models::UserResponse;

pub use create::create_user;
pub use get::get_user;
pub use login::login_user;

pub const CREDENTIALS_REQUIRED: &str = "username and password are required";

#[derive(Debug, Serialize)]
pub struct UserBody {
    pub user: UserResponse,
}
