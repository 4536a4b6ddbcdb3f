pub mod auth_handler;

pub use auth_handler::{
    __path_change_password, __path_login, __path_refresh_token, __path_register, change_password,
    login, refresh_token, register,
};
