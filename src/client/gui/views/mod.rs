pub mod admin;
pub mod chat;
pub mod chat_list;
pub mod items;
pub mod logger;
pub mod login;
pub mod register;
pub mod reset_otp;
pub mod reset_password;
pub mod reset_request;
pub mod upload;
