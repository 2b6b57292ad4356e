pub mod auth;
pub mod flash;
pub mod hasher;
