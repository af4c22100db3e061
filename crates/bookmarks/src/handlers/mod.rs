pub mod ajax;
pub mod error;
pub mod flash;
pub mod health;
pub mod images;
pub mod templates;
