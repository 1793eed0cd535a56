pub mod cookies;
pub mod errors;
pub mod flash;

pub use cookies::{redirect_with, request_cookies, with_cookies, CookieSettings};
pub use errors::HttpError;
pub use flash::{Flash, FlashLevel};
