//! Database entities module

pub mod attachment_download_log;
pub mod order_product_online;
pub mod product;
pub mod product_category;
pub mod region;
pub mod request_log;
pub mod request_type;
pub mod search_product;
pub mod subproduct;
pub mod user;
pub mod user_activity;
pub mod wishlist;

pub use attachment_download_log::Entity as AttachmentDownloadLog;
pub use order_product_online::Entity as OrderProductOnline;
pub use product::Entity as Product;
pub use product_category::Entity as ProductCategory;
pub use region::Entity as Region;
pub use request_log::Entity as RequestLog;
pub use request_type::Entity as RequestType;
pub use search_product::Entity as SearchProduct;
pub use subproduct::Entity as Subproduct;
pub use user::Entity as User;
pub use user_activity::Entity as UserActivity;
pub use wishlist::Entity as Wishlist;
