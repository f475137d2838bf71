pub mod banners;
pub mod ebooks;
pub mod quiz;
pub mod upload;
