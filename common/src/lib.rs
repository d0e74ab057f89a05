pub mod chat;
pub mod circle;
pub mod identity;
pub mod location;
pub mod notification;
pub mod order;
pub mod product;
pub mod recommend;
pub mod snapshot;
