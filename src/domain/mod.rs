pub mod builder;
pub mod cart;
pub mod catalog;
pub mod contact;
pub mod errors;
pub mod nutrition;
pub mod order;
pub mod ports;
pub mod pricing;
pub mod review;
pub mod subscription;
