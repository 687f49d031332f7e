pub mod cart_service;
pub mod contact_service;
pub mod order_service;
pub mod review_service;
pub mod subscription_service;
