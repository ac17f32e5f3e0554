// src/services/mod.rs
pub mod cart;
pub mod catalog;
pub mod chatbot;
pub mod completion;
pub mod recommender;
pub mod session_manager;
pub mod storefront;
