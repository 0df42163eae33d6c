//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id, tunable work factor, optional pepper)
//! - Bearer token signing (HS256 JWT)

pub mod password;
pub mod token;
