//! Cache module - Redis client and the Redis-backed OTP session store

pub mod otp_store;
pub mod redis_client;

pub use otp_store::RedisOtpStore;
pub use redis_client::RedisClient;
