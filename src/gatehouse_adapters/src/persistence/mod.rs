pub mod hashmap_account_store;
pub mod hashmap_verification_code_store;
pub mod postgres_account_store;
pub mod redis_verification_code_store;

pub use hashmap_account_store::HashMapAccountStore;
pub use hashmap_verification_code_store::HashMapVerificationCodeStore;
pub use postgres_account_store::PostgresAccountStore;
pub use redis_verification_code_store::RedisVerificationCodeStore;
