//! Messaging adapters for the MessageProducer port.

mod in_memory;
mod redis_producer;

pub use in_memory::InMemoryMessageProducer;
pub use redis_producer::RedisMessageProducer;
