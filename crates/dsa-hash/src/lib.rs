//! Hash table backends: separate chaining, open addressing with double
//! hashing, and dynamic linear hashing — three different answers to the
//! same collision-resolution and growth questions.

mod chaining;
mod linear;
mod open_addressing;
mod primes;

pub use chaining::LhashTable;
pub use linear::LinearHashTable;
pub use open_addressing::OhashTable;
pub use primes::next_prime;
