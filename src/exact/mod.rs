pub mod brute_force;
pub mod held_karp;

pub use brute_force::*;
pub use held_karp::*;
