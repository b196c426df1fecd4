mod aggregate;
mod repository;

#[cfg(test)]
mod aggregate_test;

pub use aggregate::{Learner, LearnerSnapshot};
pub use repository::LearnerRepository;
