pub mod dashboard;
pub mod location;
pub mod mapping;
pub mod openweather;
pub mod presentation;

#[cfg(test)]
pub(crate) mod fixtures;
