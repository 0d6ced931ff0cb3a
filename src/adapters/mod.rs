pub mod store;
pub mod timer;
pub mod wake;

#[cfg(test)]
pub mod fakes;
