pub mod api;
#[cfg(test)]
pub(crate) mod mock;
pub mod ui;
