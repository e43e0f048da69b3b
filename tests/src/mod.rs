#[cfg(test)]
pub mod datasets_api_tests;
