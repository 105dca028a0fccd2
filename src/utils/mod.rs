//! Module for additional computational capabilities
pub mod test_helper;
pub mod uom_macros;
