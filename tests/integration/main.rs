//! Integration tests exercising policies end to end.


mod chain_tests;
mod context_tests;
mod entity_tests;
mod operation_tests;
