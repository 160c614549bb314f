pub mod forecast;
pub mod pre_processor_tests;
