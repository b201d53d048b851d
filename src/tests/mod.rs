//! Binary-side integration tests, wiring the library pieces together the
//! way the CLI does.

mod report_tests;
