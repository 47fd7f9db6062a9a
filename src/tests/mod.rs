mod utils;

mod catalog_tests;
mod geo_tests;
