/// Connection helper tests
pub mod db_tests;
