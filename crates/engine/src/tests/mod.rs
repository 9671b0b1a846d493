mod helpers;
mod merger_tests;
