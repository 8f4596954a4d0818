mod custom_filter_test;
mod filter_test;
