mod rate_limit_store_tests;
