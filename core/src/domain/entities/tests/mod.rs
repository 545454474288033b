mod rate_limit_tests;
