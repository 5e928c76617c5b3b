mod search_tests;
mod review_tests;
mod category_tag_tests;
