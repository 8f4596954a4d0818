mod collection_test;
mod document_test;
mod query_test;
mod transform_test;
