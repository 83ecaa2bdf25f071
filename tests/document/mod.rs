mod tests_document;
mod tests_handles;
mod tests_mutations;
mod tests_properties;
