mod tests_query;
mod tests_rule_parser;
mod tests_syntax_file;
