//! Query construction.
//!
//! Free text is lowercased and split on whitespace, then turned into up to three
//! clauses that must all match the same field:
//!
//! | tokens | clauses                                              |
//! |--------|------------------------------------------------------|
//! | 0      | none; matches nothing                                |
//! | 1      | wildcard `*t*`                                       |
//! | 2      | wildcard `*a`, prefix `b`                            |
//! | 3+     | wildcard `*a`, phrase `m1 .. mk` (slop 0), prefix `b` |
//!
//! The first token may be the tail of a longer word and the last token the start of
//! one, so `port 20` finds `report 2024`. This approximates an in-order phrase with open
//! ends; it is not a general substring search.
//!
//! Raw expressions skip all of this and go straight to Tantivy's query parser.

use tantivy::{
    Index, Term,
    query::{BooleanQuery, EmptyQuery, Occur, PhraseQuery, Query, QueryParser, RegexQuery, TermQuery},
    schema::{Field, IndexRecordOption},
};

use crate::SearchError;

/// One clause of a constructed query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    /// Pattern where `*` matches any run of characters and `?` any single character.
    Wildcard(String),
    /// Contiguous, in-order terms with zero slop, starting at position 1.
    Phrase(Vec<String>),
    /// Terms starting with the given text.
    Prefix(String),
}

/// The clauses derived from one free-text query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPlan {
    /// Clauses combined with AND.
    clauses: Vec<Clause>,
}

impl QueryPlan {
    /// Tokenizes `text` and derives its clauses.
    pub fn from_text(text: &str) -> Self {
        let tokens: Vec<String> = text.split_whitespace().map(str::to_lowercase).collect();
        let clauses = match tokens.as_slice() {
            [] => Vec::new(),
            [only] => vec![Clause::Wildcard(format!("*{only}*"))],
            [first, middle @ .., last] => {
                let mut clauses = vec![Clause::Wildcard(format!("*{first}"))];
                if !middle.is_empty() {
                    clauses.push(Clause::Phrase(middle.to_vec()));
                }
                clauses.push(Clause::Prefix(last.clone()));
                clauses
            }
        };
        Self { clauses }
    }

    /// The clauses, in construction order.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// True when the query had no tokens.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

/// Builds Tantivy queries against a single field.
#[derive(Debug, Clone, Copy)]
pub struct QueryBuilder {
    /// Field every clause targets.
    field: Field,
}

impl QueryBuilder {
    /// Creates a builder for `field`.
    pub fn new(field: Field) -> Self {
        Self { field }
    }

    /// Builds a query from free text.
    pub fn build(&self, text: &str) -> Result<Box<dyn Query>, SearchError> {
        self.build_plan(&QueryPlan::from_text(text))
    }

    /// Builds a query from a plan. An empty plan yields a query that matches nothing.
    pub fn build_plan(&self, plan: &QueryPlan) -> Result<Box<dyn Query>, SearchError> {
        if plan.is_empty() {
            return Ok(Box::new(EmptyQuery));
        }
        let clauses = plan
            .clauses()
            .iter()
            .map(|clause| Ok((Occur::Must, self.clause_query(clause)?)))
            .collect::<Result<Vec<_>, SearchError>>()?;
        Ok(Box::new(BooleanQuery::new(clauses)))
    }

    /// Parses a raw expression with Tantivy's query parser, bound to this field.
    pub fn parse_expression(&self, index: &Index, expression: &str) -> Result<Box<dyn Query>, SearchError> {
        QueryParser::for_index(index, vec![self.field])
            .parse_query(expression)
            .map_err(|e| SearchError::QuerySyntax {
                query: expression.to_string(),
                message: e.to_string(),
            })
    }

    /// Converts one clause into a Tantivy query.
    fn clause_query(&self, clause: &Clause) -> Result<Box<dyn Query>, SearchError> {
        match clause {
            Clause::Wildcard(pattern) => self.regex(&wildcard_to_regex(pattern)),
            Clause::Prefix(prefix) => self.regex(&format!("{}.*", regex::escape(prefix))),
            Clause::Phrase(terms) => Ok(self.phrase(terms)),
        }
    }

    /// Builds a regex query over the field's terms.
    fn regex(&self, pattern: &str) -> Result<Box<dyn Query>, SearchError> {
        let query = RegexQuery::from_pattern(pattern, self.field).map_err(|e| SearchError::search(&e))?;
        Ok(Box::new(query))
    }

    /// Builds a zero-slop phrase whose first term sits at position 1.
    ///
    /// Tantivy phrases need two terms, so a single term becomes a plain term query.
    fn phrase(&self, terms: &[String]) -> Box<dyn Query> {
        let mut terms: Vec<(usize, Term)> = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (i + 1, Term::from_field_text(self.field, t)))
            .collect();
        if terms.len() == 1 {
            let (_, term) = terms.remove(0);
            return Box::new(TermQuery::new(term, IndexRecordOption::WithFreqsAndPositions));
        }
        Box::new(PhraseQuery::new_with_offset(terms))
    }
}

/// Translates `*` and `?` into regex syntax, escaping everything else.
fn wildcard_to_regex(pattern: &str) -> String {
    let mut regex = String::with_capacity(pattern.len() + 8);
    let mut literal = String::new();
    for c in pattern.chars() {
        match c {
            '*' | '?' => {
                regex.push_str(&regex::escape(&literal));
                literal.clear();
                regex.push_str(if c == '*' { ".*" } else { "." });
            }
            c => literal.push(c),
        }
    }
    regex.push_str(&regex::escape(&literal));
    regex
}

#[cfg(test)]
mod test {
    use tantivy::{
        TantivyDocument,
        collector::Count,
        schema::{Schema, TextFieldIndexing, TextOptions},
    };

    use super::*;
    use crate::analyzer::{self, LFIND_TOKENIZER};

    fn wildcard(p: &str) -> Clause {
        Clause::Wildcard(p.to_string())
    }

    fn prefix(p: &str) -> Clause {
        Clause::Prefix(p.to_string())
    }

    fn phrase(terms: &[&str]) -> Clause {
        Clause::Phrase(terms.iter().map(|t| t.to_string()).collect())
    }

    #[test]
    fn no_tokens_no_clauses() {
        assert!(QueryPlan::from_text("").is_empty());
        assert!(QueryPlan::from_text("   \t ").is_empty());
    }

    #[test]
    fn single_token_is_contains() {
        for q in ["a", "Report", "x.txt", "über"] {
            let plan = QueryPlan::from_text(q);
            assert_eq!(plan.clauses(), &[wildcard(&format!("*{}*", q.to_lowercase()))]);
        }
    }

    #[test]
    fn two_tokens_are_suffix_and_prefix() {
        let plan = QueryPlan::from_text("  Hello   World ");
        assert_eq!(plan.clauses(), &[wildcard("*hello"), prefix("world")]);
    }

    #[test]
    fn three_or_more_tokens_add_phrase() {
        let plan = QueryPlan::from_text("a b c");
        assert_eq!(plan.clauses(), &[wildcard("*a"), phrase(&["b"]), prefix("c")]);

        let plan = QueryPlan::from_text("the quick brown fox jumps");
        assert_eq!(
            plan.clauses(),
            &[wildcard("*the"), phrase(&["quick", "brown", "fox"]), prefix("jumps")]
        );
    }

    #[test]
    fn wildcard_translation_escapes_literals() {
        assert_eq!(wildcard_to_regex("*a*"), ".*a.*");
        assert_eq!(wildcard_to_regex("*a.txt"), r".*a\.txt");
        assert_eq!(wildcard_to_regex("*f?o*"), ".*f.o.*");
        assert_eq!(wildcard_to_regex("*(x)+"), r".*\(x\)\+");
    }

    /// Builds an in-memory index over a single stored text field.
    fn index_of(values: &[&str]) -> (Index, Field) {
        let mut builder = Schema::builder();
        let options = TextOptions::default()
            .set_indexing_options(
                TextFieldIndexing::default()
                    .set_tokenizer(LFIND_TOKENIZER)
                    .set_index_option(IndexRecordOption::WithFreqsAndPositions),
            )
            .set_stored();
        let field = builder.add_text_field("text", options);
        let index = Index::create_in_ram(builder.build());
        analyzer::register(&index);

        let mut writer = index.writer_with_num_threads(1, 15_000_000).unwrap();
        for value in values {
            let mut doc = TantivyDocument::new();
            doc.add_text(field, value);
            writer.add_document(doc).unwrap();
        }
        writer.commit().unwrap();
        (index, field)
    }

    fn count(values: &[&str], query: &str) -> usize {
        let (index, field) = index_of(values);
        let query = QueryBuilder::new(field).build(query).unwrap();
        index.reader().unwrap().searcher().search(&*query, &Count).unwrap()
    }

    #[test]
    fn single_token_matches_substrings() {
        let values = ["report.pdf", "notes.txt", "port"];
        assert_eq!(count(&values, "port"), 2);
        assert_eq!(count(&values, "TXT"), 1);
        assert_eq!(count(&values, "zz"), 0);
    }

    #[test]
    fn two_tokens_match_open_ended_pair() {
        let values = ["annual report 2024", "report 2023", "airport"];
        assert_eq!(count(&values, "port 20"), 2);
        assert_eq!(count(&values, "port 2024"), 1);
        assert_eq!(count(&values, "air port"), 0);
    }

    #[test]
    fn middle_tokens_must_be_contiguous() {
        let values = ["the quick brown fox", "the quick red brown fox", "quick brown"];
        assert_eq!(count(&values, "the quick brown fox"), 1);
        assert_eq!(count(&values, "he quick brown f"), 1);
    }

    #[test]
    fn empty_query_matches_nothing() {
        assert_eq!(count(&["anything"], "   "), 0);
    }

    #[test]
    fn special_characters_are_literal() {
        let values = ["a+b.txt", "aab.txt"];
        assert_eq!(count(&values, "a+b"), 1);
        assert_eq!(count(&values, "(unbalanced"), 0);
    }

    #[test]
    fn expression_mode_uses_query_parser() {
        let (index, field) = index_of(&["hello world", "goodbye world"]);
        let builder = QueryBuilder::new(field);
        let searcher = index.reader().unwrap().searcher();

        let query = builder.parse_expression(&index, "hello OR goodbye").unwrap();
        assert_eq!(searcher.search(&*query, &Count).unwrap(), 2);

        let query = builder.parse_expression(&index, "+world -goodbye").unwrap();
        assert_eq!(searcher.search(&*query, &Count).unwrap(), 1);

        let query = builder.parse_expression(&index, "world -goodbye").unwrap();
        assert_eq!(searcher.search(&*query, &Count).unwrap(), 1);
    }

    #[test]
    fn malformed_expression_is_syntax_error() {
        let (index, field) = index_of(&["x"]);
        let err = QueryBuilder::new(field)
            .parse_expression(&index, "field_that_does_not_exist:x")
            .err()
            .unwrap();
        assert!(matches!(err, SearchError::QuerySyntax { .. }));
    }
}
