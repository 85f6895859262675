use super::error::TreeError;
use super::node::NodeId;
use super::tree::Tree;
use nom::{
    branch::alt,
    bytes::complete::{is_not, tag, take_while},
    character::complete::{char, digit1, multispace0},
    combinator::{cut, map, map_res, opt, recognize},
    error::{context, ContextError, ErrorKind, FromExternalError, ParseError},
    multi::{many0, many1, separated_list1},
    sequence::{delimited, preceded},
    IResult, Offset, Parser,
};

// ================================================================================================
// Options
// ================================================================================================

/// Controls how labels are materialized into the `Tree`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Keep the surrounding quote characters of quoted labels.
    ///
    /// With `keep_quotes`, `'Grain yield'` is stored as the literal string
    /// `'Grain yield'`; without it, as `Grain yield`.
    pub keep_quotes: bool,
}

impl ParseOptions {
    /// Labels are stored exactly as written, quotes included.
    pub fn verbatim() -> Self {
        Self { keep_quotes: true }
    }
}

// ================================================================================================
// Error Handling Structures
// ================================================================================================

#[derive(Clone, Debug, PartialEq)]
pub enum DetailedErrorKind {
    Context(&'static str),
    Nom(ErrorKind),
}

/// A custom error type for nom that accumulates context and error kinds.
#[derive(Clone, Debug, PartialEq)]
pub struct DetailedError<'a> {
    pub errors: Vec<(&'a str, DetailedErrorKind)>,
}

impl<'a> ParseError<&'a str> for DetailedError<'a> {
    fn from_error_kind(input: &'a str, kind: ErrorKind) -> Self {
        DetailedError {
            errors: vec![(input, DetailedErrorKind::Nom(kind))],
        }
    }

    fn append(input: &'a str, kind: ErrorKind, mut other: Self) -> Self {
        other.errors.push((input, DetailedErrorKind::Nom(kind)));
        other
    }
}

impl<'a> ContextError<&'a str> for DetailedError<'a> {
    fn add_context(input: &'a str, ctx: &'static str, mut other: Self) -> Self {
        other.errors.push((input, DetailedErrorKind::Context(ctx)));
        other
    }
}

impl<'a, E> FromExternalError<&'a str, E> for DetailedError<'a> {
    fn from_external_error(input: &'a str, kind: ErrorKind, _e: E) -> Self {
        DetailedError {
            errors: vec![(input, DetailedErrorKind::Nom(kind))],
        }
    }
}

// ================================================================================================
// Intermediate Structure
// ================================================================================================

/// A label as it appeared in the text: its raw content and the quote character, if any.
/// Inside quotes, a doubled quote character is still doubled in `text`.
#[derive(Debug, Clone, PartialEq)]
struct Label {
    text: String,
    quote: Option<char>,
}

impl Label {
    fn render(self, options: ParseOptions) -> Option<String> {
        match self.quote {
            Some(q) if options.keep_quotes => Some(format!("{q}{}{q}", self.text)),
            Some(q) => {
                let text = self.text.replace(&format!("{q}{q}"), &q.to_string());
                (!text.is_empty()).then_some(text)
            }
            None if self.text.is_empty() => None,
            None => Some(self.text),
        }
    }
}

/// `ParsedNode` is a temporary recursive structure used during parsing.
/// After parsing it is flattened into the arena-based `Tree` via `to_tree`.
#[derive(Debug)]
struct ParsedNode {
    label: Option<Label>,
    length: Option<f64>,
    children: Vec<ParsedNode>,
}

impl ParsedNode {
    /// Adds this node and its descendants to `tree` in preorder.
    /// Returns the `NodeId` of the created node.
    fn to_tree(self, tree: &mut Tree, options: ParseOptions) -> Result<NodeId, TreeError> {
        let id = tree.add_node();
        if let Some(node) = tree.get_node_mut(id) {
            node.name = self.label.and_then(|l| l.render(options));
            node.length = self.length;
        }
        for child in self.children {
            let child_id = child.to_tree(tree, options)?;
            tree.add_child(id, child_id)?;
        }
        Ok(id)
    }
}

// ================================================================================================
// Parsers
// ================================================================================================

// Wraps another parser and ignores surrounding whitespace (spaces, tabs, newlines).
fn ws<'a, F, O, E>(inner: F) -> impl Parser<&'a str, Output = O, Error = E>
where
    F: Parser<&'a str, Output = O, Error = E>,
    E: ParseError<&'a str>,
{
    delimited(multispace0, inner, multispace0)
}

// Node label.
// - Unquoted strings stop at reserved chars: "():;,[]"
// - Single quoted strings ('grain yield'), '' inside stands for one quote
// - Double quoted strings ("grain yield"), "" inside stands for one quote
fn parse_label(input: &str) -> IResult<&str, Label, DetailedError<'_>> {
    let unquoted = map(take_while(|c: char| !"():;,[]".contains(c)), |s: &str| {
        Label {
            text: s.trim().to_string(),
            quote: None,
        }
    });

    let single_quoted = delimited(
        char('\''),
        map(recognize(many0(alt((is_not("'"), tag("''"))))), |s: &str| Label {
            text: s.to_string(),
            quote: Some('\''),
        }),
        char('\''),
    );

    let double_quoted = delimited(
        char('"'),
        map(recognize(many0(alt((is_not("\""), tag("\"\""))))), |s: &str| Label {
            text: s.to_string(),
            quote: Some('"'),
        }),
        char('"'),
    );

    context("label", alt((single_quoted, double_quoted, unquoted))).parse(input)
}

// Branch length after a colon, e.g. ":0.123" or ":1e-3".
fn parse_length(input: &str) -> IResult<&str, f64, DetailedError<'_>> {
    context(
        "length",
        preceded(
            ws(char(':')),
            // A ':' without a number is a hard failure, not a backtrack.
            cut(map_res(
                recognize((
                    opt(char('-')),
                    digit1,
                    opt((char('.'), digit1)),
                    opt((
                        alt((char('e'), char('E'))),
                        opt(alt((char('+'), char('-')))),
                        digit1,
                    )),
                )),
                |s: &str| s.parse::<f64>(),
            )),
        ),
    )
    .parse(input)
}

// Bracketed comments ([&R], [&&NHX:S=x], [bootstrap=90]) carry nothing the
// analyses use; they are consumed and dropped.
fn skip_comments(input: &str) -> IResult<&str, (), DetailedError<'_>> {
    context(
        "comment",
        map(
            many0(delimited(ws(char('[')), take_while(|c| c != ']'), ws(char(']')))),
            |_| (),
        ),
    )
    .parse(input)
}

// Recursive parser for a node and its children: (child1,child2,...)Label:Length[Comment]
fn parse_subtree(input: &str) -> IResult<&str, ParsedNode, DetailedError<'_>> {
    let (input, children) = context(
        "children",
        opt(delimited(
            ws(char('(')),
            separated_list1(ws(char(',')), parse_subtree),
            ws(char(')')),
        )),
    )
    .parse(input)?;

    let (input, label) = opt(parse_label).parse(input)?;

    // Comments may sit before or after the length.
    let (input, _) = skip_comments(input)?;
    let (input, length) = opt(parse_length).parse(input)?;
    let (input, _) = skip_comments(input)?;

    Ok((
        input,
        ParsedNode {
            label,
            length,
            children: children.unwrap_or_default(),
        },
    ))
}

// ================================================================================================
// Entry Points
// ================================================================================================

/// Parses a single Newick tree string, quotes stripped from labels.
/// Expects the tree to end with a semicolon ';'.
pub fn parse_newick(input: &str) -> Result<Tree, TreeError> {
    parse_newick_with(input, ParseOptions::default())
}

/// Parses a single Newick tree string with explicit options.
pub fn parse_newick_with(input: &str, options: ParseOptions) -> Result<Tree, TreeError> {
    let mut parser = (ws(parse_subtree), ws(char(';')));

    match parser.parse(input) {
        Ok((_, (root_node, _))) => build_tree(root_node, options),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(make_tree_error(input, e)),
        Err(nom::Err::Incomplete(_)) => Err(incomplete_error()),
    }
}

/// Parses a string containing multiple Newick trees.
/// Top-level bracket blocks (file headers) between trees are ignored.
pub fn parse_newick_multi(input: &str) -> Result<Vec<Tree>, TreeError> {
    parse_newick_multi_with(input, ParseOptions::default())
}

pub fn parse_newick_multi_with(
    input: &str,
    options: ParseOptions,
) -> Result<Vec<Tree>, TreeError> {
    let valid_tree = map((ws(parse_subtree), ws(char(';'))), |(root, _)| Some(root));
    let garbage = map(
        ws(delimited(char('['), take_while(|c| c != ']'), char(']'))),
        |_| None,
    );

    let mut parser = many1(alt((garbage, valid_tree)));

    match parser.parse(input) {
        Ok((_, trees_data)) => trees_data
            .into_iter()
            .flatten()
            .map(|root| build_tree(root, options))
            .collect(),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(make_tree_error(input, e)),
        Err(nom::Err::Incomplete(_)) => Err(incomplete_error()),
    }
}

fn build_tree(root_node: ParsedNode, options: ParseOptions) -> Result<Tree, TreeError> {
    let mut tree = Tree::new();
    let root_id = root_node.to_tree(&mut tree, options)?;
    tree.set_root(root_id);
    Ok(tree)
}

fn incomplete_error() -> TreeError {
    TreeError::ParseError {
        message: "Incomplete input".to_string(),
        line: 0,
        column: 0,
        snippet: "".to_string(),
    }
}

// Converts nom errors into a TreeError with line/column of the innermost failure
fn make_tree_error(input: &str, e: DetailedError) -> TreeError {
    let remaining = match e.errors.first() {
        Some((remaining, _)) => *remaining,
        None => input,
    };
    let offset = input.offset(remaining);

    let prefix = &input[..offset];
    let line = prefix.chars().filter(|&c| c == '\n').count() + 1;
    let last_newline = prefix.rfind('\n').map(|p| p + 1).unwrap_or(0);
    let column = offset - last_newline + 1;

    let mut msg = String::new();
    for (_, kind) in e.errors.iter().rev() {
        match kind {
            DetailedErrorKind::Context(ctx) => {
                msg.push_str(&format!("while parsing {}:\n", ctx));
            }
            DetailedErrorKind::Nom(k) => {
                msg.push_str(&format!("  error: {:?}\n", k));
            }
        }
    }

    TreeError::ParseError {
        message: msg,
        line,
        column,
        snippet: remaining.chars().take(50).collect(),
    }
}

impl Tree {
    /// Parse a Newick string into a Tree.
    ///
    /// # Example
    /// ```
    /// use rvp::libs::phylo::Tree;
    ///
    /// let tree = Tree::from_newick("(A:0.1,B:0.2)Root;").unwrap();
    /// assert_eq!(tree.len(), 3);
    ///
    /// let result = Tree::from_newick("(A,B:invalid)C;");
    /// assert!(result.is_err());
    /// ```
    pub fn from_newick(input: &str) -> Result<Self, TreeError> {
        parse_newick(input)
    }

    pub fn from_newick_with(input: &str, options: ParseOptions) -> Result<Self, TreeError> {
        parse_newick_with(input, options)
    }

    pub fn from_newick_multi(input: &str) -> Result<Vec<Self>, TreeError> {
        parse_newick_multi(input)
    }

    pub fn from_newick_multi_with(
        input: &str,
        options: ParseOptions,
    ) -> Result<Vec<Self>, TreeError> {
        parse_newick_multi_with(input, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child_names(tree: &Tree) -> Vec<Option<String>> {
        let root = tree.get_node(tree.get_root().unwrap()).unwrap();
        root.children
            .iter()
            .map(|&c| tree.get_node(c).unwrap().name.clone())
            .collect()
    }

    #[test]
    fn test_parser_simple() {
        let tree = Tree::from_newick("(A,B)C;").unwrap();
        assert_eq!(tree.len(), 3);

        let root = tree.get_node(tree.get_root().unwrap()).unwrap();
        assert_eq!(root.name.as_deref(), Some("C"));
        assert_eq!(root.children.len(), 2);
    }

    #[test]
    fn test_parser_unnamed_internal() {
        let tree = Tree::from_newick("((A,B),(C,D));").unwrap();
        assert_eq!(tree.len(), 7);
        assert_eq!(child_names(&tree), vec![None, None]);
    }

    #[test]
    fn test_parser_preorder_ids() {
        // Nodes enter the arena in preorder
        let tree = Tree::from_newick("((A,B)X,C)R;").unwrap();
        let names: Vec<_> = (0..tree.len())
            .map(|id| tree.get_node(id).unwrap().name.clone().unwrap())
            .collect();
        assert_eq!(names, vec!["R", "X", "A", "B", "C"]);
    }

    #[test]
    fn test_parser_lengths() {
        let tree = Tree::from_newick("(A:0.1, B:0.2e-1)Root:100;").unwrap();

        let root = tree.get_node(tree.get_root().unwrap()).unwrap();
        assert_eq!(root.length, Some(100.0));

        let child2 = tree.get_node(root.children[1]).unwrap();
        assert_eq!(child2.name.as_deref(), Some("B"));
        assert_eq!(child2.length, Some(0.02));
    }

    #[test]
    fn test_parser_comments_skipped() {
        let tree = Tree::from_newick("(A:0.1[&&NHX:S=x],B[note]:0.2)n1[&R];").unwrap();
        assert_eq!(tree.len(), 3);
        assert_eq!(
            child_names(&tree),
            vec![Some("A".to_string()), Some("B".to_string())]
        );
    }

    #[test]
    fn test_parser_multiline_whitespace() {
        let input = "
        (
            A : 0.1,
            B : 0.2
        ) Root ;
        ";
        let tree = Tree::from_newick(input).unwrap();
        assert_eq!(tree.len(), 3);
        let root = tree.get_node(tree.get_root().unwrap()).unwrap();
        assert_eq!(root.name.as_deref(), Some("Root"));
    }

    #[test]
    fn test_parser_quoted_stripped() {
        let tree = Tree::from_newick("('Grain yield':0.1, \"Plant height\":0.2);").unwrap();
        assert_eq!(
            child_names(&tree),
            vec![
                Some("Grain yield".to_string()),
                Some("Plant height".to_string())
            ]
        );
    }

    #[test]
    fn test_parser_quoted_verbatim() {
        let tree =
            Tree::from_newick_with("('Grain yield',\"Height\",Mass);", ParseOptions::verbatim())
                .unwrap();
        assert_eq!(
            child_names(&tree),
            vec![
                Some("'Grain yield'".to_string()),
                Some("\"Height\"".to_string()),
                Some("Mass".to_string())
            ]
        );
    }

    #[test]
    fn test_parser_doubled_quotes() {
        let tree = Tree::from_newick("('O''Brien',\"say \"\"hi\"\"\",B);").unwrap();
        assert_eq!(
            child_names(&tree),
            vec![
                Some("O'Brien".to_string()),
                Some("say \"hi\"".to_string()),
                Some("B".to_string())
            ]
        );

        // Verbatim keeps the text as written
        let tree = Tree::from_newick_with("('O''Brien',B);", ParseOptions::verbatim()).unwrap();
        assert_eq!(child_names(&tree)[0], Some("'O''Brien'".to_string()));
    }

    #[test]
    fn test_parser_multi() {
        let input = "[header]\n(A,B);\n(C,(D,E));\n";
        let trees = Tree::from_newick_multi(input).unwrap();
        assert_eq!(trees.len(), 2);
        assert_eq!(trees[1].len(), 5);
    }

    #[test]
    fn test_parser_error() {
        let res = Tree::from_newick("(A,B)C");
        match res {
            Err(TreeError::ParseError { line, column, .. }) => {
                assert_eq!(line, 1);
                assert_eq!(column, 7);
            }
            _ => panic!("Expected ParseError, got {:?}", res),
        }

        let res2 = Tree::from_newick("(A,B:invalid)C;");
        match res2 {
            Err(TreeError::ParseError { message, .. }) => {
                assert!(message.contains("length"));
            }
            _ => panic!("Expected ParseError, got {:?}", res2),
        }
    }
}
