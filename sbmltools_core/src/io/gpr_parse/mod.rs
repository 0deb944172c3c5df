//! Module for parsing Gene Protein Reaction strings and extracting the genes they reference

use std::collections::BTreeSet;

use thiserror::Error;
use tracing::{trace, warn};

use crate::conversion::capabilities::GeneNormalizer;
use crate::io::gpr_parse::lexer::LexerError;
use crate::io::gpr_parse::parser::ParseError;
use crate::metabolic_model::gpr::Gpr;
use crate::utils::text::{is_numeric, strip_quotes};
use crate::validation::message::{ConversionMessage, MessageKind, Severity};

mod lexer;
pub mod parser;
mod token;

/// Field name used on messages produced while reading gene associations
pub const GENE_ASSOCIATION_FIELD: &str = "geneAssociation";

/// Parse a single Gene Protein Reaction expression into a GPR Tree
///
/// # Examples
/// ```rust
/// use sbmltools_core::io::gpr_parse::parse_gpr;
/// let gpr = parse_gpr("Rv0001 and (Rv0002 or Rv0003)").unwrap();
/// assert_eq!(gpr.genes(), vec!["Rv0001", "Rv0002", "Rv0003"]);
/// ```
pub fn parse_gpr(input: &str) -> Result<Gpr, GprParseError> {
    let tokens = lexer::Lexer::new(input).lex()?;
    let gpr = parser::GprParser::new(tokens).parse()?;
    Ok(gpr)
}

/// Collect the set of genes referenced by a gene association string.
///
/// Never fails: malformed pieces are skipped and logged. See
/// [`extract_genes_with_messages`] for the rules and for access to the warnings.
///
/// # Examples
/// ```rust
/// use sbmltools_core::io::gpr_parse::extract_genes;
/// let genes = extract_genes(Some("b0001 and b0002;b0003"), None);
/// assert_eq!(genes.len(), 3);
/// assert!(extract_genes(None, None).is_empty());
/// ```
pub fn extract_genes(
    gpr: Option<&str>,
    normalizer: Option<&dyn GeneNormalizer>,
) -> BTreeSet<String> {
    extract_genes_with_messages(gpr, normalizer, "").0
}

/// Collect the set of genes referenced by a gene association string, along with one warning
/// per skipped piece.
///
/// - `N/A` becomes the placeholder gene `unknown`
/// - surrounding double quotes are stripped
/// - the text is split on `;` and `|` and each chunk is parsed as its own expression, a chunk
///   that fails to parse is skipped on its own
/// - numeric identifiers are dropped, the others go through `normalizer` when one is given and
///   are dropped if they normalize to nothing
///
/// `owner` (usually the reaction id) prefixes the context of the returned messages.
pub fn extract_genes_with_messages(
    gpr: Option<&str>,
    normalizer: Option<&dyn GeneNormalizer>,
    owner: &str,
) -> (BTreeSet<String>, Vec<ConversionMessage>) {
    let mut genes = BTreeSet::new();
    let mut messages = Vec::new();
    let raw = match gpr {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return (genes, messages),
    };

    let replaced = raw.replace("N/A", "unknown");
    let expression = strip_quotes(replaced.trim());

    for sub_expression in expression.split([';', '|']) {
        if sub_expression.trim().is_empty() {
            continue;
        }
        let tree = match parse_gpr(sub_expression) {
            Ok(tree) => tree,
            Err(err) => {
                warn!("invalid gpr: [{}], {}", sub_expression, err);
                messages.push(ConversionMessage::new(
                    Severity::Warn,
                    MessageKind::MalformedExpression,
                    GENE_ASSOCIATION_FIELD,
                    &with_owner(owner, sub_expression.trim()),
                ));
                continue;
            }
        };
        for gene in tree.genes() {
            if is_numeric(gene) {
                warn!("[IGNORE NUMBER LOCUS] gene: {}", gene);
                messages.push(ConversionMessage::new(
                    Severity::Warn,
                    MessageKind::NumericGene,
                    GENE_ASSOCIATION_FIELD,
                    &with_owner(owner, gene),
                ));
                continue;
            }
            let gene = match normalizer {
                Some(normalizer) => match normalizer.normalize(gene) {
                    Some(normalized) => normalized,
                    None => continue,
                },
                None => gene.to_string(),
            };
            if !gene.trim().is_empty() {
                genes.insert(gene);
            }
        }
    }

    trace!("GPR: {}, Genes: {:?}", raw, genes);
    (genes, messages)
}

fn with_owner(owner: &str, text: &str) -> String {
    if owner.is_empty() {
        text.to_string()
    } else {
        format!("{}: {}", owner, text)
    }
}

/// Enum representing possible lex and parse errors
#[derive(Debug, Error, PartialEq, Clone)]
pub enum GprParseError {
    /// Lexing Error
    #[error("Error occurred during lexing (conversion of GPR string to tokens): {0}")]
    LexingError(#[from] LexerError),
    /// Parsing Error
    #[error("Error occurred during parsing (conversion of tokens to GPR tree): {0}")]
    ParsingError(#[from] ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn set(genes: &[&str]) -> BTreeSet<String> {
        genes.iter().map(|g| g.to_string()).collect()
    }

    #[test]
    fn test_parse_gpr() {
        let gpr = parse_gpr("Rv0001 and (Rv0002 or Rv0003)").unwrap();
        assert_eq!(
            gpr,
            Gpr::and(
                Gpr::gene("Rv0001"),
                Gpr::or(Gpr::gene("Rv0002"), Gpr::gene("Rv0003"))
            )
        );
    }

    #[test]
    fn test_parse_gpr_errors() {
        assert!(matches!(
            parse_gpr("b0001 , b0002"),
            Err(GprParseError::LexingError(_))
        ));
        assert!(matches!(
            parse_gpr("b0001 b0002"),
            Err(GprParseError::ParsingError(ParseError::EarlyTermination))
        ));
    }

    #[rstest]
    #[case(None, &[])]
    #[case(Some(""), &[])]
    #[case(Some("   "), &[])]
    #[case(Some("g1 and g2"), &["g1", "g2"])]
    #[case(Some("g1;g2|g3"), &["g1", "g2", "g3"])]
    #[case(Some("N/A"), &["unknown"])]
    #[case(Some("\"\"b0001 or b0002\"\""), &["b0001", "b0002"])]
    #[case(Some("(b0001 and b0002) or (b0001 and b0003)"), &["b0001", "b0002", "b0003"])]
    #[case(Some("b0001 ; ; b0002"), &["b0001", "b0002"])]
    fn extracts_expected_genes(#[case] gpr: Option<&str>, #[case] expected: &[&str]) {
        let (genes, messages) = extract_genes_with_messages(gpr, None, "rxn");
        assert_eq!(genes, set(expected));
        assert!(messages.is_empty());
    }

    #[test]
    fn numeric_genes_are_excluded_with_a_warning() {
        let (genes, messages) = extract_genes_with_messages(Some("123"), None, "");
        assert!(genes.is_empty());
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].kind, MessageKind::NumericGene);
        assert_eq!(messages[0].severity, Severity::Warn);
        assert_eq!(messages[0].context, "123");
    }

    #[test]
    fn malformed_sub_expression_is_isolated() {
        let (genes, messages) =
            extract_genes_with_messages(Some("b0001;b0002 and (b0003|b0004"), None, "R_PFK");
        assert_eq!(genes, set(&["b0001", "b0004"]));
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].kind, MessageKind::MalformedExpression);
        assert_eq!(messages[0].context, "R_PFK: b0002 and (b0003");
    }

    #[test]
    fn normalizer_transforms_and_drops() {
        let normalizer = |gene: &str| -> Option<String> {
            match gene {
                "drop" => None,
                "blank" => Some("  ".to_string()),
                other => Some(format!("kb|{}", other)),
            }
        };
        let genes = extract_genes(Some("b0001 or drop or blank"), Some(&normalizer));
        assert_eq!(genes, set(&["kb|b0001"]));
    }

    #[test]
    fn extraction_is_deterministic() {
        let first = extract_genes(Some("b0003 or b0001 or b0002"), None);
        let second = extract_genes(Some("b0003 or b0001 or b0002"), None);
        assert_eq!(first, second);
        assert_eq!(
            first.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["b0001", "b0002", "b0003"]
        );
    }
}
