//! Gene protein reaction rules as a boolean expression tree
use std::fmt::{Display, Formatter};

/// Representation of a Gene Protein Reaction Rule as an AST
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Gpr {
    /// A terminal gene identifier
    Gene(String),
    /// Both sides are required
    And { left: Box<Gpr>, right: Box<Gpr> },
    /// Either side suffices
    Or { left: Box<Gpr>, right: Box<Gpr> },
}

impl Gpr {
    pub fn gene(id: &str) -> Gpr {
        Gpr::Gene(id.to_string())
    }

    pub fn and(left: Gpr, right: Gpr) -> Gpr {
        Gpr::And {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn or(left: Gpr, right: Gpr) -> Gpr {
        Gpr::Or {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Gene identifiers in pre-order, duplicates included
    pub fn genes(&self) -> Vec<&str> {
        let mut genes = Vec::new();
        self.collect_genes(&mut genes);
        genes
    }

    fn collect_genes<'a>(&'a self, genes: &mut Vec<&'a str>) {
        match self {
            Gpr::Gene(id) => genes.push(id),
            Gpr::And { left, right } | Gpr::Or { left, right } => {
                left.collect_genes(genes);
                right.collect_genes(genes);
            }
        }
    }

    /// Generate a GPR string with gene ids from the GPR AST
    pub fn to_string_id(&self) -> String {
        match self {
            Gpr::Gene(id) => id.clone(),
            Gpr::And { left, right } => {
                format!("({} and {})", left.to_string_id(), right.to_string_id())
            }
            Gpr::Or { left, right } => {
                format!("({} or {})", left.to_string_id(), right.to_string_id())
            }
        }
    }
}

impl Display for Gpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_string_id())
    }
}
