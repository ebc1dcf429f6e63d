//! オントロジー読み込みと正規化
//!
//! このクレートは分類器のフロントエンドを提供します:
//! - OBO / OWL (RDF-XML) パーサと共通ドキュメントモデル
//! - シンボルテーブルへのインターンと正規形 (NF1〜NF4) への変換

pub mod error;
pub mod model;
pub mod normalize;
pub mod obo;
pub mod owl;

pub use error::ParseError;
pub use model::{IntersectionPart, OntologyDocument, Relationship, Synonym, Term, TypeDef};
pub use normalize::normalize;
pub use obo::parse_obo;
pub use owl::parse_owl;

use std::path::Path;

/// Input syntax of an ontology file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Obo,
    Owl,
}

impl InputFormat {
    /// Detects the format from a file extension. `.obo` is OBO; `.owl`,
    /// `.xml` and `.rdf` are OWL/RDF-XML.
    pub fn detect(path: &Path) -> Option<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("obo") => Some(Self::Obo),
            Some("owl") | Some("xml") | Some("rdf") => Some(Self::Owl),
            _ => None,
        }
    }
}
