//! EL 分類器のコアデータ構造
//!
//! このクレートは推論エンジンが消費する土台を提供します:
//! - 概念・ロールの密な整数識別子とシンボルテーブル
//! - 正規形軸 (NF1〜NF4) を規則ごとに索引した AxiomStore

pub mod model;
pub mod store;

pub use model::{ConceptId, RoleFiller, RoleId, SymbolTable, BOTTOM, TOP};
pub use store::{AxiomStore, StoreError};
