//! EL 飽和推論エンジン
//!
//! このクレートは分類の中核を実装します:
//! - 概念ごとのコンテキスト (上位概念集合とロールリンク)
//! - 完備化規則 CR1〜CR5 による固定点飽和
//! - 推移簡約による直接階層の抽出と JSON 出力
//!
//! 軸は [`mimizuku_core::AxiomStore`] から読み取り専用で参照されます。

pub mod context;
pub mod saturation;
pub mod taxonomy;

pub use context::Context;
pub use saturation::saturate;
pub use taxonomy::{
    count_inferred, ClassificationStats, ClassifiedConcept, ClassifiedHierarchy, Taxonomy,
};
