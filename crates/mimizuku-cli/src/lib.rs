//! EL 分類器の CLI クレート。

pub mod commands;
