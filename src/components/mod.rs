//! UIコンポーネントモジュール

pub mod card_grid;
pub mod modal;
