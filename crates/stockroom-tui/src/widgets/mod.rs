//! Reusable widgets and formatting helpers.

pub mod edit_dialog;
pub mod money_fmt;
pub mod stat_card;
